//! End-to-end pipeline tests: raw text in, suggestions and execution
//! results out.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use volition_app::Pipeline;
use volition_core::{RawInput, Source, Timestamp, VolitionConfig};
use volition_exec::StaticPermissions;
use volition_extract::EntityType;
use volition_intent::IntentLabel;
use volition_suggest::{priority, Action, ActionCategory, ActionDetail, ActionStatus};

fn pipeline() -> Arc<Pipeline> {
    Arc::new(Pipeline::new(
        &VolitionConfig::default(),
        None,
        Arc::new(StaticPermissions::allow_all()),
    ))
}

/// Fixed reference clock: 2026-08-07 10:00 UTC.
fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap()
}

#[tokio::test]
async fn test_wedding_next_month_end_to_end() {
    let pipeline = pipeline();
    let input = RawInput::new("다음 달 15일 결혼식이야", Source::Chat);

    let output = pipeline.process_at(input, reference_now()).await;

    // Intent: social with confidence above the fallback threshold.
    assert_eq!(output.intent.label, IntentLabel::Social);
    assert!(output.intent.confidence > 0.6);

    // Exactly one date entity, resolved to next month's 15th.
    let dates: Vec<_> = output
        .entities
        .iter()
        .filter(|e| e.entity_type == EntityType::Date)
        .collect();
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].value, "2026-09-15");

    // A calendar action is suggested, pending, with that date attached.
    let calendar: Vec<_> = output
        .suggestions
        .iter()
        .filter(|a| a.category() == ActionCategory::Calendar)
        .collect();
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0].status, ActionStatus::Pending);
    assert!(calendar[0]
        .entities
        .iter()
        .any(|e| e.entity_type == EntityType::Date && e.value == "2026-09-15"));
}

#[tokio::test]
async fn test_funeral_tomorrow_forces_urgent_notification() {
    let pipeline = pipeline();
    let input = RawInput::new("어머니 장례식이 내일이야", Source::Voice);

    let output = pipeline.process_at(input, reference_now()).await;

    assert_eq!(output.temporal.urgency, 5);
    let urgent: Vec<&Action> = output
        .suggestions
        .iter()
        .filter(|a| a.category() == ActionCategory::Notification)
        .collect();
    assert!(
        !urgent.is_empty(),
        "urgency 5 must force an urgent notification"
    );
    assert!(urgent.iter().any(|a| a.priority == priority::URGENT));
}

#[tokio::test]
async fn test_empty_text_yields_baseline() {
    let pipeline = pipeline();
    let input = RawInput::new("", Source::Manual);

    let output = pipeline.process_at(input, reference_now()).await;

    assert!(output.entities.is_empty());
    assert_eq!(output.intent.label, IntentLabel::Other);
    assert!(output.intent.confidence <= 0.3);
    assert!(output.suggestions.is_empty());
}

#[tokio::test]
async fn test_amount_normalization_agrees_end_to_end() {
    let pipeline = pipeline();
    let a = pipeline
        .process_at(RawInput::new("10만 원", Source::Manual), reference_now())
        .await;
    let b = pipeline
        .process_at(RawInput::new("100,000원", Source::Manual), reference_now())
        .await;

    let amount = |output: &volition_app::PipelineOutput| {
        output
            .entities
            .iter()
            .find(|e| e.entity_type == EntityType::Amount)
            .map(|e| e.value.clone())
    };
    assert_eq!(amount(&a).as_deref(), Some("100000"));
    assert_eq!(amount(&a), amount(&b));
}

#[tokio::test]
async fn test_entity_confidences_always_in_range() {
    let pipeline = pipeline();
    let texts = [
        "다음 달 15일 결혼식이야 축의금 10만 원",
        "내일 오후 3시 강남역 카페 민수씨 010-1234-5678",
        "kim@example.com 으로 보고서 제출, 마감은 2026-09-01",
    ];
    for text in texts {
        let output = pipeline
            .process_at(RawInput::new(text, Source::Screenshot), reference_now())
            .await;
        for entity in &output.entities {
            assert!(
                (0.0..=1.0).contains(&entity.confidence),
                "confidence out of range for {:?}",
                entity
            );
        }
    }
}

#[tokio::test]
async fn test_suggestions_execute_end_to_end() {
    let pipeline = pipeline();
    let input = RawInput::new("다음 달 15일 결혼식이야 축의금 10만 원", Source::Chat);

    let output = pipeline.process_at(input, reference_now()).await;
    assert!(output.suggestions.len() >= 2, "calendar + payment expected");

    let mut actions = output.suggestions.clone();
    let results = pipeline.execute_suggestions(&mut actions).await;

    assert_eq!(results.len(), actions.len());
    for (action, result) in actions.iter().zip(&results) {
        assert_eq!(action.id, result.action_id);
        assert!(result.success, "error: {:?}", result.error);
        assert_eq!(action.status, ActionStatus::Executed);
    }
}

#[tokio::test]
async fn test_calendar_action_without_date_fails_never_throws() {
    let pipeline = pipeline();
    let mut action = Action::new(
        "회의",
        "회의 잡기",
        3,
        vec![], // no date entity attached
        ActionDetail::Calendar {
            title: "회의".to_string(),
            start_time: Timestamp(1_800_000_000),
            end_time: Timestamp(1_800_003_600),
            location: None,
            attendees: vec![],
            reminder_minutes: None,
        },
    );

    let result = pipeline.executor().execute(&mut action).await;
    assert!(!result.success);
    assert!(result.error.as_ref().unwrap().contains("date"));
    assert_eq!(action.status, ActionStatus::Failed);
}

#[tokio::test]
async fn test_process_all_sequential_in_order() {
    let pipeline = pipeline();
    let inputs = vec![
        RawInput::new("결혼식 초대합니다", Source::Chat),
        RawInput::new("송금 부탁해", Source::Chat),
        RawInput::new("그냥 메모", Source::Manual),
    ];

    let outputs = pipeline.process_all(inputs).await;
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].intent.label, IntentLabel::Social);
    assert_eq!(outputs[1].intent.label, IntentLabel::Payment);
    assert_eq!(outputs[2].intent.label, IntentLabel::Other);
}

#[tokio::test]
async fn test_process_concurrent_preserves_input_order() {
    let pipeline = pipeline();
    let inputs: Vec<RawInput> = (0..8)
        .map(|i| RawInput::new(format!("메모 {}", i), Source::Manual))
        .collect();

    let outputs = pipeline.process_concurrent(inputs).await;
    assert_eq!(outputs.len(), 8);
    for (i, output) in outputs.iter().enumerate() {
        assert_eq!(output.input.text, format!("메모 {}", i));
        assert!(output.error.is_none());
    }
}

#[tokio::test]
async fn test_fallback_classification_is_deterministic_end_to_end() {
    let pipeline = pipeline();
    let mut confidences = Vec::new();
    for _ in 0..3 {
        let output = pipeline
            .process_at(
                RawInput::new("결혼식 초대합니다", Source::Chat),
                reference_now(),
            )
            .await;
        assert_eq!(output.intent.label, IntentLabel::Social);
        assert!(output.intent.confidence >= 0.7);
        confidences.push(output.intent.confidence);
    }
    assert!(confidences.windows(2).all(|w| w[0] == w[1]));
}
