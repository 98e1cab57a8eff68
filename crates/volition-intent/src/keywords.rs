//! Deterministic keyword-scoring fallback classifier.
//!
//! Scores each candidate label by counting keyword hits from a per-label
//! table, then normalizes counts into [0, 1]:
//!
//! - winning label: `min(0.5 + hits * 0.1, 0.95)`
//! - zero hits anywhere: label `other`, confidence 0.3
//! - alternatives (up to two): `min(0.3 + hits * 0.1, 0.8)`
//!
//! Ties break to the first label in table order, so classification is fully
//! deterministic for identical text.

use crate::types::{Alternative, IntentLabel, IntentResult};

/// Per-label keyword table, in canonical tie-break order.
pub const LABEL_KEYWORDS: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Calendar,
        &[
            "회의", "미팅", "약속", "일정", "예약", "스케줄", "모임", "회식", "meeting",
            "schedule", "appointment",
        ],
    ),
    (
        IntentLabel::Shopping,
        &[
            "구매", "쇼핑", "세일", "할인", "주문", "배송", "장바구니", "사고 싶", "품절",
            "buy", "sale", "order", "wishlist",
        ],
    ),
    (
        IntentLabel::Work,
        &[
            "업무", "보고서", "마감", "프로젝트", "출장", "제출", "결재", "야근", "deadline",
            "report", "project",
        ],
    ),
    (
        IntentLabel::Social,
        &[
            "결혼", "결혼식", "청첩장", "초대", "돌잔치", "장례식", "생일", "파티", "집들이",
            "송별회", "축의금", "wedding", "invite", "party", "funeral",
        ],
    ),
    (
        IntentLabel::Payment,
        &[
            "송금", "이체", "결제", "입금", "계좌", "청구", "납부", "환불", "pay", "transfer",
            "remit",
        ],
    ),
];

const WINNER_BASE: f32 = 0.5;
const WINNER_CAP: f32 = 0.95;
const ALTERNATIVE_BASE: f32 = 0.3;
const ALTERNATIVE_CAP: f32 = 0.8;
const PER_HIT: f32 = 0.1;
const MAX_ALTERNATIVES: usize = 2;

/// Keyword-table fallback classifier. Stateless and deterministic.
#[derive(Debug, Default, Clone)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Count keyword hits per label, in table order.
    pub fn hits(&self, text: &str) -> Vec<(IntentLabel, usize)> {
        let lowered = text.to_lowercase();
        LABEL_KEYWORDS
            .iter()
            .map(|(label, keywords)| {
                let count = keywords.iter().filter(|k| lowered.contains(**k)).count();
                (*label, count)
            })
            .collect()
    }

    /// Classify text by keyword hits alone.
    pub fn classify(&self, text: &str) -> IntentResult {
        let hits = self.hits(text);

        // Strictly-greater comparison: the first label encountered wins ties.
        let mut best: Option<(IntentLabel, usize)> = None;
        for &(label, count) in &hits {
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((label, count));
            }
        }
        let Some((winner, winner_hits)) = best else {
            tracing::debug!("No keyword hits; returning baseline intent");
            return IntentResult::baseline();
        };

        let confidence = (WINNER_BASE + winner_hits as f32 * PER_HIT).min(WINNER_CAP);

        let mut runners: Vec<(IntentLabel, usize)> = hits
            .iter()
            .filter(|(label, count)| *label != winner && *count > 0)
            .copied()
            .collect();
        runners.sort_by(|a, b| b.1.cmp(&a.1));
        let alternatives = runners
            .into_iter()
            .take(MAX_ALTERNATIVES)
            .map(|(label, count)| Alternative {
                label,
                confidence: (ALTERNATIVE_BASE + count as f32 * PER_HIT).min(ALTERNATIVE_CAP),
            })
            .collect();

        tracing::debug!(label = %winner, hits = winner_hits, confidence, "Keyword fallback classified");

        IntentResult {
            label: winner,
            confidence,
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kc() -> KeywordClassifier {
        KeywordClassifier::new()
    }

    #[test]
    fn test_wedding_invitation_is_social() {
        // 결혼, 결혼식, 초대 all hit: 0.5 + 3 * 0.1 = 0.8
        let result = kc().classify("결혼식 초대합니다");
        assert_eq!(result.label, IntentLabel::Social);
        assert!(result.confidence >= 0.7);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let a = kc().classify("결혼식 초대합니다");
        let b = kc().classify("결혼식 초대합니다");
        assert_eq!(a.label, b.label);
        assert!((a.confidence - b.confidence).abs() < f32::EPSILON);
        assert_eq!(a.alternatives.len(), b.alternatives.len());
    }

    #[test]
    fn test_zero_hits_is_baseline_other() {
        let result = kc().classify("그냥 날씨가 좋다");
        assert_eq!(result.label, IntentLabel::Other);
        assert!((result.confidence - 0.3).abs() < f32::EPSILON);
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_empty_text_is_baseline() {
        let result = kc().classify("");
        assert_eq!(result.label, IntentLabel::Other);
        assert!(result.confidence <= 0.3);
    }

    #[test]
    fn test_single_hit_confidence() {
        // exactly one keyword: 0.5 + 0.1 = 0.6
        let result = kc().classify("송금 부탁해");
        assert_eq!(result.label, IntentLabel::Payment);
        assert!((result.confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_confidence_capped() {
        // Pile on social keywords; confidence must not exceed 0.95.
        let text = "결혼 결혼식 청첩장 초대 돌잔치 장례식 생일 파티 집들이 송별회";
        let result = kc().classify(text);
        assert_eq!(result.label, IntentLabel::Social);
        assert!(result.confidence <= 0.95);
        assert!((result.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_tie_breaks_to_first_label_in_table_order() {
        // One calendar keyword and one payment keyword: calendar is listed
        // first in the table, so it wins the tie.
        let result = kc().classify("회의 끝나고 송금할게");
        assert_eq!(result.label, IntentLabel::Calendar);
    }

    #[test]
    fn test_alternatives_ranked_and_capped_at_two() {
        // social 2 hits (결혼, 결혼식), calendar 1 (회의), payment 1 (송금),
        // work 1 (마감): winner social, two alternatives kept.
        let result = kc().classify("결혼식 끝나고 회의, 송금도 하고 마감도 챙겨");
        assert_eq!(result.label, IntentLabel::Social);
        assert_eq!(result.alternatives.len(), 2);
        for alt in &result.alternatives {
            assert!(alt.confidence <= 0.8);
            assert!(alt.confidence >= 0.3);
        }
    }

    #[test]
    fn test_alternative_confidence_formula() {
        // calendar: 회의 + 미팅 = 2 hits wins; payment: 송금 = 1 hit alt.
        let result = kc().classify("회의 미팅 후에 송금");
        assert_eq!(result.label, IntentLabel::Calendar);
        assert_eq!(result.alternatives.len(), 1);
        let alt = result.alternatives[0];
        assert_eq!(alt.label, IntentLabel::Payment);
        assert!((alt.confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_english_keywords_case_insensitive() {
        let result = kc().classify("Wedding Invitation for you");
        assert_eq!(result.label, IntentLabel::Social);
    }

    #[test]
    fn test_hits_table_order_matches_label_table() {
        let hits = kc().hits("아무 내용");
        let labels: Vec<IntentLabel> = hits.iter().map(|(l, _)| *l).collect();
        let expected: Vec<IntentLabel> = LABEL_KEYWORDS.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_all_winner_confidences_in_range() {
        for text in ["회의", "구매 할인", "보고서 마감 제출", "결혼식", "이체"] {
            let r = kc().classify(text);
            assert!(r.confidence >= 0.0 && r.confidence <= 1.0, "text: {}", text);
        }
    }
}
