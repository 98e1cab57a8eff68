//! Payment action handler.
//!
//! Constructs a transfer deep link and hands it to the launcher
//! collaborator. Requires an amount entity on the action.

use std::sync::Arc;

use async_trait::async_trait;
use volition_extract::EntityType;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::{require_entity, CategoryHandler};
use crate::sinks::DeepLinkLauncher;

pub struct PaymentHandler {
    launcher: Arc<dyn DeepLinkLauncher>,
}

impl PaymentHandler {
    pub fn new(launcher: Arc<dyn DeepLinkLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl CategoryHandler for PaymentHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Payment
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        require_entity(action, EntityType::Amount, "amount")?;

        let ActionDetail::Payment {
            recipient,
            amount,
            currency,
            deep_link,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "payment handler received a non-payment action".to_string(),
            ));
        };

        let link = deep_link.clone().unwrap_or_else(|| {
            format!(
                "payapp://transfer?recipient={}&amount={}&currency={}",
                recipient, amount, currency
            )
        });

        self.launcher
            .launch(&link)
            .await
            .map_err(ExecError::HandlerFailed)?;

        Ok(serde_json::json!({
            "deep_link": link,
            "recipient": recipient,
            "amount": amount,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::LogDeepLinkLauncher;
    use volition_extract::Entity;

    fn payment_action(entities: Vec<Entity>, deep_link: Option<String>) -> Action {
        Action::new(
            "축의금",
            "축의금 10만 원",
            3,
            entities,
            ActionDetail::Payment {
                recipient: "민수".to_string(),
                amount: 100_000,
                currency: "KRW".to_string(),
                memo: None,
                deep_link,
            },
        )
    }

    fn amount_entity() -> Entity {
        Entity::new(EntityType::Amount, "10만 원", "100000", 0.9)
    }

    #[tokio::test]
    async fn test_execute_constructs_deep_link() {
        let handler = PaymentHandler::new(Arc::new(LogDeepLinkLauncher));
        let action = payment_action(vec![amount_entity()], None);

        let data = handler.execute(&action).await.unwrap();
        let link = data["deep_link"].as_str().unwrap();
        assert!(link.starts_with("payapp://transfer?"));
        assert!(link.contains("amount=100000"));
        assert!(link.contains("currency=KRW"));
    }

    #[tokio::test]
    async fn test_execute_prefers_provided_deep_link() {
        let handler = PaymentHandler::new(Arc::new(LogDeepLinkLauncher));
        let action = payment_action(
            vec![amount_entity()],
            Some("payapp://transfer?preset=1".to_string()),
        );

        let data = handler.execute(&action).await.unwrap();
        assert_eq!(data["deep_link"], "payapp://transfer?preset=1");
    }

    #[tokio::test]
    async fn test_execute_without_amount_entity_fails_fast() {
        let handler = PaymentHandler::new(Arc::new(LogDeepLinkLauncher));
        let action = payment_action(vec![], None);

        let err = handler.execute(&action).await.unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_category() {
        let handler = PaymentHandler::new(Arc::new(LogDeepLinkLauncher));
        assert_eq!(handler.category(), ActionCategory::Payment);
    }
}
