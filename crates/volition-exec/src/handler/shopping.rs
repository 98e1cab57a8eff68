//! Shopping action handler.
//!
//! Records a wishlist entry and opens the product page when a URL is
//! known. No required entity.

use std::sync::Arc;

use async_trait::async_trait;
use volition_suggest::{Action, ActionCategory, ActionDetail};

use crate::error::ExecError;
use crate::handler::CategoryHandler;
use crate::sinks::DeepLinkLauncher;

pub struct ShoppingHandler {
    launcher: Arc<dyn DeepLinkLauncher>,
}

impl ShoppingHandler {
    pub fn new(launcher: Arc<dyn DeepLinkLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl CategoryHandler for ShoppingHandler {
    fn category(&self) -> ActionCategory {
        ActionCategory::Shopping
    }

    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError> {
        let ActionDetail::Shopping {
            product_name,
            price,
            product_url,
            ..
        } = &action.detail
        else {
            return Err(ExecError::HandlerFailed(
                "shopping handler received a non-shopping action".to_string(),
            ));
        };

        if let Some(url) = product_url {
            self.launcher
                .launch(url)
                .await
                .map_err(ExecError::HandlerFailed)?;
        }

        tracing::info!(product = %product_name, price, "Wishlist entry recorded");

        Ok(serde_json::json!({
            "product_name": product_name,
            "price": price,
            "wishlisted": true,
        }))
    }
}
