//! Per-category action handlers.
//!
//! Defines the `CategoryHandler` async trait and the registry that
//! dispatches an action to the handler for its category. Handlers resolve
//! their required entities from the action's entity list and fail fast
//! with a descriptive error when one is absent.

pub mod calendar;
pub mod communication;
pub mod navigation;
pub mod notification;
pub mod payment;
pub mod shopping;
pub mod task;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use volition_extract::{Entity, EntityType};
use volition_suggest::{Action, ActionCategory};

use crate::error::ExecError;
use crate::sinks::{CalendarSink, DeepLinkLauncher, NotificationSink};

pub use calendar::CalendarHandler;
pub use communication::CommunicationHandler;
pub use navigation::NavigationHandler;
pub use notification::NotificationHandler;
pub use payment::PaymentHandler;
pub use shopping::ShoppingHandler;
pub use task::TaskHandler;

/// Executes one action category's real-world side effect.
#[async_trait]
pub trait CategoryHandler: Send + Sync {
    fn category(&self) -> ActionCategory;

    /// Perform the side effect; returns handler-specific result data.
    async fn execute(&self, action: &Action) -> Result<serde_json::Value, ExecError>;
}

/// Resolve a required entity from the action's entity list.
pub(crate) fn require_entity<'a>(
    action: &'a Action,
    entity_type: EntityType,
    name: &'static str,
) -> Result<&'a Entity, ExecError> {
    action
        .entities
        .iter()
        .find(|e| e.entity_type == entity_type)
        .ok_or(ExecError::MissingEntity {
            category: action.category(),
            entity: name,
        })
}

/// Registry mapping categories to handler implementations.
pub struct HandlerRegistry {
    handlers: HashMap<ActionCategory, Arc<dyn CategoryHandler>>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with all seven category handlers wired to the given
    /// collaborators.
    pub fn with_defaults(
        calendar: Arc<dyn CalendarSink>,
        notifications: Arc<dyn NotificationSink>,
        launcher: Arc<dyn DeepLinkLauncher>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CalendarHandler::new(calendar)));
        registry.register(Arc::new(PaymentHandler::new(Arc::clone(&launcher))));
        registry.register(Arc::new(ShoppingHandler::new(Arc::clone(&launcher))));
        registry.register(Arc::new(TaskHandler));
        registry.register(Arc::new(NavigationHandler::new(Arc::clone(&launcher))));
        registry.register(Arc::new(CommunicationHandler::new(launcher)));
        registry.register(Arc::new(NotificationHandler::new(notifications)));
        registry
    }

    /// Register a handler under its own category, replacing any previous
    /// registration.
    pub fn register(&mut self, handler: Arc<dyn CategoryHandler>) {
        self.handlers.insert(handler.category(), handler);
    }

    pub fn get(&self, category: ActionCategory) -> Option<Arc<dyn CategoryHandler>> {
        self.handlers.get(&category).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
