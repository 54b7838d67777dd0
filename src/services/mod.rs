//! Services module
//!
//! This module contains business logic services

pub mod invite_link;
pub mod registry;
pub mod telegram;
pub mod templates;

// Re-export commonly used services
pub use invite_link::{InviteLinkManager, Invalidation};
pub use registry::GroupPolicyRegistry;
pub use telegram::{TelegramGateway, TelegramBotAdapter};
pub use templates::{MessageTemplate, TemplateContext};

use std::sync::Arc;
use crate::middleware::AuthMiddleware;
use crate::state::InviteLinkStore;

/// Service factory shared by every handler
#[derive(Clone)]
pub struct ServiceFactory {
    pub registry: Arc<GroupPolicyRegistry>,
    pub invite_links: Arc<InviteLinkManager>,
    pub telegram: Arc<dyn TelegramGateway>,
}

impl ServiceFactory {
    /// Wire the services together
    pub fn new(
        registry: GroupPolicyRegistry,
        store: InviteLinkStore,
        telegram: Arc<dyn TelegramGateway>,
    ) -> Self {
        let invite_links = InviteLinkManager::new(Arc::new(store), telegram.clone());

        Self {
            registry: Arc::new(registry),
            invite_links: Arc::new(invite_links),
            telegram,
        }
    }

    /// Get authentication middleware
    pub fn auth_middleware(&self) -> AuthMiddleware {
        AuthMiddleware::new(self.telegram.clone())
    }
}
