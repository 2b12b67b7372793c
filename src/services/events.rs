//! Service Events
//!
//! Outcomes of backend calls, emitted by page controllers and drained into
//! the notice (toast) state.

use std::sync::Arc;

use crate::domain::EntityId;

/// What a controller was doing when a call failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceAction {
    Load,
    Create,
    Update,
    Delete,
    Upload,
    SignIn,
    SignOut,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Load => "load",
            ServiceAction::Create => "create",
            ServiceAction::Update => "update",
            ServiceAction::Delete => "delete",
            ServiceAction::Upload => "upload",
            ServiceAction::SignIn => "sign-in",
            ServiceAction::SignOut => "sign-out",
        }
    }
}

/// Events emitted by the service layer
#[derive(Clone, Debug)]
pub enum ServiceEvent {
    // ==================== Collections ====================
    /// A collection finished loading
    Loaded {
        entity: &'static str,
        count: usize,
    },

    /// A record was created or updated
    Saved {
        entity: &'static str,
        id: EntityId,
        created: bool,
    },

    /// One or more records were deleted
    Deleted {
        entity: &'static str,
        ids: Vec<EntityId>,
    },

    // ==================== Storage ====================
    /// A product image was stored and linked
    ImageUploaded { product: EntityId, url: Arc<str> },

    // ==================== Session ====================
    /// Signed in (`Some(email)`) or signed out (`None`)
    SessionChanged { email: Option<Arc<str>> },

    // ==================== Failures ====================
    /// A backend call failed; the message is shown as-is
    Failed {
        entity: &'static str,
        action: ServiceAction,
        message: Arc<str>,
    },
}

impl ServiceEvent {
    pub fn failed(entity: &'static str, action: ServiceAction, error: &crate::error::Error) -> Self {
        ServiceEvent::Failed {
            entity,
            action,
            message: error.to_string().into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ServiceEvent::Failed { .. })
    }
}
