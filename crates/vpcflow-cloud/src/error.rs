//! Cloud client error types

use crate::client::{LifecycleState, ResourceKind};
use thiserror::Error;

/// Errors surfaced by a resource client or the state waiter.
///
/// Provider failures are classified by kind rather than by message text,
/// so callers match on the variant instead of grepping error strings.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}", code = .code.as_deref().unwrap_or("unclassified"))]
    Api {
        code: Option<String>,
        message: String,
    },

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error(
        "Timed out waiting for {kind} {resource_id} to become {target} after {attempts} attempts (last observed state: {last_state})"
    )]
    Timeout {
        kind: ResourceKind,
        resource_id: String,
        target: LifecycleState,
        last_state: LifecycleState,
        attempts: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// True for the waiter's bounded-polling timeout, which callers may
    /// handle by re-polling the returned resource id themselves.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CloudError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
