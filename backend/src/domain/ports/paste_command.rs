//! Driving port for creating pastes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, PasteSlug};

/// Raw creation input; values are validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePasteRequest {
    pub content: String,
    pub ttl_seconds: Option<i64>,
    pub max_views: Option<i64>,
    /// Overrides the service clock, used for deterministic testing.
    pub at: Option<DateTime<Utc>>,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePasteResponse {
    pub slug: PasteSlug,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Creates pastes.
///
/// Validation failures surface as
/// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
/// whose message names the offending field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasteCommand: Send + Sync {
    async fn create_paste(&self, request: CreatePasteRequest) -> Result<CreatePasteResponse, Error>;
}
