//! Driving port for reading pastes.
//!
//! Every granted read consumes one view. Denials are ordinary outcomes, not
//! errors, so adapters can render them in their own vocabulary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessDenial, Error, Paste, PasteSlug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPasteRequest {
    pub slug: PasteSlug,
    /// Overrides the service clock, used for deterministic testing.
    pub at: Option<DateTime<Utc>>,
}

/// What a reader sees after a granted read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteView {
    pub content: String,
    /// Reads left after this one, `None` when unlimited.
    pub remaining_views: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Paste> for PasteView {
    fn from(paste: Paste) -> Self {
        Self {
            remaining_views: paste.remaining_views(),
            content: paste.content,
            expires_at: paste.expires_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPasteResponse {
    Granted(PasteView),
    Denied(AccessDenial),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasteQuery: Send + Sync {
    async fn view_paste(&self, request: ViewPasteRequest) -> Result<ViewPasteResponse, Error>;
}
