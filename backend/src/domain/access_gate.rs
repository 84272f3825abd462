//! Decides whether a stored paste may still be served.
//!
//! A paste expires once `now` is strictly after its expiry instant and is
//! exhausted once its view count reaches the limit. Expiry is checked first.

use chrono::{DateTime, Utc};

use super::Paste;

/// Outcome of evaluating a paste at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Servable,
    Expired,
    ViewLimitReached,
}

impl AccessDecision {
    /// Denial reported to readers, `None` when the paste is servable.
    pub const fn denial(self) -> Option<AccessDenial> {
        match self {
            Self::Servable => None,
            Self::Expired => Some(AccessDenial::Expired),
            Self::ViewLimitReached => Some(AccessDenial::ViewLimitExceeded),
        }
    }
}

/// Why a read was refused. All denials surface as "not found" to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    NotFound,
    Expired,
    ViewLimitExceeded,
}

impl AccessDenial {
    /// Message used by the JSON API.
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::Expired => "expired",
            Self::ViewLimitExceeded => "view limit exceeded",
        }
    }

    /// Plain-text body used by the HTML view.
    pub const fn page_message(self) -> &'static str {
        match self {
            Self::NotFound => "Not Found",
            Self::Expired => "Expired",
            Self::ViewLimitExceeded => "View Limit Reached",
        }
    }
}

/// Evaluate `paste` at `now` without touching storage.
pub fn evaluate(paste: &Paste, now: DateTime<Utc>) -> AccessDecision {
    if paste.expires_at.is_some_and(|expires_at| now > expires_at) {
        return AccessDecision::Expired;
    }
    if paste
        .max_views
        .is_some_and(|limit| paste.view_count >= limit.get())
    {
        return AccessDecision::ViewLimitReached;
    }
    AccessDecision::Servable
}
