//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on domain ports.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::domain::PasteSlug;
use crate::domain::ports::{PasteCommand, PasteQuery, StorageProbe};

use super::request_time::TimeOverridePolicy;

/// Port implementations consumed by the handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub pastes: Arc<dyn PasteCommand>,
    pub paste_views: Arc<dyn PasteQuery>,
    pub storage: Arc<dyn StorageProbe>,
}

/// Public origin used to build paste links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBaseUrl(String);

impl PublicBaseUrl {
    /// Validate an absolute http(s) URL. Trailing slashes are dropped.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(url::ParseError::RelativeUrlWithoutBase);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Link to the HTML view of `slug`.
    pub fn paste_url(&self, slug: &PasteSlug) -> String {
        format!("{}/p/{}", self.0, slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub pastes: Arc<dyn PasteCommand>,
    pub paste_views: Arc<dyn PasteQuery>,
    pub storage: Arc<dyn StorageProbe>,
    pub base_url: PublicBaseUrl,
    pub time_override: TimeOverridePolicy,
}

impl HttpState {
    pub fn new(
        ports: HttpStatePorts,
        base_url: PublicBaseUrl,
        time_override: TimeOverridePolicy,
    ) -> Self {
        let HttpStatePorts {
            pastes,
            paste_views,
            storage,
        } = ports;
        Self {
            pastes,
            paste_views,
            storage,
            base_url,
            time_override,
        }
    }
}
