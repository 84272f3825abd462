//! Per-request clock override for deterministic testing.
//!
//! When the server runs in test mode, `x-test-now-ms` (milliseconds since
//! the Unix epoch) replaces the wall clock for expiry decisions. Outside
//! test mode, or when the value cannot be parsed, the header is ignored.

use futures_util::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::state::HttpState;

/// Header carrying the overriding instant.
pub const TEST_NOW_HEADER: &str = "x-test-now-ms";

/// Whether handlers honour [`TEST_NOW_HEADER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeOverridePolicy {
    #[default]
    Ignore,
    Honour,
}

impl TimeOverridePolicy {
    /// `Honour` in test mode, `Ignore` otherwise.
    pub const fn from_test_mode(test_mode: bool) -> Self {
        if test_mode { Self::Honour } else { Self::Ignore }
    }
}

/// Instant requested by the caller, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTime(Option<DateTime<Utc>>);

impl RequestTime {
    pub const fn into_inner(self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Resolve the override carried by `req` under `policy`.
    pub fn resolve(req: &HttpRequest, policy: TimeOverridePolicy) -> Self {
        if policy == TimeOverridePolicy::Ignore {
            return Self(None);
        }
        let raw = req
            .headers()
            .get(TEST_NOW_HEADER)
            .and_then(|value| value.to_str().ok());
        let parsed = raw.and_then(parse_millis);
        if raw.is_some() && parsed.is_none() {
            debug!(value = ?raw, "ignoring unparsable {TEST_NOW_HEADER} header");
        }
        Self(parsed)
    }
}

fn parse_millis(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let millis = trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    })?;
    DateTime::from_timestamp_millis(millis)
}

impl FromRequest for RequestTime {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let policy = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.time_override)
            .unwrap_or_default();
        ready(Ok(Self::resolve(req, policy)))
    }
}
