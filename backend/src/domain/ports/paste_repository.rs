//! Port for paste persistence.
//!
//! Adapters must make [`PasteRepository::record_view`] atomic: the
//! servability check and the counter increment happen as one step so that
//! concurrent readers can never push a paste past its view limit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPaste, Paste, PasteSlug};

use super::define_port_error;

define_port_error! {
    /// Errors raised by paste repository adapters.
    pub enum PasteRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "paste repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "paste repository query failed: {message}",
        /// A paste already uses this slug.
        DuplicateSlug { slug: String } =>
            "paste slug already in use: {slug}",
    }
}

/// Storage for pastes keyed by slug.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasteRepository: Send + Sync {
    /// Insert a new paste with a view count of zero.
    ///
    /// Fails with [`PasteRepositoryError::DuplicateSlug`] when the slug is
    /// taken.
    async fn insert(&self, paste: &NewPaste) -> Result<Paste, PasteRepositoryError>;

    /// Fetch a paste without counting a view.
    async fn find_by_slug(
        &self,
        slug: &PasteSlug,
    ) -> Result<Option<Paste>, PasteRepositoryError>;

    /// Count one view if the paste is servable at `now`.
    ///
    /// Returns the paste as it reads after the increment, or `None` when it
    /// is missing, expired, or exhausted.
    async fn record_view(
        &self,
        slug: &PasteSlug,
        now: DateTime<Utc>,
    ) -> Result<Option<Paste>, PasteRepositoryError>;

    /// Remove a paste. Returns whether a row was deleted.
    async fn delete(&self, slug: &PasteSlug) -> Result<bool, PasteRepositoryError>;

    /// Remove every paste that is expired or exhausted at `now`.
    async fn purge_unavailable(&self, now: DateTime<Utc>) -> Result<u64, PasteRepositoryError>;
}
