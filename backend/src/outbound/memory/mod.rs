//! In-memory paste storage.
//!
//! Pastes live in a mutex-guarded map and vanish with the process. The gate
//! check and the view increment share one critical section, which makes
//! [`PasteRepository::record_view`] atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::access_gate::{self, AccessDecision};
use crate::domain::ports::{
    PasteRepository, PasteRepositoryError, StorageProbe, StorageProbeError,
};
use crate::domain::{NewPaste, Paste, PasteSlug};

/// Process-local implementation of [`PasteRepository`].
#[derive(Debug, Default)]
pub struct InMemoryPasteRepository {
    pastes: Mutex<HashMap<PasteSlug, Paste>>,
}

impl InMemoryPasteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pastes, including unavailable ones not yet removed.
    pub fn len(&self) -> Result<usize, PasteRepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PasteRepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PasteSlug, Paste>>, PasteRepositoryError> {
        self.pastes
            .lock()
            .map_err(|_| PasteRepositoryError::connection("in-memory paste store is poisoned"))
    }
}

#[async_trait]
impl PasteRepository for InMemoryPasteRepository {
    async fn insert(&self, paste: &NewPaste) -> Result<Paste, PasteRepositoryError> {
        let mut pastes = self.lock()?;
        if pastes.contains_key(&paste.slug) {
            return Err(PasteRepositoryError::duplicate_slug(paste.slug.as_str()));
        }
        let stored = paste.clone().into_paste();
        pastes.insert(stored.slug.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_slug(
        &self,
        slug: &PasteSlug,
    ) -> Result<Option<Paste>, PasteRepositoryError> {
        Ok(self.lock()?.get(slug).cloned())
    }

    async fn record_view(
        &self,
        slug: &PasteSlug,
        now: DateTime<Utc>,
    ) -> Result<Option<Paste>, PasteRepositoryError> {
        let mut pastes = self.lock()?;
        let Some(paste) = pastes.get_mut(slug) else {
            return Ok(None);
        };
        if access_gate::evaluate(paste, now) != AccessDecision::Servable {
            return Ok(None);
        }
        paste.view_count = paste.view_count.saturating_add(1);
        Ok(Some(paste.clone()))
    }

    async fn delete(&self, slug: &PasteSlug) -> Result<bool, PasteRepositoryError> {
        Ok(self.lock()?.remove(slug).is_some())
    }

    async fn purge_unavailable(&self, now: DateTime<Utc>) -> Result<u64, PasteRepositoryError> {
        let mut pastes = self.lock()?;
        let before = pastes.len();
        pastes.retain(|_, paste| access_gate::evaluate(paste, now) == AccessDecision::Servable);
        Ok(u64::try_from(before - pastes.len()).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl StorageProbe for InMemoryPasteRepository {
    async fn check(&self) -> Result<(), StorageProbeError> {
        self.lock()
            .map(|_| ())
            .map_err(|error| StorageProbeError::unreachable(error.to_string()))
    }
}
