//! Paste use cases: creation with slug retry and gated, counted reads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::access_gate::{self, AccessDenial};
use crate::domain::ports::{
    CreatePasteRequest, CreatePasteResponse, PasteCommand, PasteQuery, PasteRepository,
    PasteRepositoryError, PasteView, ViewPasteRequest, ViewPasteResponse,
};
use crate::domain::{
    Error, NewPaste, Paste, PasteContent, PasteValidationError, SlugGenerator, Ttl, ViewLimit,
};

/// Inserts attempted before slug allocation gives up.
pub const SLUG_INSERT_ATTEMPTS: u32 = 5;

/// Implements [`PasteCommand`] and [`PasteQuery`] over a repository.
#[derive(Clone)]
pub struct PasteService<R> {
    repo: Arc<R>,
    slugs: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R> PasteService<R> {
    pub fn new(repo: Arc<R>, slugs: Arc<dyn SlugGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, slugs, clock }
    }

    fn now(&self, at: Option<DateTime<Utc>>) -> DateTime<Utc> {
        at.unwrap_or_else(|| self.clock.utc())
    }
}

fn invalid(error: PasteValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

pub(crate) fn map_repository_error(error: PasteRepositoryError) -> Error {
    error!(error = %error, "paste storage failed");
    match error {
        PasteRepositoryError::Connection { message } => {
            Error::internal(format!("paste storage unavailable: {message}"))
        }
        PasteRepositoryError::Query { message } => {
            Error::internal(format!("paste storage error: {message}"))
        }
        PasteRepositoryError::DuplicateSlug { slug } => {
            Error::internal(format!("unexpected slug conflict: {slug}"))
        }
    }
}

type ValidatedFields = (PasteContent, Option<DateTime<Utc>>, Option<ViewLimit>);

/// Checks content, then `ttl_seconds`, then `max_views`.
fn validate(
    request: CreatePasteRequest,
    now: DateTime<Utc>,
) -> Result<ValidatedFields, PasteValidationError> {
    let content = PasteContent::new(request.content)?;
    let expires_at = request
        .ttl_seconds
        .map(|seconds| Ttl::from_seconds(seconds)?.expiry_from(now))
        .transpose()?;
    let max_views = request.max_views.map(ViewLimit::from_count).transpose()?;
    Ok((content, expires_at, max_views))
}

impl<R> PasteService<R>
where
    R: PasteRepository,
{
    /// Delete a paste that failed the gate and report why.
    async fn deny(&self, paste: &Paste, denial: AccessDenial) -> Result<AccessDenial, Error> {
        self.repo
            .delete(&paste.slug)
            .await
            .map_err(map_repository_error)?;
        debug!(slug = %paste.slug, reason = denial.message(), "removed unavailable paste");
        Ok(denial)
    }

    /// Explain a rejected view increment by re-reading the paste.
    async fn explain_rejected_view(
        &self,
        request: &ViewPasteRequest,
        now: DateTime<Utc>,
    ) -> Result<ViewPasteResponse, Error> {
        let current = self
            .repo
            .find_by_slug(&request.slug)
            .await
            .map_err(map_repository_error)?;
        let Some(paste) = current else {
            return Ok(ViewPasteResponse::Denied(AccessDenial::NotFound));
        };
        match access_gate::evaluate(&paste, now).denial() {
            Some(denial) => Ok(ViewPasteResponse::Denied(self.deny(&paste, denial).await?)),
            None => Err(Error::internal(format!(
                "view of servable paste {} was rejected by storage",
                paste.slug
            ))),
        }
    }
}

#[async_trait]
impl<R> PasteCommand for PasteService<R>
where
    R: PasteRepository,
{
    async fn create_paste(
        &self,
        request: CreatePasteRequest,
    ) -> Result<CreatePasteResponse, Error> {
        let now = self.now(request.at);
        let (content, expires_at, max_views) = validate(request, now).map_err(invalid)?;
        let mut new_paste = NewPaste {
            slug: self.slugs.generate(),
            content,
            expires_at,
            max_views,
            created_at: now,
        };

        for attempt in 1..=SLUG_INSERT_ATTEMPTS {
            match self.repo.insert(&new_paste).await {
                Ok(paste) => {
                    info!(
                        slug = %paste.slug,
                        expires_at = ?paste.expires_at,
                        max_views = ?paste.max_views.map(ViewLimit::get),
                        "paste created"
                    );
                    return Ok(CreatePasteResponse {
                        slug: paste.slug,
                        expires_at: paste.expires_at,
                    });
                }
                Err(PasteRepositoryError::DuplicateSlug { slug }) => {
                    warn!(%slug, attempt, "slug collision, regenerating");
                    new_paste.slug = self.slugs.generate();
                }
                Err(other) => return Err(map_repository_error(other)),
            }
        }

        error!(attempts = SLUG_INSERT_ATTEMPTS, "could not allocate a unique slug");
        Err(Error::internal(format!(
            "could not allocate a unique slug after {SLUG_INSERT_ATTEMPTS} attempts"
        )))
    }
}

#[async_trait]
impl<R> PasteQuery for PasteService<R>
where
    R: PasteRepository,
{
    async fn view_paste(&self, request: ViewPasteRequest) -> Result<ViewPasteResponse, Error> {
        let now = self.now(request.at);
        let stored = self
            .repo
            .find_by_slug(&request.slug)
            .await
            .map_err(map_repository_error)?;
        let Some(paste) = stored else {
            return Ok(ViewPasteResponse::Denied(AccessDenial::NotFound));
        };
        if let Some(denial) = access_gate::evaluate(&paste, now).denial() {
            return Ok(ViewPasteResponse::Denied(self.deny(&paste, denial).await?));
        }

        match self
            .repo
            .record_view(&request.slug, now)
            .await
            .map_err(map_repository_error)?
        {
            Some(viewed) => Ok(ViewPasteResponse::Granted(PasteView::from(viewed))),
            // Another reader crossed a boundary between the read and the increment.
            None => self.explain_rejected_view(&request, now).await,
        }
    }
}

#[cfg(test)]
#[path = "paste_service_tests.rs"]
mod tests;
