//! PostgreSQL-backed `PasteRepository` using Diesel.
//!
//! `record_view` is a single conditional `UPDATE ... RETURNING`, so the gate
//! check and the increment cannot interleave with another reader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    PasteRepository, PasteRepositoryError, StorageProbe, StorageProbeError,
};
use crate::domain::{NewPaste, Paste, PasteSlug, ViewLimit};

use super::error_mapping::{map_diesel_error, map_insert_error, map_pool_error, probe_failure};
use super::models::{NewPasteRow, PasteRow};
use super::pool::DbPool;
use super::schema::pastes;

/// Diesel implementation of [`PasteRepository`] and [`StorageProbe`].
#[derive(Clone)]
pub struct DieselPasteRepository {
    pool: DbPool,
}

impl DieselPasteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_paste(row: PasteRow) -> Result<Paste, PasteRepositoryError> {
    let slug = PasteSlug::new(row.slug)
        .map_err(|err| PasteRepositoryError::query(format!("stored slug is invalid: {err}")))?;
    let max_views = row
        .max_views
        .map(|limit| ViewLimit::from_count(i64::from(limit)))
        .transpose()
        .map_err(|err| PasteRepositoryError::query(format!("stored view limit is invalid: {err}")))?;
    let view_count = u32::try_from(row.view_count)
        .map_err(|_| PasteRepositoryError::query("stored view count is negative"))?;

    Ok(Paste {
        slug,
        content: row.content,
        expires_at: row.expires_at,
        max_views,
        view_count,
        created_at: row.created_at,
    })
}

fn limit_to_column(limit: ViewLimit) -> Result<i32, PasteRepositoryError> {
    i32::try_from(limit.get())
        .map_err(|_| PasteRepositoryError::query("view limit exceeds column range"))
}

#[async_trait]
impl PasteRepository for DieselPasteRepository {
    async fn insert(&self, paste: &NewPaste) -> Result<Paste, PasteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPasteRow {
            slug: paste.slug.as_str(),
            content: paste.content.as_str(),
            expires_at: paste.expires_at,
            max_views: paste.max_views.map(limit_to_column).transpose()?,
            created_at: paste.created_at,
        };

        let inserted: PasteRow = diesel::insert_into(pastes::table)
            .values(&row)
            .returning(PasteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, paste.slug.as_str()))?;

        row_to_paste(inserted)
    }

    async fn find_by_slug(
        &self,
        slug: &PasteSlug,
    ) -> Result<Option<Paste>, PasteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PasteRow> = pastes::table
            .find(slug.as_str())
            .select(PasteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_paste).transpose()
    }

    async fn record_view(
        &self,
        slug: &PasteSlug,
        now: DateTime<Utc>,
    ) -> Result<Option<Paste>, PasteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PasteRow> = diesel::update(pastes::table)
            .filter(pastes::slug.eq(slug.as_str()))
            .filter(pastes::expires_at.is_null().or(pastes::expires_at.ge(now)))
            .filter(
                pastes::max_views
                    .is_null()
                    .or(pastes::view_count.nullable().lt(pastes::max_views)),
            )
            .set(pastes::view_count.eq(pastes::view_count + 1))
            .returning(PasteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_paste).transpose()
    }

    async fn delete(&self, slug: &PasteSlug) -> Result<bool, PasteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(pastes::table.find(slug.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn purge_unavailable(&self, now: DateTime<Utc>) -> Result<u64, PasteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            pastes::table.filter(
                pastes::expires_at
                    .lt(now)
                    .or(pastes::view_count.nullable().ge(pastes::max_views)),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl StorageProbe for DieselPasteRepository {
    async fn check(&self) -> Result<(), StorageProbeError> {
        let mut conn = self.pool.get().await.map_err(probe_failure)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(probe_failure)?;
        Ok(())
    }
}
