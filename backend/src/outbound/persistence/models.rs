//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::pastes;

/// Row read from the `pastes` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pastes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PasteRow {
    pub slug: String,
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<i32>,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Values written when creating a paste; `view_count` takes its default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pastes)]
pub(crate) struct NewPasteRow<'a> {
    pub slug: &'a str,
    pub content: &'a str,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<i32>,
    pub created_at: DateTime<Utc>,
}
