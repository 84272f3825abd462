//! JSON API for creating and reading pastes.
//!
//! ```text
//! POST /api/pastes       {"content":"hello","max_views":1}
//! GET  /api/pastes/{id}  {"content":"hello","remaining_views":0,"expires_at":null}
//! ```

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{CreatePasteRequest, PasteView, ViewPasteRequest, ViewPasteResponse};
use crate::domain::{AccessDenial, Error, PasteSlug};

use super::ApiResult;
use super::error::ErrorBody;
use super::request_time::RequestTime;
use super::state::HttpState;
use super::validation::{FieldName, optional_integer, required_string};

const CONTENT_FIELD: FieldName = FieldName::new("content");
const TTL_FIELD: FieldName = FieldName::new("ttl_seconds");
const MAX_VIEWS_FIELD: FieldName = FieldName::new("max_views");

/// Creation body. Fields stay untyped until validated.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePasteBody {
    #[schema(value_type = String, example = "hello")]
    pub content: Option<Value>,
    #[schema(value_type = Option<i64>, minimum = 1, example = 60)]
    pub ttl_seconds: Option<Value>,
    #[schema(value_type = Option<i64>, minimum = 1, maximum = 2147483647, example = 5)]
    pub max_views: Option<Value>,
}

impl CreatePasteBody {
    /// Check JSON types and build the domain request.
    pub fn into_request(self, at: Option<DateTime<Utc>>) -> Result<CreatePasteRequest, Error> {
        let content = required_string(self.content, CONTENT_FIELD, "content is required")?;
        let ttl_seconds =
            optional_integer(self.ttl_seconds, TTL_FIELD, "ttl_seconds must be >= 1")?;
        let max_views =
            optional_integer(self.max_views, MAX_VIEWS_FIELD, "max_views must be >= 1")?;
        Ok(CreatePasteRequest {
            content,
            ttl_seconds,
            max_views,
            at,
        })
    }
}

/// Identifier and shareable link of a new paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedPasteBody {
    #[schema(example = "k3j9x2")]
    pub id: String,
    #[schema(example = "http://localhost:8080/p/k3j9x2")]
    pub url: String,
}

/// A granted read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PasteBody {
    pub content: String,
    /// Reads left after this one; null when unlimited.
    pub remaining_views: Option<u32>,
    /// RFC 3339 UTC instant with millisecond precision; null when permanent.
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub expires_at: Option<String>,
}

/// Render an instant the way API clients expect it.
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<PasteView> for PasteBody {
    fn from(view: PasteView) -> Self {
        Self {
            content: view.content,
            remaining_views: view.remaining_views,
            expires_at: view.expires_at.map(format_instant),
        }
    }
}

/// Parse a path id; malformed ids cannot name a stored paste.
pub(crate) fn parse_slug(raw: String) -> Option<PasteSlug> {
    PasteSlug::new(raw).ok()
}

fn denial_error(denial: AccessDenial) -> Error {
    Error::not_found(denial.message())
}

/// Create a paste.
#[utoipa::path(
    post,
    path = "/api/pastes",
    request_body = CreatePasteBody,
    responses(
        (status = 201, description = "Paste created", body = CreatedPasteBody),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    params(
        ("x-test-now-ms" = Option<i64>, Header, description = "Clock override, honoured in test mode")
    ),
    tags = ["pastes"],
    operation_id = "createPaste"
)]
#[post("/api/pastes")]
pub async fn create_paste(
    state: web::Data<HttpState>,
    time: RequestTime,
    payload: web::Json<CreatePasteBody>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_request(time.into_inner())?;
    let created = state.pastes.create_paste(request).await?;
    let url = state.base_url.paste_url(&created.slug);
    Ok(HttpResponse::Created().json(CreatedPasteBody {
        id: created.slug.into(),
        url,
    }))
}

/// Read a paste, consuming one view.
#[utoipa::path(
    get,
    path = "/api/pastes/{id}",
    params(
        ("id" = String, Path, description = "Paste identifier"),
        ("x-test-now-ms" = Option<i64>, Header, description = "Clock override, honoured in test mode")
    ),
    responses(
        (status = 200, description = "Paste content", body = PasteBody),
        (status = 404, description = "Unknown, expired, or exhausted", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["pastes"],
    operation_id = "getPaste"
)]
#[get("/api/pastes/{id}")]
pub async fn get_paste(
    state: web::Data<HttpState>,
    time: RequestTime,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(slug) = parse_slug(path.into_inner()) else {
        return Err(denial_error(AccessDenial::NotFound));
    };
    let request = ViewPasteRequest {
        slug,
        at: time.into_inner(),
    };
    match state.paste_views.view_paste(request).await? {
        ViewPasteResponse::Granted(view) => Ok(HttpResponse::Ok()
            .insert_header((CACHE_CONTROL, "no-store"))
            .json(PasteBody::from(view))),
        ViewPasteResponse::Denied(denial) => Err(denial_error(denial)),
    }
}

#[cfg(test)]
#[path = "pastes_tests.rs"]
mod tests;
