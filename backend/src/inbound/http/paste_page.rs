//! Browser view of a paste.
//!
//! Counts a view exactly like the JSON API. Denials and failures answer with
//! short plain-text bodies instead of JSON.

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpResponse, get, web};
use tracing::error;

use crate::domain::AccessDenial;
use crate::domain::ports::{ViewPasteRequest, ViewPasteResponse};

use super::pastes::parse_slug;
use super::request_time::RequestTime;
use super::state::HttpState;

/// Body served when the read fails unexpectedly.
pub const SERVER_ERROR_TEXT: &str = "Server Error";

/// Escape `&`, `<` and `>` for inclusion in HTML text.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Minimal page wrapping the escaped content in `<pre>`.
pub fn render_page(content: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Paste</title></head><body><pre>{}</pre></body></html>",
        escape_html(content)
    )
}

fn plain_text(mut builder: actix_web::HttpResponseBuilder, body: &'static str) -> HttpResponse {
    builder
        .content_type(ContentType::plaintext())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(body)
}

fn denied(denial: AccessDenial) -> HttpResponse {
    plain_text(HttpResponse::NotFound(), denial.page_message())
}

/// Render a paste as HTML, consuming one view.
#[utoipa::path(
    get,
    path = "/p/{id}",
    params(("id" = String, Path, description = "Paste identifier")),
    responses(
        (status = 200, description = "HTML page", body = String, content_type = "text/html"),
        (status = 404, description = "Not Found, Expired, or View Limit Reached", body = String, content_type = "text/plain"),
        (status = 500, description = "Server Error", body = String, content_type = "text/plain")
    ),
    tags = ["pastes"],
    operation_id = "viewPastePage"
)]
#[get("/p/{id}")]
pub async fn paste_page(
    state: web::Data<HttpState>,
    time: RequestTime,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(slug) = parse_slug(path.into_inner()) else {
        return denied(AccessDenial::NotFound);
    };
    let request = ViewPasteRequest {
        slug,
        at: time.into_inner(),
    };
    match state.paste_views.view_paste(request).await {
        Ok(ViewPasteResponse::Granted(view)) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .insert_header((CACHE_CONTROL, "no-store"))
            .body(render_page(&view.content)),
        Ok(ViewPasteResponse::Denied(denial)) => denied(denial),
        Err(err) => {
            error!(error = %err, "paste page failed");
            plain_text(HttpResponse::InternalServerError(), SERVER_ERROR_TEXT)
        }
    }
}
