//! HTTP inbound adapter: JSON API, HTML view, health, and CORS.
//!
//! [`configure`] registers every route plus the JSON extractor settings, so
//! the server and tests build identical apps:
//!
//! ```ignore
//! App::new().app_data(state).configure(pastebin::inbound::http::configure)
//! ```

pub mod cors;
pub mod error;
pub mod health;
pub mod paste_page;
pub mod pastes;
pub mod request_time;
pub mod state;
mod validation;

use actix_web::{guard, web};
use tracing::debug;

use crate::domain::Error;

pub use error::ApiResult;

/// Message returned when the body is not a readable JSON object.
pub const INVALID_JSON_MESSAGE: &str = "invalid JSON body";

/// JSON extractor settings mapping every payload error to a 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(INVALID_JSON_MESSAGE).into()
    })
}

/// Register all routes. CORS headers come from [`cors::allow_any_origin`],
/// applied with `.wrap` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/api/{tail:.*}")
                .guard(guard::Options())
                .to(cors::preflight),
        )
        .service(health::index)
        .service(health::healthz)
        .service(pastes::create_paste)
        .service(pastes::get_paste)
        .service(paste_page::paste_page);
}
