//! Liveness banner and storage-backed health check.

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use super::state::HttpState;

/// Text served at `/`.
pub const INDEX_BANNER: &str = "Pastebin Lite API is running!";

/// Health check payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthBody {
    pub ok: bool,
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(INDEX_BANNER)
}

/// Report whether storage answers a trivial query.
#[utoipa::path(
    get,
    path = "/api/healthz",
    responses(
        (status = 200, description = "Storage reachable", body = HealthBody),
        (status = 500, description = "Storage unreachable", body = HealthBody)
    ),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/api/healthz")]
pub async fn healthz(state: web::Data<HttpState>) -> HttpResponse {
    let (mut builder, ok) = match state.storage.check().await {
        Ok(()) => (HttpResponse::Ok(), true),
        Err(error) => {
            warn!(error = %error, "health check failed");
            (HttpResponse::InternalServerError(), false)
        }
    };
    builder
        .insert_header((CACHE_CONTROL, "no-store"))
        .json(HealthBody { ok })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        MockPasteCommand, MockPasteQuery, MockStorageProbe, StorageProbeError,
    };
    use crate::inbound::http::request_time::TimeOverridePolicy;
    use crate::inbound::http::state::{HttpStatePorts, PublicBaseUrl};

    fn state_with_probe(probe: MockStorageProbe) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            HttpStatePorts {
                pastes: Arc::new(MockPasteCommand::new()),
                paste_views: Arc::new(MockPasteQuery::new()),
                storage: Arc::new(probe),
            },
            PublicBaseUrl::parse("http://localhost:8080").expect("base url"),
            TimeOverridePolicy::Ignore,
        ))
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn healthz_reflects_storage(#[case] reachable: bool, #[case] status: StatusCode) {
        let mut probe = MockStorageProbe::new();
        probe.expect_check().times(1).returning(move || {
            if reachable {
                Ok(())
            } else {
                Err(StorageProbeError::unreachable("connection refused"))
            }
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with_probe(probe))
                .service(healthz),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/healthz").to_request(),
        )
        .await;

        assert_eq!(res.status(), status);
        let body: HealthBody = actix_test::read_body_json(res).await;
        assert_eq!(body, HealthBody { ok: reachable });
    }

    #[actix_web::test]
    async fn index_serves_banner() {
        let app = actix_test::init_service(App::new().service(index)).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;

        assert!(res.status().is_success());
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), INDEX_BANNER.as_bytes());
    }
}
