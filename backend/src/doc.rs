//! OpenAPI document for the paste API.
//!
//! Served through Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::health::HealthBody;
use crate::inbound::http::pastes::{CreatePasteBody, CreatedPasteBody, PasteBody};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pastebin API",
        description = "Create text pastes with optional expiry and view limits, then read them back."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::healthz,
        crate::inbound::http::pastes::create_paste,
        crate::inbound::http::pastes::get_paste,
        crate::inbound::http::paste_page::paste_page,
    ),
    components(schemas(CreatePasteBody, CreatedPasteBody, PasteBody, ErrorBody, HealthBody)),
    tags(
        (name = "pastes", description = "Paste creation and retrieval"),
        (name = "health", description = "Storage health check")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("CreatePasteBody", "content")]
    #[case("CreatePasteBody", "max_views")]
    #[case("CreatedPasteBody", "url")]
    #[case("PasteBody", "remaining_views")]
    #[case("PasteBody", "expires_at")]
    #[case("ErrorBody", "error")]
    #[case("HealthBody", "ok")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/healthz")]
    #[case("/api/pastes")]
    #[case("/api/pastes/{id}")]
    #[case("/p/{id}")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
