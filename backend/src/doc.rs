//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the user endpoints, health probes and their schemas.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it for
//! external tooling.

use utoipa::OpenApi;

use crate::domain::User;
use crate::inbound::http::ErrorBody;
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::users::{RegisterRequest, RegisterResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Referral tracker API",
        description = "Register users, credit referrals and look users up by referral code."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::register,
        crate::inbound::http::users::find_user_by_referral_code,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, ErrorBody, RegisterRequest, RegisterResponse, ProbeBody)),
    tags(
        (name = "users", description = "Registration and referral lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

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
    #[case("/api/users")]
    #[case("/api/register")]
    #[case("/api/users/{referral_code}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("User").expect("User schema");
        for field in ["id", "name", "email", "referralCode", "points"] {
            assert_object_schema_has_field(user, field);
        }
    }

    #[rstest]
    fn error_schema_has_error_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("ErrorBody").expect("ErrorBody schema");
        assert_object_schema_has_field(error, "error");
    }
}
