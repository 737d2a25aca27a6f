//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregate used by Swagger UI (debug builds only)
//! and external tooling. Registers every HTTP endpoint plus the request and
//! response schemas of the inbound layer.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{LoginRequest, ProfileResponse};
use crate::inbound::http::submissions::{SubmissionRequest, SubmissionResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the inspection portal REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HSE inspection portal API",
        description = "Session-authenticated submission intake, listing, and document numbering."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::submissions::list_submissions,
        crate::inbound::http::submissions::create_submission,
        crate::inbound::http::submissions::delete_submission,
        crate::inbound::http::submissions::mark_submission_read,
        crate::inbound::http::sequences::next_document,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        ProfileResponse,
        SubmissionRequest,
        SubmissionResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/users/me",
            "/api/v1/submissions",
            "/api/v1/submissions/{id}",
            "/api/v1/submissions/{id}/read",
            "/api/v1/next-document",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
