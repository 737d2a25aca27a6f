//! Document sequence HTTP handler.
//!
//! ```text
//! GET /api/v1/next-document?formType=X
//! ```
//!
//! A side-effect-free suggestion of the next reference number; the counter
//! only advances when a submission is actually stored.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// Query parameters for `GET /api/v1/next-document`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextDocumentQuery {
    pub form_type: Option<String>,
}

/// Suggest the next document number for a form type today.
#[utoipa::path(
    get,
    path = "/api/v1/next-document",
    params(("formType" = String, Query, description = "Checklist template identifier")),
    responses(
        (status = 200, description = "Suggested next number"),
        (status = 400, description = "Missing formType"),
        (status = 502, description = "Sequence store unavailable")
    ),
    tags = ["sequences"],
    operation_id = "nextDocumentNumber",
    security([])
)]
#[get("/next-document")]
pub async fn next_document(
    state: web::Data<HttpState>,
    query: web::Query<NextDocumentQuery>,
) -> ApiResult<web::Json<serde_json::Value>> {
    let form_type = query
        .into_inner()
        .form_type
        .ok_or_else(|| missing_field_error("formType"))?;
    let next_number = state.sequences.next_number(&form_type).await?;
    Ok(web::Json(json!({ "nextNumber": next_number })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{test_app, StubSequences, StubStateBuilder};

    #[actix_web::test]
    async fn fresh_form_type_suggests_baseline() {
        let app = actix_test::init_service(test_app(StubStateBuilder::new().build())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/next-document?formType=cintasign-loading")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("nextNumber").and_then(Value::as_i64), Some(100));
    }

    #[actix_web::test]
    async fn existing_counter_suggests_successor() {
        let state = StubStateBuilder::new()
            .sequences(StubSequences { next: 108 })
            .build();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/next-document?formType=cintasign-loading")
                .to_request(),
        )
        .await;

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("nextNumber").and_then(Value::as_i64), Some(108));
    }

    #[actix_web::test]
    async fn missing_form_type_is_invalid() {
        let app = actix_test::init_service(test_app(StubStateBuilder::new().build())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/next-document")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body
            .get("error")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("formType")));
    }
}
