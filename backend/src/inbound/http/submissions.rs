//! Submission HTTP handlers.
//!
//! ```text
//! GET    /api/v1/submissions
//! POST   /api/v1/submissions
//! DELETE /api/v1/submissions/{id}
//! POST   /api/v1/submissions/{id}/read
//! ```

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Submission, SubmissionDraft};
use crate::inbound::http::session::{brand_hint, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_draft_error;
use crate::inbound::http::ApiResult;

/// Request payload for creating a submission.
///
/// Required fields are optional here so that absence maps to the portal's
/// validation error rather than a serde deserialisation failure. The `data`
/// payload is shaped entirely by the originating form template.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub form_type: Option<String>,
    pub form_title: Option<String>,
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub has_defects: Option<bool>,
}

/// Wire representation of a stored submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub form_type: String,
    pub form_title: String,
    pub submitted_by: String,
    pub submitted_at: String,
    pub data: serde_json::Value,
    pub has_defects: bool,
    pub brand: String,
    pub is_read: bool,
    pub user_id: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(value: Submission) -> Self {
        Self {
            id: value.id.to_string(),
            form_type: value.form_type,
            form_title: value.form_title,
            submitted_by: value.submitted_by,
            submitted_at: value.submitted_at.to_rfc3339(),
            data: value.data,
            has_defects: value.has_defects,
            brand: value.brand.to_string(),
            is_read: value.is_read,
            user_id: value.user_id.to_string(),
        }
    }
}

/// List submissions, newest first.
///
/// When the caller's profile carries a tenant, the listing is filtered to
/// that tenant; legacy rows without a brand count as the default tenant.
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    responses(
        (status = 200, description = "Submissions, newest first", body = [SubmissionResponse]),
        (status = 401, description = "Unauthorised"),
        (status = 502, description = "Submission store unavailable")
    ),
    tags = ["submissions"],
    operation_id = "listSubmissions"
)]
#[get("/submissions")]
pub async fn list_submissions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubmissionResponse>>> {
    let user_id = session.require_user_id()?;
    let brand_filter = state
        .access
        .profile(user_id)
        .await?
        .and_then(|profile| profile.brand);
    let submissions = state.submissions.list(brand_filter).await?;
    Ok(web::Json(
        submissions.into_iter().map(SubmissionResponse::from).collect(),
    ))
}

/// Accept a new submission.
///
/// The payload is validated before the session is consulted, so a missing
/// required field is reported as 400 even to an anonymous caller. Brand,
/// author, and timestamp metadata are derived server-side.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 201, description = "Submission stored"),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthorised"),
        (status = 502, description = "Submission store unavailable")
    ),
    tags = ["submissions"],
    operation_id = "createSubmission"
)]
#[post("/submissions")]
pub async fn create_submission(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Json<SubmissionRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = SubmissionDraft::try_new(
        payload.form_type,
        payload.form_title,
        payload.submitted_by,
        payload.data,
        payload.has_defects,
    )
    .map_err(map_draft_error)?;

    let user_id = session.require_user_id()?;
    let hint = brand_hint(&req);
    let brand = state.access.resolve_brand(user_id, hint.as_deref()).await?;
    let submission = state.intake.submit(user_id, brand, draft).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "id": submission.id,
    })))
}

/// Delete a submission. Admin only; non-admin callers are rejected without
/// revealing whether the id exists.
#[utoipa::path(
    delete,
    path = "/api/v1/submissions/{id}",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission deleted"),
        (status = 401, description = "Unauthorised"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Submission not found"),
        (status = 502, description = "Submission store unavailable")
    ),
    tags = ["submissions"],
    operation_id = "deleteSubmission"
)]
#[delete("/submissions/{id}")]
pub async fn delete_submission(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.access.require_admin(user_id).await?;
    state.admin.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Flag a submission as reviewed. Admin only, gated like deletion.
#[utoipa::path(
    post,
    path = "/api/v1/submissions/{id}/read",
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission marked read"),
        (status = 401, description = "Unauthorised"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Submission not found"),
        (status = 502, description = "Submission store unavailable")
    ),
    tags = ["submissions"],
    operation_id = "markSubmissionRead"
)]
#[post("/submissions/{id}/read")]
pub async fn mark_submission_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.access.require_admin(user_id).await?;
    state.admin.mark_read(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
