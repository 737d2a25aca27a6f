//! Authentication and session handlers.
//!
//! ```text
//! POST /api/v1/login  {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, UserProfile};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Profile payload for `GET /api/v1/users/me`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub brand: Option<String>,
    pub created_at: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name,
            role: value.role.to_string(),
            brand: value.brand.map(|brand| brand.to_string()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.access.authenticate(&credentials).await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Terminate the session and clear the stored tenant selection, forcing a
/// fresh brand choice next sign-in.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Session terminated"),
        (status = 401, description = "Unauthorised"),
        (status = 502, description = "Profile store unavailable")
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.access.sign_out(user_id).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Fetch the authenticated caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised"),
        (status = 404, description = "No profile for this account")
    ),
    tags = ["auth"],
    operation_id = "getProfile"
)]
#[get("/users/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state
        .access
        .profile(user_id)
        .await?
        .ok_or_else(|| Error::not_found("no profile for this account"))?;
    Ok(web::Json(ProfileResponse::from(profile)))
}
