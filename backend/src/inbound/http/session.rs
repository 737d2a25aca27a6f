//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with
//! domain-friendly operations: persisting, requiring, and purging the
//! authenticated user id, plus reading the pre-authentication brand hint
//! cookie.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Cookie carrying the tenant selected before sign-in. A hint only; the
/// profile column is canonical once authenticated.
pub const BRAND_COOKIE: &str = "brand";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match UserId::parse(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!(%error, "invalid user id in session cookie");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Terminate the session, removing the cookie state entirely.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Read the tenant hint cookie from the request, if any.
pub fn brand_hint(req: &HttpRequest) -> Option<String> {
    req.cookie(BRAND_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpRequest, HttpResponse};
    use uuid::Uuid;

    use super::*;
    use crate::domain::ApiResult;
    use crate::inbound::http::test_utils::test_session_middleware;

    #[actix_web::test]
    async fn round_trips_user_id() {
        let id = UserId::from_uuid(Uuid::new_v4());
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(move |session: SessionContext| async move {
                        session.persist_user(id)?;
                        Ok::<_, crate::domain::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_user_id()?;
                        Ok::<_, crate::domain::Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn missing_session_yields_unauthorised() {
        let app = test::init_service(
            App::new().wrap(test_session_middleware()).route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    session.require_user_id()?;
                    Ok::<_, crate::domain::Error>(HttpResponse::Ok())
                }),
            ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn brand_hint_reads_cookie() {
        async fn probe(req: HttpRequest) -> ApiResult<HttpResponse> {
            let hint = brand_hint(&req).unwrap_or_else(|| "none".to_owned());
            Ok(HttpResponse::Ok().body(hint))
        }

        let app =
            test::init_service(App::new().route("/probe", web::get().to(probe))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/probe")
                .cookie(actix_web::cookie::Cookie::new(BRAND_COOKIE, "cintasign"))
                .to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(body, "cintasign".as_bytes());
    }
}
