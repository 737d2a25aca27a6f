//! Test helpers for inbound HTTP components.
//!
//! Provides a session middleware configured for tests plus stub
//! implementations of every driving port, so handler tests exercise the
//! full request path without touching PostgreSQL.

use std::sync::{Arc, Mutex};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{web, App};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    AccessGate, IntakeCommand, SequenceQuery, SubmissionsAdminCommand, SubmissionsQuery,
};
use crate::domain::{
    resolve_brand, Brand, Error, LoginCredentials, Role, Submission, SubmissionDraft, UserId,
    UserProfile, SEQUENCE_BASELINE,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fixture identity used by [`StubAccess`].
pub(crate) const STUB_USER_ID: &str = "9b8a6d43-21f0-4e7c-b5a9-7c3e1f28d604";

struct StubAccessState {
    role: Role,
    brand: Option<Brand>,
    signed_out: Vec<UserId>,
}

/// Stub access gate accepting the fixture credentials with a configurable
/// role and tenant.
#[derive(Clone)]
pub(crate) struct StubAccess {
    inner: Arc<Mutex<StubAccessState>>,
}

impl Default for StubAccess {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StubAccessState {
                role: Role::User,
                brand: None,
                signed_out: Vec::new(),
            })),
        }
    }
}

impl StubAccess {
    pub(crate) fn with_role(self, role: Role) -> Self {
        self.inner.lock().expect("state lock").role = role;
        self
    }

    pub(crate) fn with_profile_brand(self, brand: Option<Brand>) -> Self {
        self.inner.lock().expect("state lock").brand = brand;
        self
    }

    pub(crate) fn signed_out_users(&self) -> Vec<UserId> {
        self.inner.lock().expect("state lock").signed_out.clone()
    }

    fn profile_for(&self, id: UserId) -> UserProfile {
        let state = self.inner.lock().expect("state lock");
        UserProfile {
            id,
            display_name: "Field Inspector".to_owned(),
            role: state.role,
            brand: state.brand,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl AccessGate for StubAccess {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let known = matches!(credentials.username(), "inspector" | "admin");
        if !known || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::parse(STUB_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }

    async fn profile(&self, id: UserId) -> Result<Option<UserProfile>, Error> {
        Ok(Some(self.profile_for(id)))
    }

    async fn require_admin(&self, id: UserId) -> Result<UserProfile, Error> {
        let profile = self.profile_for(id);
        if !profile.is_admin() {
            return Err(Error::forbidden("admin access required"));
        }
        Ok(profile)
    }

    async fn resolve_brand(
        &self,
        _id: UserId,
        cookie_hint: Option<&str>,
    ) -> Result<Brand, Error> {
        let profile_brand = self.inner.lock().expect("state lock").brand;
        Ok(resolve_brand(profile_brand, cookie_hint))
    }

    async fn sign_out(&self, id: UserId) -> Result<(), Error> {
        let mut state = self.inner.lock().expect("state lock");
        state.brand = None;
        state.signed_out.push(id);
        Ok(())
    }
}

/// Stub intake recording accepted submissions.
#[derive(Clone, Default)]
pub(crate) struct StubIntake {
    accepted: Arc<Mutex<Vec<Submission>>>,
}

impl StubIntake {
    pub(crate) fn accepted(&self) -> Vec<Submission> {
        self.accepted.lock().expect("accepted lock").clone()
    }
}

#[async_trait]
impl IntakeCommand for StubIntake {
    async fn submit(
        &self,
        user_id: UserId,
        brand: Brand,
        draft: SubmissionDraft,
    ) -> Result<Submission, Error> {
        let submission = draft.into_submission(Uuid::new_v4(), Utc::now(), brand, user_id);
        self.accepted
            .lock()
            .expect("accepted lock")
            .push(submission.clone());
        Ok(submission)
    }
}

/// Stub listing query applying the same brand filter as the real service.
#[derive(Clone, Default)]
pub(crate) struct StubSubmissionsQuery {
    stored: Arc<Mutex<Vec<Submission>>>,
}

impl StubSubmissionsQuery {
    pub(crate) fn with_submissions(stored: Vec<Submission>) -> Self {
        Self {
            stored: Arc::new(Mutex::new(stored)),
        }
    }
}

#[async_trait]
impl SubmissionsQuery for StubSubmissionsQuery {
    async fn list(&self, brand_filter: Option<Brand>) -> Result<Vec<Submission>, Error> {
        let stored = self.stored.lock().expect("stored lock").clone();
        Ok(match brand_filter {
            None => stored,
            Some(brand) => stored
                .into_iter()
                .filter(|submission| submission.brand == brand)
                .collect(),
        })
    }
}

/// Stub admin command recording mutations; `missing` simulates absent ids.
#[derive(Clone, Default)]
pub(crate) struct StubAdmin {
    pub(crate) missing: bool,
    deleted: Arc<Mutex<Vec<Uuid>>>,
    marked_read: Arc<Mutex<Vec<Uuid>>>,
}

impl StubAdmin {
    pub(crate) fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub(crate) fn deleted(&self) -> Vec<Uuid> {
        self.deleted.lock().expect("deleted lock").clone()
    }

    pub(crate) fn marked_read(&self) -> Vec<Uuid> {
        self.marked_read.lock().expect("marked lock").clone()
    }
}

#[async_trait]
impl SubmissionsAdminCommand for StubAdmin {
    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self.missing {
            return Err(Error::not_found("submission not found"));
        }
        self.deleted.lock().expect("deleted lock").push(id);
        Ok(())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), Error> {
        if self.missing {
            return Err(Error::not_found("submission not found"));
        }
        self.marked_read.lock().expect("marked lock").push(id);
        Ok(())
    }
}

/// Stub sequence query mirroring the real service's blank-input rejection.
#[derive(Clone)]
pub(crate) struct StubSequences {
    pub(crate) next: i32,
}

impl Default for StubSequences {
    fn default() -> Self {
        Self {
            next: SEQUENCE_BASELINE,
        }
    }
}

#[async_trait]
impl SequenceQuery for StubSequences {
    async fn next_number(&self, form_type: &str) -> Result<i32, Error> {
        if form_type.trim().is_empty() {
            return Err(Error::invalid_request("missing required field: formType"));
        }
        Ok(self.next)
    }
}

/// Builder assembling an [`HttpState`] from stubs, overriding as needed.
pub(crate) struct StubStateBuilder {
    access: StubAccess,
    intake: StubIntake,
    submissions: StubSubmissionsQuery,
    admin: StubAdmin,
    sequences: StubSequences,
}

impl StubStateBuilder {
    pub(crate) fn new() -> Self {
        Self {
            access: StubAccess::default(),
            intake: StubIntake::default(),
            submissions: StubSubmissionsQuery::default(),
            admin: StubAdmin::default(),
            sequences: StubSequences::default(),
        }
    }

    pub(crate) fn access(mut self, access: StubAccess) -> Self {
        self.access = access;
        self
    }

    pub(crate) fn intake(mut self, intake: StubIntake) -> Self {
        self.intake = intake;
        self
    }

    pub(crate) fn submissions(mut self, submissions: StubSubmissionsQuery) -> Self {
        self.submissions = submissions;
        self
    }

    pub(crate) fn admin(mut self, admin: StubAdmin) -> Self {
        self.admin = admin;
        self
    }

    pub(crate) fn sequences(mut self, sequences: StubSequences) -> Self {
        self.sequences = sequences;
        self
    }

    pub(crate) fn build(self) -> HttpState {
        HttpState {
            access: Arc::new(self.access),
            intake: Arc::new(self.intake),
            submissions: Arc::new(self.submissions),
            admin: Arc::new(self.admin),
            sequences: Arc::new(self.sequences),
        }
    }
}

/// Build the full application under test: session middleware plus every
/// versioned endpoint, mirroring the production scope layout.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(super::auth::login)
            .service(super::auth::logout)
            .service(super::auth::me)
            .service(super::submissions::list_submissions)
            .service(super::submissions::create_submission)
            .service(super::submissions::delete_submission)
            .service(super::submissions::mark_submission_read)
            .service(super::sequences::next_document),
    )
}

/// Log in with the stub fixture credentials and return the session cookie.
pub(crate) async fn login_cookie<S, B>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
{
    let response = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "username": "inspector",
                "password": "password",
            }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login fixture failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie present")
        .into_owned()
}
