//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::SameSite;
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, sequences, submissions};
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{build_http_state, ServerConfig};
#[cfg(debug_assertions)]
use backend::ApiDoc;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
    let state = build_http_state(pool, config.webhook_url.as_deref());

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let session_key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;

    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            session_key.clone(),
            cookie_secure,
        )
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
    key: actix_web::cookie::Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(submissions::list_submissions)
        .service(submissions::create_submission)
        .service(submissions::delete_submission)
        .service(submissions::mark_submission_read)
        .service(sequences::next_document);

    #[cfg_attr(
        not(debug_assertions),
        expect(unused_mut, reason = "Swagger UI is mounted in debug builds only")
    )]
    let mut app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
