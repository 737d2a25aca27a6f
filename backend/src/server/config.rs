//! Server configuration derived from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;

/// Runtime configuration for the HTTP server.
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub session_key: Key,
    pub cookie_secure: bool,
    /// Optional third-party integration endpoint; absent disables
    /// notification entirely.
    pub webhook_url: Option<String>,
}

impl ServerConfig {
    /// Assemble configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is unset, `BIND_ADDR` does not parse, or
    /// the session key file is unreadable outside development.
    pub fn from_env() -> std::io::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse::<SocketAddr>()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let webhook_url = env::var("SUBMISSION_WEBHOOK_URL").ok().filter(|url| !url.is_empty());

        Ok(Self {
            bind_addr,
            database_url,
            session_key: load_session_key()?,
            cookie_secure,
            webhook_url,
        })
    }
}

/// Load the session signing key, falling back to an ephemeral key in
/// development builds or when explicitly allowed.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
