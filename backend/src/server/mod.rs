//! Server configuration and dependency wiring.

pub mod config;
pub mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;
