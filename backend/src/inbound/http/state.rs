//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessGate, IntakeCommand, SequenceQuery, SubmissionsAdminCommand, SubmissionsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub access: Arc<dyn AccessGate>,
    pub intake: Arc<dyn IntakeCommand>,
    pub submissions: Arc<dyn SubmissionsQuery>,
    pub admin: Arc<dyn SubmissionsAdminCommand>,
    pub sequences: Arc<dyn SequenceQuery>,
}
