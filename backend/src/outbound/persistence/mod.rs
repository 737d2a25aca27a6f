//! Diesel persistence adapters implementing the domain's driven ports.

pub mod diesel_sequence_store;
pub mod diesel_submission_repository;
pub mod diesel_user_profile_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_sequence_store::DieselDocumentSequenceStore;
pub use diesel_submission_repository::DieselSubmissionRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
