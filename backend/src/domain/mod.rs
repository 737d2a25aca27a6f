//! Domain types and services for the inspection portal.
//!
//! Purpose: strongly typed tenant, identity, and submission primitives plus
//! the use-case services behind the driving ports. Inbound adapters map
//! these onto HTTP; outbound adapters implement the driven ports in
//! [`ports`].

pub mod access;
pub mod brand;
pub mod error;
pub mod intake;
pub mod ports;
pub mod sequence;
pub mod submission;
pub mod submission_service;
pub mod user;

pub use self::access::AccessGateService;
pub use self::brand::{resolve_brand, Brand, UnknownBrand};
pub use self::error::{Error, ErrorCode};
pub use self::intake::SubmissionIntakeService;
pub use self::sequence::{DocumentSequenceService, SEQUENCE_BASELINE};
pub use self::submission::{Submission, SubmissionDraft, SubmissionValidationError};
pub use self::submission_service::SubmissionAdminService;
pub use self::user::{LoginCredentials, LoginValidationError, Role, UserId, UserProfile};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
