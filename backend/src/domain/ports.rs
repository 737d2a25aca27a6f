//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with the
//! relational store and the outbound webhook; driving ports are the
//! use-cases HTTP handlers depend on. Each driven trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::brand::Brand;
use super::error::Error;
use super::submission::{Submission, SubmissionDraft};
use super::user::{LoginCredentials, UserId, UserProfile};

/// Errors surfaced by the submission persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionStoreError {
    /// Database connectivity or pool checkout failures.
    #[error("submission store connection failed: {message}")]
    Connection { message: String },
    /// Query execution failures.
    #[error("submission store query failed: {message}")]
    Query { message: String },
}

impl SubmissionStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the user profile persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileStoreError {
    #[error("profile store connection failed: {message}")]
    Connection { message: String },
    #[error("profile store query failed: {message}")]
    Query { message: String },
}

impl ProfileStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the document sequence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceStoreError {
    #[error("sequence store connection failed: {message}")]
    Connection { message: String },
    #[error("sequence store query failed: {message}")]
    Query { message: String },
}

impl SequenceStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the webhook notifier adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The request could not be sent.
    #[error("webhook request failed: {message}")]
    Request { message: String },
    /// The integration answered with a non-success status.
    #[error("webhook rejected notification with status {status}")]
    Status { status: u16 },
}

impl NotifyError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }
}

/// Durable storage for submissions.
///
/// The adapter owns the camel/snake field translation and never trusts a
/// client-supplied `brand`, `user_id`, `submitted_at`, or `is_read`; those
/// arrive already derived on the aggregate.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// All submissions ordered by `submitted_at` descending. Brand filtering
    /// is the caller's concern.
    async fn list(&self) -> Result<Vec<Submission>, SubmissionStoreError>;

    /// Persist a fully assembled submission.
    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionStoreError>;

    /// Delete by id; `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, SubmissionStoreError>;

    /// Flag a submission as reviewed; `false` when no row matched.
    async fn mark_read(&self, id: Uuid) -> Result<bool, SubmissionStoreError>;
}

/// Durable storage for user profiles.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, ProfileStoreError>;

    /// Insert or refresh a profile. Must not clobber an existing `brand`
    /// selection.
    async fn upsert(&self, profile: &UserProfile) -> Result<(), ProfileStoreError>;

    /// Overwrite the stored tenant selection; `None` clears it.
    async fn set_brand(&self, id: UserId, brand: Option<Brand>) -> Result<(), ProfileStoreError>;
}

/// Per-form-type, per-day document number counter.
#[async_trait]
pub trait DocumentSequenceStore: Send + Sync {
    /// Read the last issued number for the key, if a counter row exists.
    /// Never writes.
    async fn peek(
        &self,
        form_type: &str,
        date: NaiveDate,
    ) -> Result<Option<i32>, SequenceStoreError>;

    /// Atomically advance the counter and return the issued number, creating
    /// the row at the baseline on first use. Safe under concurrent callers.
    async fn commit(&self, form_type: &str, date: NaiveDate) -> Result<i32, SequenceStoreError>;
}

/// Outbound third-party notification, advisory only.
#[async_trait]
pub trait SubmissionNotifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// Driving ports (use-cases consumed by HTTP handlers)
// ---------------------------------------------------------------------------

/// Accept a validated submission on behalf of an authenticated caller.
#[async_trait]
pub trait IntakeCommand: Send + Sync {
    /// Persist the draft with server-derived metadata and return the stored
    /// aggregate.
    async fn submit(
        &self,
        user_id: UserId,
        brand: Brand,
        draft: SubmissionDraft,
    ) -> Result<Submission, Error>;
}

/// Read access to the submission listing.
#[async_trait]
pub trait SubmissionsQuery: Send + Sync {
    /// Submissions ordered by `submitted_at` descending, optionally filtered
    /// to one tenant (legacy rows count as the default tenant).
    async fn list(&self, brand_filter: Option<Brand>) -> Result<Vec<Submission>, Error>;
}

/// Privileged submission mutations. Role gating happens at the handler via
/// [`AccessGate::require_admin`]; these operate on already-authorised calls.
#[async_trait]
pub trait SubmissionsAdminCommand: Send + Sync {
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
    async fn mark_read(&self, id: Uuid) -> Result<(), Error>;
}

/// Suggest the next document reference number for a form type.
#[async_trait]
pub trait SequenceQuery: Send + Sync {
    /// Side-effect-free peek at what the next number would be today.
    async fn next_number(&self, form_type: &str) -> Result<i32, Error>;
}

/// Identity, role, and tenant decisions for inbound requests.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Verify credentials and ensure a profile row exists for the identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Fetch the caller's profile, if one exists.
    async fn profile(&self, id: UserId) -> Result<Option<UserProfile>, Error>;

    /// Require the admin role; `Forbidden` otherwise.
    async fn require_admin(&self, id: UserId) -> Result<UserProfile, Error>;

    /// Resolve the caller's tenant: profile column first, cookie hint next,
    /// default tenant last.
    async fn resolve_brand(&self, id: UserId, cookie_hint: Option<&str>) -> Result<Brand, Error>;

    /// Clear the stored tenant selection so the next session re-selects.
    async fn sign_out(&self, id: UserId) -> Result<(), Error>;
}
