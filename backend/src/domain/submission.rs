//! Submission aggregate and its validated draft.
//!
//! A submission is one completed, stored instance of an inspection checklist.
//! The per-template `data` payload is opaque at this layer; any per-template
//! validation belongs to the form-rendering layer.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::brand::Brand;
use super::user::UserId;

/// A stored inspection submission.
///
/// `brand` is always a valid tenant tag here: storage-level legacy nulls are
/// normalised at the adapter boundary before a value reaches the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub form_type: String,
    pub form_title: String,
    pub submitted_by: String,
    /// Stamped server-side at insert time, never client-supplied.
    pub submitted_at: DateTime<Utc>,
    /// Opaque per-template payload.
    pub data: Value,
    pub has_defects: bool,
    pub brand: Brand,
    pub is_read: bool,
    pub user_id: UserId,
}

/// Validation errors raised while accepting a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionValidationError {
    #[error("missing required field: formType")]
    MissingFormType,
    #[error("missing required field: formTitle")]
    MissingFormTitle,
    #[error("missing required field: submittedBy")]
    MissingSubmittedBy,
}

impl SubmissionValidationError {
    /// The camelCase wire name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingFormType => "formType",
            Self::MissingFormTitle => "formTitle",
            Self::MissingSubmittedBy => "submittedBy",
        }
    }
}

/// Client-supplied portion of a submission, validated before intake.
///
/// Everything else on [`Submission`] (`id`, `submitted_at`, `brand`,
/// `is_read`, `user_id`) is derived or defaulted server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    form_type: String,
    form_title: String,
    submitted_by: String,
    data: Value,
    has_defects: bool,
}

impl SubmissionDraft {
    /// Validate presence of the required fields; blank-after-trim counts as
    /// missing. A missing `data` payload defaults to an empty object.
    pub fn try_new(
        form_type: Option<String>,
        form_title: Option<String>,
        submitted_by: Option<String>,
        data: Option<Value>,
        has_defects: Option<bool>,
    ) -> Result<Self, SubmissionValidationError> {
        let form_type = require(form_type, SubmissionValidationError::MissingFormType)?;
        let form_title = require(form_title, SubmissionValidationError::MissingFormTitle)?;
        let submitted_by = require(submitted_by, SubmissionValidationError::MissingSubmittedBy)?;

        Ok(Self {
            form_type,
            form_title,
            submitted_by,
            data: data.unwrap_or_else(|| Value::Object(serde_json::Map::new())),
            has_defects: has_defects.unwrap_or(false),
        })
    }

    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    pub fn submitted_by(&self) -> &str {
        &self.submitted_by
    }

    /// Assemble the full aggregate from server-derived metadata.
    pub fn into_submission(
        self,
        id: Uuid,
        submitted_at: DateTime<Utc>,
        brand: Brand,
        user_id: UserId,
    ) -> Submission {
        Submission {
            id,
            form_type: self.form_type,
            form_title: self.form_title,
            submitted_by: self.submitted_by,
            submitted_at,
            data: self.data,
            has_defects: self.has_defects,
            brand,
            is_read: false,
            user_id,
        }
    }
}

fn require(
    value: Option<String>,
    error: SubmissionValidationError,
) -> Result<String, SubmissionValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(error),
    }
}
