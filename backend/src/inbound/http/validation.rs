//! Shared validation helpers for inbound HTTP adapters.

use crate::domain::{Error, SubmissionValidationError};

/// Error for a required field that is absent or blank after trimming.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}"))
}

/// Map draft validation failures onto the wire field names.
pub(crate) fn map_draft_error(error: SubmissionValidationError) -> Error {
    missing_field_error(error.field())
}
