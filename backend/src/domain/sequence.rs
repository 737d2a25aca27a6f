//! Document sequence allocation.
//!
//! Inspection forms show a human-readable reference number, issued per form
//! type per calendar day. The allocator is split into a side-effect-free
//! `peek` (what would the next number be) and an atomic `commit` owned by
//! the store adapter; this service exposes the peek side to handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::error::Error;
use super::ports::{DocumentSequenceStore, SequenceQuery, SequenceStoreError};

/// First number issued for a fresh `(form_type, date)` key.
pub const SEQUENCE_BASELINE: i32 = 100;

/// Clock-aware peek over the document sequence counter.
#[derive(Clone)]
pub struct DocumentSequenceService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> DocumentSequenceService<S> {
    /// Create a new service over the given counter store.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

pub(crate) fn map_sequence_error(error: SequenceStoreError) -> Error {
    match error {
        SequenceStoreError::Connection { message } => {
            Error::service_unavailable("sequence store unavailable").with_details(message)
        }
        SequenceStoreError::Query { message } => {
            Error::internal("sequence store error").with_details(message)
        }
    }
}

#[async_trait]
impl<S> SequenceQuery for DocumentSequenceService<S>
where
    S: DocumentSequenceStore,
{
    async fn next_number(&self, form_type: &str) -> Result<i32, Error> {
        if form_type.trim().is_empty() {
            return Err(Error::invalid_request("missing required field: formType"));
        }

        let today = self.clock.utc().date_naive();
        let last = self
            .store
            .peek(form_type, today)
            .await
            .map_err(map_sequence_error)?;

        Ok(last.map_or(SEQUENCE_BASELINE, |number| number + 1))
    }
}
