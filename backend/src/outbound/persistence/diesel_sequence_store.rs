//! PostgreSQL-backed `DocumentSequenceStore` implementation using Diesel.
//!
//! `peek` is a plain read. `commit` is a single conditional upsert so the
//! increment is atomic under concurrent callers for the same
//! `(form_type, seq_date)` key; no application-level locking is involved.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DocumentSequenceStore, SequenceStoreError};
use crate::domain::SEQUENCE_BASELINE;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewDocumentSequenceRow;
use super::pool::{DbPool, PoolError};
use super::schema::document_sequences;

/// Diesel-backed implementation of the `DocumentSequenceStore` port.
#[derive(Clone)]
pub struct DieselDocumentSequenceStore {
    pool: DbPool,
}

impl DieselDocumentSequenceStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> SequenceStoreError {
    map_pool_error(error, SequenceStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SequenceStoreError {
    map_diesel_error(
        error,
        SequenceStoreError::query,
        SequenceStoreError::connection,
    )
}

#[async_trait]
impl DocumentSequenceStore for DieselDocumentSequenceStore {
    async fn peek(
        &self,
        form_type: &str,
        date: NaiveDate,
    ) -> Result<Option<i32>, SequenceStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        document_sequences::table
            .filter(document_sequences::form_type.eq(form_type))
            .filter(document_sequences::seq_date.eq(date))
            .select(document_sequences::last_number)
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)
    }

    async fn commit(&self, form_type: &str, date: NaiveDate) -> Result<i32, SequenceStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let seed = NewDocumentSequenceRow {
            form_type,
            seq_date: date,
            last_number: SEQUENCE_BASELINE,
        };

        diesel::insert_into(document_sequences::table)
            .values(&seed)
            .on_conflict((document_sequences::form_type, document_sequences::seq_date))
            .do_update()
            .set(document_sequences::last_number.eq(document_sequences::last_number + 1))
            .returning(document_sequences::last_number)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }
}
