//! PostgreSQL-backed `SubmissionRepository` implementation using Diesel.
//!
//! Owns the translation between the storage schema (snake_case columns,
//! nullable legacy brand) and the domain aggregate (normalised tenant tag).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SubmissionRepository, SubmissionStoreError};
use crate::domain::{Brand, Submission, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubmissionRow, SubmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::submissions;

/// Diesel-backed implementation of the `SubmissionRepository` port.
#[derive(Clone)]
pub struct DieselSubmissionRepository {
    pool: DbPool,
}

impl DieselSubmissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> SubmissionStoreError {
    map_pool_error(error, SubmissionStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SubmissionStoreError {
    map_diesel_error(
        error,
        SubmissionStoreError::query,
        SubmissionStoreError::connection,
    )
}

/// Convert a database row to a domain submission, normalising the legacy
/// nullable brand column.
fn row_to_submission(row: SubmissionRow) -> Submission {
    Submission {
        id: row.id,
        form_type: row.form_type,
        form_title: row.form_title,
        submitted_by: row.submitted_by,
        submitted_at: row.submitted_at,
        data: row.data,
        has_defects: row.has_defects,
        brand: Brand::from_stored(row.brand.as_deref()),
        is_read: row.is_read,
        user_id: UserId::from_uuid(row.user_id),
    }
}

#[async_trait]
impl SubmissionRepository for DieselSubmissionRepository {
    async fn list(&self) -> Result<Vec<Submission>, SubmissionStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<SubmissionRow> = submissions::table
            .order(submissions::submitted_at.desc())
            .select(SubmissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_submission).collect())
    }

    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewSubmissionRow {
            id: submission.id,
            form_type: &submission.form_type,
            form_title: &submission.form_title,
            submitted_by: &submission.submitted_by,
            submitted_at: submission.submitted_at,
            data: &submission.data,
            has_defects: submission.has_defects,
            brand: Some(submission.brand.as_str()),
            is_read: submission.is_read,
            user_id: submission.user_id.as_uuid(),
        };

        diesel::insert_into(submissions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SubmissionStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(submissions::table.filter(submissions::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool, SubmissionStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::update(submissions::table.filter(submissions::id.eq(id)))
            .set(submissions::is_read.eq(true))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}
