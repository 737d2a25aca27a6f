//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{document_sequences, submissions, users};

/// Row struct for reading from the submissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionRow {
    pub id: Uuid,
    pub form_type: String,
    pub form_title: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub data: serde_json::Value,
    pub has_defects: bool,
    pub brand: Option<String>,
    pub is_read: bool,
    pub user_id: Uuid,
}

/// Insertable struct for creating new submission records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub(crate) struct NewSubmissionRow<'a> {
    pub id: Uuid,
    pub form_type: &'a str,
    pub form_title: &'a str,
    pub submitted_by: &'a str,
    pub submitted_at: DateTime<Utc>,
    pub data: &'a serde_json::Value,
    pub has_defects: bool,
    pub brand: Option<&'a str>,
    pub is_read: bool,
    pub user_id: Uuid,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub role: String,
    pub brand: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub role: &'a str,
    pub brand: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct seeding a counter at the baseline.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_sequences)]
pub(crate) struct NewDocumentSequenceRow<'a> {
    pub form_type: &'a str,
    pub seq_date: NaiveDate,
    pub last_number: i32,
}
