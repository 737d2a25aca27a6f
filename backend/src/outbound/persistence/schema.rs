//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Stored inspection submissions.
    ///
    /// `brand` is nullable for legacy rows that predate multi-tenancy;
    /// readers treat null as the default tenant.
    submissions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Checklist template identifier, e.g. `bell-timber-truck`.
        form_type -> Varchar,
        /// Human-readable form label.
        form_title -> Varchar,
        /// Name of the person submitting.
        submitted_by -> Varchar,
        /// Server-side insert timestamp.
        submitted_at -> Timestamptz,
        /// Opaque per-template payload.
        data -> Jsonb,
        /// Whether any checklist item was marked defective.
        has_defects -> Bool,
        /// Tenant tag; null on legacy rows.
        brand -> Nullable<Varchar>,
        /// Admin review flag.
        is_read -> Bool,
        /// Authenticated account that created the record.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// User profiles: the source of truth for role and tenant scoping.
    users (id) {
        /// Primary key matching the authentication identity.
        id -> Uuid,
        /// Display name shown in the portal.
        display_name -> Varchar,
        /// `admin` or `user`; unknown values read as `user`.
        role -> Varchar,
        /// Selected tenant; null until first selection and cleared on
        /// sign-out.
        brand -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-form-type, per-day document number counters.
    document_sequences (form_type, seq_date) {
        /// Checklist template identifier.
        form_type -> Varchar,
        /// Calendar day the counter applies to.
        seq_date -> Date,
        /// Last issued number for this key.
        last_number -> Int4,
    }
}
