//! Multi-brand HSE inspection portal backend.
//!
//! Authenticated users submit structured equipment-checklist forms; admins
//! list, review, and delete them. Two tenants share one deployment, and a
//! per-form-type daily document number is suggested for each new form.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
