//! Tenant tags and brand resolution.
//!
//! The portal serves two organisations from one deployment. Every submission
//! and user profile is scoped to one of the closed set of tenant tags; legacy
//! rows predate the column and are treated as belonging to the default
//! tenant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tenant tag. The set is closed; anything else coerces to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    /// The primary tenant. Legacy rows with no brand belong here.
    Bell,
    /// The secondary tenant.
    Cintasign,
}

impl Brand {
    /// The default tenant used for legacy and unrecognised values.
    pub const DEFAULT: Self = Self::Bell;

    /// The wire/storage tag for this tenant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bell => "bell",
            Self::Cintasign => "cintasign",
        }
    }

    /// Normalise a stored column value to a tenant tag.
    ///
    /// `None` is the legacy case and maps silently to the default tenant;
    /// a non-null unrecognised value is coerced with a warning so bad data
    /// is visible in logs without failing reads.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => Self::DEFAULT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = raw, "unrecognised brand value, coercing to default tenant");
                Self::DEFAULT
            }),
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a known tenant tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown brand: {0}")]
pub struct UnknownBrand(pub String);

impl FromStr for Brand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bell" => Ok(Self::Bell),
            "cintasign" => Ok(Self::Cintasign),
            other => Err(UnknownBrand(other.to_owned())),
        }
    }
}

/// Resolve the tenant for a request.
///
/// The profile column is canonical. The cookie hint is a pre-authentication
/// aid only and is consulted when the profile has no brand yet; an invalid
/// hint coerces to the default tenant with a warning.
pub fn resolve_brand(profile_brand: Option<Brand>, cookie_hint: Option<&str>) -> Brand {
    if let Some(brand) = profile_brand {
        return brand;
    }
    match cookie_hint {
        None => Brand::DEFAULT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, "invalid brand cookie, coercing to default tenant");
            Brand::DEFAULT
        }),
    }
}
