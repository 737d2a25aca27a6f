//! Access gate: identity, role, and tenant decisions.
//!
//! The production identity provider is an external collaborator; this
//! service keeps the fixture-credential contract at the seam where it would
//! plug in, while role and brand decisions always come from the stored
//! profile row.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::brand::{resolve_brand, Brand};
use super::error::Error;
use super::ports::{AccessGate, ProfileStoreError, UserProfileRepository};
use super::user::{LoginCredentials, Role, UserId, UserProfile};

struct FixtureAccount {
    username: &'static str,
    password: &'static str,
    user_id: &'static str,
    display_name: &'static str,
    role: Role,
}

/// Accounts accepted until the external identity provider is wired in.
const FIXTURE_ACCOUNTS: &[FixtureAccount] = &[
    FixtureAccount {
        username: "admin",
        password: "password",
        user_id: "5f0c2b1e-9a74-4c62-8f14-3d2a6b9e0c51",
        display_name: "Portal Admin",
        role: Role::Admin,
    },
    FixtureAccount {
        username: "inspector",
        password: "password",
        user_id: "9b8a6d43-21f0-4e7c-b5a9-7c3e1f28d604",
        display_name: "Field Inspector",
        role: Role::User,
    },
];

/// Profile-backed implementation of the [`AccessGate`] port.
#[derive(Clone)]
pub struct AccessGateService<P> {
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> AccessGateService<P> {
    /// Create a new gate backed by the given profile repository.
    pub fn new(profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }
}

fn map_profile_error(error: ProfileStoreError) -> Error {
    match error {
        ProfileStoreError::Connection { message } => {
            Error::service_unavailable("profile store unavailable").with_details(message)
        }
        ProfileStoreError::Query { message } => {
            Error::internal("profile store error").with_details(message)
        }
    }
}

impl<P> AccessGateService<P>
where
    P: UserProfileRepository,
{
    async fn fetch_profile(&self, id: UserId) -> Result<Option<UserProfile>, Error> {
        self.profiles
            .find_by_id(id)
            .await
            .map_err(map_profile_error)
    }

    async fn ensure_profile_exists(&self, account: &FixtureAccount) -> Result<UserId, Error> {
        let user_id = UserId::parse(account.user_id)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;

        if self.fetch_profile(user_id).await?.is_some() {
            return Ok(user_id);
        }

        let profile = UserProfile {
            id: user_id,
            display_name: account.display_name.to_owned(),
            role: account.role,
            brand: None,
            created_at: self.clock.utc(),
        };
        self.profiles
            .upsert(&profile)
            .await
            .map_err(map_profile_error)?;
        Ok(user_id)
    }
}

#[async_trait]
impl<P> AccessGate for AccessGateService<P>
where
    P: UserProfileRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password == credentials.password()
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        self.ensure_profile_exists(account).await
    }

    async fn profile(&self, id: UserId) -> Result<Option<UserProfile>, Error> {
        self.fetch_profile(id).await
    }

    async fn require_admin(&self, id: UserId) -> Result<UserProfile, Error> {
        let profile = self
            .fetch_profile(id)
            .await?
            .ok_or_else(|| Error::forbidden("admin access required"))?;
        if !profile.is_admin() {
            return Err(Error::forbidden("admin access required"));
        }
        Ok(profile)
    }

    async fn resolve_brand(&self, id: UserId, cookie_hint: Option<&str>) -> Result<Brand, Error> {
        let profile_brand = self.fetch_profile(id).await?.and_then(|profile| profile.brand);
        Ok(resolve_brand(profile_brand, cookie_hint))
    }

    async fn sign_out(&self, id: UserId) -> Result<(), Error> {
        self.profiles
            .set_brand(id, None)
            .await
            .map_err(map_profile_error)?;
        info!(user_id = %id, "cleared tenant selection on sign-out");
        Ok(())
    }
}
