//! PostgreSQL-backed `UserProfileRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileStoreError, UserProfileRepository};
use crate::domain::{Brand, Role, UserId, UserProfile};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserProfileRepository` port.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProfileStoreError {
    map_pool_error(error, ProfileStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProfileStoreError {
    map_diesel_error(error, ProfileStoreError::query, ProfileStoreError::connection)
}

fn row_to_profile(row: UserRow) -> UserProfile {
    UserProfile {
        id: UserId::from_uuid(row.id),
        display_name: row.display_name,
        role: Role::from_stored(&row.role),
        brand: row.brand.as_deref().map(|raw| Brand::from_stored(Some(raw))),
        created_at: row.created_at,
    }
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_profile))
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), ProfileStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewUserRow {
            id: profile.id.as_uuid(),
            display_name: &profile.display_name,
            role: profile.role.as_str(),
            brand: profile.brand.map(Brand::as_str),
            created_at: profile.created_at,
        };

        // Refresh identity fields only; an existing tenant selection must
        // survive re-login.
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::display_name.eq(&profile.display_name),
                users::role.eq(profile.role.as_str()),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn set_brand(
        &self,
        id: UserId,
        brand: Option<Brand>,
    ) -> Result<(), ProfileStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::brand.eq(brand.map(Brand::as_str)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn row(role: &str, brand: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            display_name: "Field Inspector".into(),
            role: role.to_owned(),
            brand: brand.map(str::to_owned),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    #[case("owner", Role::User)]
    fn roles_normalise_defensively(#[case] stored: &str, #[case] expected: Role) {
        assert_eq!(row_to_profile(row(stored, None)).role, expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("cintasign"), Some(Brand::Cintasign))]
    #[case(Some("mystery"), Some(Brand::Bell))]
    fn brand_column_normalises(
        #[case] stored: Option<&str>,
        #[case] expected: Option<Brand>,
    ) {
        assert_eq!(row_to_profile(row("user", stored)).brand, expected);
    }
}
