//! PostgreSQL-backed [`IdentityStore`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IdentityStore, IdentityStoreError};
use crate::domain::{Credentials, User, UserId, Username};
use crate::outbound::credentials::{PasswordDigest, hash_password, verify_password};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";

#[derive(Clone)]
pub struct DieselIdentityStore {
    pool: DbPool,
}

impl DieselIdentityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IdentityStoreError {
    map_pool_error(error, IdentityStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> IdentityStoreError {
    map_diesel_error(
        error,
        IdentityStoreError::query,
        IdentityStoreError::connection,
    )
}

fn row_to_user(row: &UserRow) -> Result<User, IdentityStoreError> {
    let username = Username::new(&row.username)
        .map_err(|err| IdentityStoreError::query(format!("stored username invalid: {err}")))?;
    Ok(User::new(UserId::from_uuid(row.id), username))
}

#[async_trait]
impl IdentityStore for DieselIdentityStore {
    async fn register(&self, credentials: &Credentials) -> Result<User, IdentityStoreError> {
        let digest = hash_password(credentials.password())
            .await
            .map_err(|err| IdentityStoreError::query(err.to_string()))?;
        let user = User::new(UserId::random(), credentials.username().clone());

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: digest.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, USERNAME_CONSTRAINT) {
                    IdentityStoreError::duplicate_username(user.username().as_ref())
                } else {
                    diesel_error(err)
                }
            })?;
        Ok(user)
    }

    async fn verify(&self, credentials: &Credentials) -> Result<User, IdentityStoreError> {
        let row = {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            users::table
                .filter(users::username.eq(credentials.username().as_ref()))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?
        };
        let digest = row
            .as_ref()
            .map(|row| PasswordDigest::from_phc(row.password_hash.as_str()));
        let verified = verify_password(digest, credentials.password()).await;
        match row {
            Some(row) if verified => row_to_user(&row),
            _ => Err(IdentityStoreError::invalid_credentials()),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.as_ref().map(row_to_user).transpose()
    }
}
