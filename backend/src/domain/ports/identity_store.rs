//! Port for registering and authenticating users.
//!
//! Adapters own password hashing: callers hand over plaintext
//! [`Credentials`] and only ever receive a [`User`] back.

use async_trait::async_trait;

use crate::domain::{Credentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity store adapters.
    pub enum IdentityStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "identity store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "identity store query failed: {message}",
        /// The username is already taken.
        DuplicateUsername { username: String } =>
            "A user with the given username is already registered",
        /// Unknown username or wrong password.
        InvalidCredentials =>
            "invalid username or password",
    }
}

/// Port for user identities and their credential secrets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create a user, hashing the password before it is stored.
    ///
    /// Fails with [`IdentityStoreError::DuplicateUsername`] without touching
    /// the existing record when the username is taken.
    async fn register(&self, credentials: &Credentials) -> Result<User, IdentityStoreError>;

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`IdentityStoreError::InvalidCredentials`].
    async fn verify(&self, credentials: &Credentials) -> Result<User, IdentityStoreError>;

    /// Resolve a session's user id back into a [`User`].
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityStoreError>;
}
