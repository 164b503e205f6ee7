//! Registration, login, and session identity resolution.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::notice::INVALID_LOGIN;
use crate::domain::ports::{IdentityStore, IdentityStoreError};
use crate::domain::{Credentials, Error, User, UserId};

fn map_identity_error(err: IdentityStoreError) -> Error {
    match err {
        IdentityStoreError::Connection { message } => {
            error!(%message, "identity store unavailable");
            Error::service_unavailable(format!("identity store unavailable: {message}"))
        }
        IdentityStoreError::Query { message } => {
            error!(%message, "identity store query failed");
            Error::internal(format!("identity store error: {message}"))
        }
        err @ IdentityStoreError::DuplicateUsername { .. } => Error::conflict(err.to_string()),
        IdentityStoreError::InvalidCredentials => Error::unauthorized(INVALID_LOGIN),
    }
}

/// Account use-cases backed by an [`IdentityStore`].
#[derive(Clone)]
pub struct AccountService {
    identities: Arc<dyn IdentityStore>,
}

impl AccountService {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Create a user. A taken username yields [`crate::domain::ErrorCode::Conflict`].
    pub async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let user = self
            .identities
            .register(credentials)
            .await
            .map_err(map_identity_error)?;
        debug!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Verify credentials.
    ///
    /// Every mismatch surfaces the same generic message so callers cannot
    /// probe which usernames exist.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, Error> {
        self.identities
            .verify(credentials)
            .await
            .map_err(map_identity_error)
    }

    /// Resolve the identity persisted in a session.
    ///
    /// A user id whose record has disappeared resolves to `None`.
    pub async fn resolve(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.identities
            .find_by_id(id)
            .await
            .map_err(map_identity_error)
    }
}
