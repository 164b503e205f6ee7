//! In-memory [`IdentityStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{IdentityStore, IdentityStoreError};
use crate::domain::{Credentials, User, UserId, Username};
use crate::outbound::credentials::{PasswordDigest, hash_password, verify_password};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    digest: PasswordDigest,
}

/// Users keyed by id with a username index.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    state: RwLock<Accounts>,
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, Account>,
    by_username: HashMap<Username, UserId>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored digest for a username, used by tests to prove it is unchanged.
    #[cfg(test)]
    pub(crate) async fn digest_for(&self, username: &Username) -> Option<PasswordDigest> {
        let state = self.state.read().await;
        let id = state.by_username.get(username)?;
        state.by_id.get(id).map(|account| account.digest.clone())
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.state.read().await.by_id.len()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn register(&self, credentials: &Credentials) -> Result<User, IdentityStoreError> {
        let username = credentials.username();
        if self.state.read().await.by_username.contains_key(username) {
            return Err(IdentityStoreError::duplicate_username(username.as_ref()));
        }

        let digest = hash_password(credentials.password())
            .await
            .map_err(|err| IdentityStoreError::query(err.to_string()))?;

        let mut state = self.state.write().await;
        // Re-check under the write lock; another registration may have won.
        if state.by_username.contains_key(username) {
            return Err(IdentityStoreError::duplicate_username(username.as_ref()));
        }
        let user = User::new(UserId::random(), username.clone());
        state.by_username.insert(username.clone(), *user.id());
        state.by_id.insert(
            *user.id(),
            Account {
                user: user.clone(),
                digest,
            },
        );
        Ok(user)
    }

    async fn verify(&self, credentials: &Credentials) -> Result<User, IdentityStoreError> {
        let account = {
            let state = self.state.read().await;
            state
                .by_username
                .get(credentials.username())
                .and_then(|id| state.by_id.get(id))
                .cloned()
        };
        let digest = account.as_ref().map(|account| account.digest.clone());
        let verified = verify_password(digest, credentials.password()).await;
        match account {
            Some(account) if verified => Ok(account.user),
            _ => Err(IdentityStoreError::invalid_credentials()),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityStoreError> {
        let state = self.state.read().await;
        Ok(state.by_id.get(id).map(|account| account.user.clone()))
    }
}
