//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{CommentRepository, IdentityStore, ListingRepository};
use crate::domain::{AccountService, CommentService, ListingService};
use crate::outbound::memory::{
    InMemoryCommentRepository, InMemoryIdentityStore, InMemoryListingRepository,
};

/// Parameter object bundling the port implementations behind the services.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identities: Arc<dyn IdentityStore>,
    pub listings: Arc<dyn ListingRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub clock: Arc<dyn Clock>,
}

impl HttpStatePorts {
    /// Ports backed by the in-memory adapters and the system clock.
    pub fn in_memory() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityStore::new()),
            listings: Arc::new(InMemoryListingRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub listings: ListingService,
    pub comments: CommentService,
}

impl HttpState {
    /// Wire the domain services over a set of ports.
    ///
    /// # Examples
    /// ```
    /// use campgrounds::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::in_memory());
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identities,
            listings,
            comments,
            clock,
        } = ports;
        Self {
            accounts: AccountService::new(identities),
            listings: ListingService::new(listings.clone(), comments.clone()),
            comments: CommentService::new(listings, comments, clock),
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
