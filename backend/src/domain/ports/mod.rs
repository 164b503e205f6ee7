//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants that services translate into domain errors.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod identity_store;
mod listing_repository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use identity_store::MockIdentityStore;
pub use identity_store::{IdentityStore, IdentityStoreError};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
