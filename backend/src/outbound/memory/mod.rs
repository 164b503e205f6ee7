//! In-process adapters used when no database is configured and in tests.
//!
//! State lives behind `tokio::sync::RwLock`; each port call takes the lock
//! once so read-modify-write sequences are atomic.

mod comment_repository;
mod identity_store;
mod listing_repository;

pub use comment_repository::InMemoryCommentRepository;
pub use identity_store::InMemoryIdentityStore;
pub use listing_repository::InMemoryListingRepository;
