//! PostgreSQL persistence adapters using Diesel with `diesel-async` and `bb8`.
//!
//! Repositories only translate between row structs and domain values. Rows
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module.
//!
//! ```ignore
//! use campgrounds::outbound::persistence::{DbPool, DieselListingRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campgrounds")).await?;
//! let listings = DieselListingRepository::new(pool);
//! ```

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_identity_store;
mod diesel_listing_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_identity_store::DieselIdentityStore;
pub use diesel_listing_repository::DieselListingRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
