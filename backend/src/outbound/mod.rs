//! Outbound adapters implementing the domain ports.
//!
//! - **memory**: lock-guarded in-process stores for development and tests.
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **credentials**: Argon2 hashing shared by both identity stores.

pub mod credentials;
pub mod memory;
pub mod persistence;
