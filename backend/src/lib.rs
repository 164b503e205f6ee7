//! Campground listings backend.
//!
//! Visitors browse campgrounds; signed-in users add and edit listings and
//! leave comments that only their author may change. The crate is laid out
//! hexagonally: `domain` owns the entities, guards, and services, `inbound`
//! adapts them to HTTP, and `outbound` implements the ports in memory and on
//! PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
