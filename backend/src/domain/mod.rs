//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP adapter and
//! the persistence adapters, the authorization guard, and the services that
//! orchestrate the ports.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - User, Listing, Comment — aggregates.
//! - guard — authentication and ownership predicates.
//! - AccountService, ListingService, CommentService — use-cases.

pub mod account_service;
pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod guard;
mod identifier;
pub mod listing;
pub mod listing_service;
pub mod notice;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::comment::{
    Authored, Comment, CommentAuthor, CommentId, CommentText, CommentValidationError,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::IdentifierValidationError;
pub use self::listing::{Listing, ListingDraft, ListingId, ListingValidationError};
pub use self::listing_service::{ListingDetail, ListingService};
pub use self::notice::{Notice, NoticeKind, Notices};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use campgrounds::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
