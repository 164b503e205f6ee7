//! Port for listing persistence.

use async_trait::async_trait;

use crate::domain::{CommentId, Listing, ListingDraft, ListingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "listing repository query failed: {message}",
    }
}

/// Port for listing storage.
///
/// Methods addressing a single listing report a missing record through their
/// return value (`None` or `false`) rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Every listing, oldest first.
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError>;

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Replace the editable fields and return the updated listing.
    async fn update(
        &self,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Remove a listing and return what was stored.
    async fn delete(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Append a comment id as a single atomic write.
    ///
    /// Returns `false` when the listing does not exist.
    async fn attach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError>;

    /// Remove a comment id as a single atomic write.
    ///
    /// Returns `false` when the listing does not exist.
    async fn detach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError>;
}
