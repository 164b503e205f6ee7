//! Comment use-cases.
//!
//! Creation needs any authenticated user; edit, update, and delete also need
//! the caller to be the comment's author. A comment is only reachable through
//! the listing it is attached to.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::guard::require_ownership;
use crate::domain::listing_service::{listing_not_found, map_comment_error, map_listing_error};
use crate::domain::ports::{CommentRepository, ListingRepository};
use crate::domain::{Comment, CommentId, CommentText, Error, Listing, ListingId, User};

fn comment_not_found(id: &CommentId) -> Error {
    Error::not_found(format!("comment {id} not found"))
}

/// Comment service over the listing and comment repositories.
#[derive(Clone)]
pub struct CommentService {
    listings: Arc<dyn ListingRepository>,
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        comments: Arc<dyn CommentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            listings,
            comments,
            clock,
        }
    }

    async fn listing(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| listing_not_found(id))
    }

    /// Load a comment through its listing and check that `actor` wrote it.
    async fn owned_comment(
        &self,
        actor: &User,
        listing_id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<(Listing, Comment), Error> {
        let listing = self.listing(listing_id).await?;
        if !listing.has_comment(comment_id) {
            return Err(comment_not_found(comment_id));
        }
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| comment_not_found(comment_id))?;

        if let Err(denied) = require_ownership(Some(actor), &comment) {
            debug!(user_id = %actor.id(), %comment_id, "comment ownership denied");
            return Err(denied.into());
        }
        Ok((listing, comment))
    }

    /// The listing a new comment would be attached to.
    pub async fn target(&self, listing_id: &ListingId) -> Result<Listing, Error> {
        self.listing(listing_id).await
    }

    /// Create a comment authored by `actor` and attach it to the listing.
    pub async fn create(
        &self,
        actor: &User,
        listing_id: &ListingId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        self.listing(listing_id).await?;
        let comment = Comment::new(actor, text, self.clock.as_ref());
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;

        let attached = self
            .listings
            .attach_comment(listing_id, comment.id())
            .await
            .map_err(map_listing_error)?;
        if !attached {
            warn!(%listing_id, comment_id = %comment.id(), "listing vanished before attach");
            self.comments
                .delete(comment.id())
                .await
                .map_err(map_comment_error)?;
            return Err(listing_not_found(listing_id));
        }

        info!(%listing_id, comment_id = %comment.id(), user_id = %actor.id(), "comment created");
        Ok(comment)
    }

    /// Listing and comment for the edit form, owner only.
    pub async fn edit(
        &self,
        actor: &User,
        listing_id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<(Listing, Comment), Error> {
        self.owned_comment(actor, listing_id, comment_id).await
    }

    pub async fn update(
        &self,
        actor: &User,
        listing_id: &ListingId,
        comment_id: &CommentId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let (_, mut comment) = self.owned_comment(actor, listing_id, comment_id).await?;
        let updated = self
            .comments
            .update_text(comment_id, &text)
            .await
            .map_err(map_comment_error)?;
        if !updated {
            return Err(comment_not_found(comment_id));
        }
        comment.set_text(text);
        info!(%listing_id, %comment_id, "comment updated");
        Ok(comment)
    }

    /// Detach the comment from its listing, then delete it.
    pub async fn delete(
        &self,
        actor: &User,
        listing_id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<(), Error> {
        self.owned_comment(actor, listing_id, comment_id).await?;
        self.listings
            .detach_comment(listing_id, comment_id)
            .await
            .map_err(map_listing_error)?;
        self.comments
            .delete(comment_id)
            .await
            .map_err(map_comment_error)?;
        info!(%listing_id, %comment_id, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
