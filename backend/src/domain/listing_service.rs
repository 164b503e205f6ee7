//! Listing use-cases.
//!
//! Listings carry no owner, so every mutating operation only needs an
//! authenticated [`User`]; the caller proves authentication by passing one.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, ListingRepository, ListingRepositoryError,
};
use crate::domain::{Comment, Error, Listing, ListingDraft, ListingId, User};

pub(crate) fn map_listing_error(err: ListingRepositoryError) -> Error {
    match err {
        ListingRepositoryError::Connection { message } => {
            error!(%message, "listing repository unavailable");
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            error!(%message, "listing repository query failed");
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_error(err: CommentRepositoryError) -> Error {
    match err {
        CommentRepositoryError::Connection { message } => {
            error!(%message, "comment repository unavailable");
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            error!(%message, "comment repository query failed");
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

pub(crate) fn listing_not_found(id: &ListingId) -> Error {
    Error::not_found(format!("listing {id} not found"))
}

/// A listing together with its comments in attachment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListingDetail {
    pub listing: Listing,
    pub comments: Vec<Comment>,
}

/// Listing service over the listing and comment repositories.
#[derive(Clone)]
pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ListingService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self { listings, comments }
    }

    pub async fn list(&self) -> Result<Vec<Listing>, Error> {
        self.listings.list().await.map_err(map_listing_error)
    }

    /// Load a listing or fail with [`crate::domain::ErrorCode::NotFound`].
    pub async fn get(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| listing_not_found(id))
    }

    /// Load a listing and populate its comments.
    pub async fn show(&self, id: &ListingId) -> Result<ListingDetail, Error> {
        let listing = self.get(id).await?;
        let comments = self
            .comments
            .find_many(listing.comment_ids())
            .await
            .map_err(map_comment_error)?;
        Ok(ListingDetail { listing, comments })
    }

    pub async fn create(&self, actor: &User, draft: ListingDraft) -> Result<Listing, Error> {
        let listing = Listing::new(ListingId::random(), draft);
        self.listings
            .insert(&listing)
            .await
            .map_err(map_listing_error)?;
        info!(listing_id = %listing.id(), user_id = %actor.id(), "listing created");
        Ok(listing)
    }

    pub async fn update(
        &self,
        actor: &User,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<Listing, Error> {
        let listing = self
            .listings
            .update(id, draft)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| listing_not_found(id))?;
        info!(listing_id = %id, user_id = %actor.id(), "listing updated");
        Ok(listing)
    }

    /// Delete a listing and then the comments it referenced.
    pub async fn delete(&self, actor: &User, id: &ListingId) -> Result<(), Error> {
        let removed = self
            .listings
            .delete(id)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| listing_not_found(id))?;
        self.comments
            .delete_many(removed.comment_ids())
            .await
            .map_err(map_comment_error)?;
        info!(listing_id = %id, user_id = %actor.id(), "listing deleted");
        Ok(())
    }
}
