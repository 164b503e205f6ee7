//! In-memory [`ListingRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{CommentId, Listing, ListingDraft, ListingId};

/// Listings kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self.listings.read().await.clone())
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let listings = self.listings.read().await;
        Ok(listings.iter().find(|listing| listing.id() == id).cloned())
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        if listings.iter().any(|stored| stored.id() == listing.id()) {
            return Err(ListingRepositoryError::query(format!(
                "listing {} already exists",
                listing.id()
            )));
        }
        listings.push(listing.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        Ok(listings
            .iter_mut()
            .find(|listing| listing.id() == id)
            .map(|listing| {
                listing.apply(draft.clone());
                listing.clone()
            }))
    }

    async fn delete(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        let position = listings.iter().position(|listing| listing.id() == id);
        Ok(position.map(|index| listings.remove(index)))
    }

    async fn attach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        Ok(match listings.iter_mut().find(|listing| listing.id() == id) {
            Some(listing) => {
                listing.attach_comment(*comment_id);
                true
            }
            None => false,
        })
    }

    async fn detach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        Ok(match listings.iter_mut().find(|listing| listing.id() == id) {
            Some(listing) => {
                listing.detach_comment(comment_id);
                true
            }
            None => false,
        })
    }
}
