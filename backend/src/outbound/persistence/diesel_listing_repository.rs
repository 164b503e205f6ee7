//! PostgreSQL-backed [`ListingRepository`].
//!
//! Comment ids are appended and removed with single `UPDATE` statements so
//! concurrent comment writers never overwrite each other's ids.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{CommentId, Listing, ListingDraft, ListingId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ListingRow, ListingUpdate, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

const ATTACH_COMMENT_SQL: &str = "UPDATE listings \
     SET comment_ids = CASE WHEN $1 = ANY(comment_ids) THEN comment_ids \
                            ELSE array_append(comment_ids, $1) END \
     WHERE id = $2";

const DETACH_COMMENT_SQL: &str =
    "UPDATE listings SET comment_ids = array_remove(comment_ids, $1) WHERE id = $2";

#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ListingRepositoryError {
    map_pool_error(error, ListingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_diesel_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

fn row_to_listing(row: ListingRow) -> Result<Listing, ListingRepositoryError> {
    let ListingRow {
        id,
        name,
        image,
        description,
        comment_ids,
    } = row;
    let draft = ListingDraft::try_from_parts(&name, &image, &description)
        .map_err(|err| ListingRepositoryError::query(format!("stored listing invalid: {err}")))?;
    Ok(Listing::from_parts(
        ListingId::from_uuid(id),
        draft,
        comment_ids.into_iter().map(CommentId::from_uuid).collect(),
    ))
}

impl DieselListingRepository {
    async fn modify_comment_ids(
        &self,
        statement: &'static str,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = sql_query(statement)
            .bind::<sql_types::Uuid, _>(*comment_id.as_uuid())
            .bind::<sql_types::Uuid, _>(*id.as_uuid())
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = listings::table
            .order((listings::created_at.asc(), listings::id.asc()))
            .select(ListingRow::as_select())
            .load::<ListingRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_listing).collect()
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        listings::table
            .find(*id.as_uuid())
            .select(ListingRow::as_select())
            .first::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_listing)
            .transpose()
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewListingRow {
            id: *listing.id().as_uuid(),
            name: listing.name(),
            image: listing.image(),
            description: listing.description(),
            comment_ids: listing
                .comment_ids()
                .iter()
                .map(|id| *id.as_uuid())
                .collect(),
        };
        diesel::insert_into(listings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update(
        &self,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ListingUpdate {
            name: draft.name(),
            image: draft.image(),
            description: draft.description(),
        };
        diesel::update(listings::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(ListingRow::as_returning())
            .get_result::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_listing)
            .transpose()
    }

    async fn delete(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(listings::table.find(*id.as_uuid()))
            .returning(ListingRow::as_returning())
            .get_result::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_listing)
            .transpose()
    }

    async fn attach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError> {
        self.modify_comment_ids(ATTACH_COMMENT_SQL, id, comment_id)
            .await
    }

    async fn detach_comment(
        &self,
        id: &ListingId,
        comment_id: &CommentId,
    ) -> Result<bool, ListingRepositoryError> {
        self.modify_comment_ids(DETACH_COMMENT_SQL, id, comment_id)
            .await
    }
}
