//! PostgreSQL-backed [`CommentRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentAuthor, CommentId, CommentText, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CommentRow;
use super::pool::{DbPool, PoolError};
use super::schema::comments;

#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CommentRepositoryError {
    map_pool_error(error, CommentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn corrupt(field: &str, err: impl std::fmt::Display) -> CommentRepositoryError {
    CommentRepositoryError::query(format!("stored comment {field} invalid: {err}"))
}

fn row_to_comment(row: CommentRow) -> Result<Comment, CommentRepositoryError> {
    let CommentRow {
        id,
        body,
        created_at,
        author_id,
        author_username,
    } = row;
    let text = CommentText::new(body).map_err(|err| corrupt("text", err))?;
    let username = Username::new(author_username).map_err(|err| corrupt("author", err))?;
    Ok(Comment::from_parts(
        CommentId::from_uuid(id),
        text,
        created_at,
        CommentAuthor::new(UserId::from_uuid(author_id), username),
    ))
}

fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: *comment.id().as_uuid(),
        body: comment.text().as_ref().to_owned(),
        created_at: comment.created_at(),
        author_id: *comment.author().id().as_uuid(),
        author_username: comment.author().username().as_ref().to_owned(),
    }
}

fn uuids(ids: &[CommentId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        comments::table
            .find(*id.as_uuid())
            .select(CommentRow::as_select())
            .first::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_comment)
            .transpose()
    }

    async fn find_many(&self, ids: &[CommentId]) -> Result<Vec<Comment>, CommentRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = comments::table
            .filter(comments::id.eq_any(uuids(ids)))
            .select(CommentRow::as_select())
            .load::<CommentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut by_id: HashMap<Uuid, CommentRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        ids.iter()
            .filter_map(|id| by_id.remove(id.as_uuid()))
            .map(row_to_comment)
            .collect()
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(comments::table)
            .values(&comment_to_row(comment))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(comments::table.find(*id.as_uuid()))
            .set(comments::body.eq(text.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(comments::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete_many(&self, ids: &[CommentId]) -> Result<(), CommentRepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(comments::table.filter(comments::id.eq_any(uuids(ids))))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }
}
