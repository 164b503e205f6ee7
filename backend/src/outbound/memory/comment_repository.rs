//! In-memory [`CommentRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, CommentText};

#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.comments.read().await.get(id).cloned())
    }

    async fn find_many(&self, ids: &[CommentId]) -> Result<Vec<Comment>, CommentRepositoryError> {
        let comments = self.comments.read().await;
        Ok(ids.iter().filter_map(|id| comments.get(id).cloned()).collect())
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut comments = self.comments.write().await;
        if comments.contains_key(comment.id()) {
            return Err(CommentRepositoryError::query(format!(
                "comment {} already exists",
                comment.id()
            )));
        }
        comments.insert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<bool, CommentRepositoryError> {
        let mut comments = self.comments.write().await;
        Ok(comments
            .get_mut(id)
            .map(|comment| comment.set_text(text.clone()))
            .is_some())
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(self.comments.write().await.remove(id).is_some())
    }

    async fn delete_many(&self, ids: &[CommentId]) -> Result<(), CommentRepositoryError> {
        let mut comments = self.comments.write().await;
        for id in ids {
            comments.remove(id);
        }
        Ok(())
    }
}
