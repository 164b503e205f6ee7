//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentText};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
    }
}

/// Port for comment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Fetch comments in the order of `ids`, skipping ids with no record.
    async fn find_many(&self, ids: &[CommentId]) -> Result<Vec<Comment>, CommentRepositoryError>;

    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// Replace the text of a comment. Returns `false` if it does not exist.
    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<bool, CommentRepositoryError>;

    /// Returns `false` if the comment does not exist.
    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError>;

    async fn delete_many(&self, ids: &[CommentId]) -> Result<(), CommentRepositoryError>;
}
