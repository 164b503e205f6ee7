//! Comments attached to listings.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::identifier::define_identifier;
use super::{User, UserId, Username};

define_identifier! {
    /// Stable comment identifier stored as a UUID.
    pub struct CommentId;
}

/// Maximum length of a comment body.
pub const COMMENT_TEXT_MAX: usize = 2_000;

/// Validation errors returned by [`CommentText::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment text must not be empty")]
    EmptyText,
    #[error("comment text must be at most {max} characters")]
    TextTooLong { max: usize },
}

/// Trimmed, non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    pub fn new(text: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        if trimmed.chars().count() > COMMENT_TEXT_MAX {
            return Err(CommentValidationError::TextTooLong {
                max: COMMENT_TEXT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = CommentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Snapshot of the author taken when the comment was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[schema(value_type = String)]
    id: UserId,
    #[schema(value_type = String)]
    username: Username,
}

impl CommentAuthor {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl From<&User> for CommentAuthor {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone())
    }
}

/// Resources whose modification is restricted to their author.
pub trait Authored {
    fn author_id(&self) -> &UserId;
}

/// A user comment on a listing.
///
/// ## Invariants
/// - `author` is fixed at construction and never changes afterwards.
/// - Only `text` may be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[schema(value_type = String)]
    id: CommentId,
    #[schema(value_type = String, example = "Great spot for stargazing")]
    text: CommentText,
    created_at: DateTime<Utc>,
    author: CommentAuthor,
}

impl Comment {
    /// Create a comment authored by `author`, stamped with the clock's time.
    pub fn new(author: &User, text: CommentText, clock: &dyn Clock) -> Self {
        Self {
            id: CommentId::random(),
            text,
            created_at: clock.utc(),
            author: CommentAuthor::from(author),
        }
    }

    /// Rehydrate a stored comment.
    pub fn from_parts(
        id: CommentId,
        text: CommentText,
        created_at: DateTime<Utc>,
        author: CommentAuthor,
    ) -> Self {
        Self {
            id,
            text,
            created_at,
            author,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn text(&self) -> &CommentText {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn author(&self) -> &CommentAuthor {
        &self.author
    }

    pub fn set_text(&mut self, text: CommentText) {
        self.text = text;
    }
}

impl Authored for Comment {
    fn author_id(&self) -> &UserId {
        self.author.id()
    }
}
