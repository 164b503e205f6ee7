//! Campground listings.
//!
//! A listing has no owner: any authenticated user may edit or delete it.
//! Its `comment_ids` sequence is only changed by the comment service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CommentId;
use super::identifier::define_identifier;

define_identifier! {
    /// Stable listing identifier stored as a UUID.
    pub struct ListingId;
}

/// Maximum length of a listing name.
pub const LISTING_NAME_MAX: usize = 120;
/// Maximum length of a listing description.
pub const LISTING_DESCRIPTION_MAX: usize = 10_000;

/// Validation errors returned by [`ListingDraft::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("image must not be empty")]
    EmptyImage,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

impl ListingValidationError {
    /// Name of the form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyImage => "image",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// Validated listing content as submitted on the new/edit forms.
///
/// # Examples
/// ```
/// use campgrounds::domain::ListingDraft;
///
/// let draft = ListingDraft::try_from_parts(" Lakeside ", "https://img/1.jpg", "Quiet")
///     .unwrap();
/// assert_eq!(draft.name(), "Lakeside");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    name: String,
    image: String,
    description: String,
}

impl ListingDraft {
    pub fn try_from_parts(
        name: &str,
        image: &str,
        description: &str,
    ) -> Result<Self, ListingValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListingValidationError::EmptyName);
        }
        if name.chars().count() > LISTING_NAME_MAX {
            return Err(ListingValidationError::NameTooLong {
                max: LISTING_NAME_MAX,
            });
        }

        let image = image.trim();
        if image.is_empty() {
            return Err(ListingValidationError::EmptyImage);
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(ListingValidationError::EmptyDescription);
        }
        if description.chars().count() > LISTING_DESCRIPTION_MAX {
            return Err(ListingValidationError::DescriptionTooLong {
                max: LISTING_DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            image: image.to_owned(),
            description: description.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A shared campground entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: ListingId,
    #[schema(example = "Granite Hill")]
    name: String,
    #[schema(example = "https://example.com/granite.jpg")]
    image: String,
    description: String,
    #[schema(value_type = Vec<String>)]
    comment_ids: Vec<CommentId>,
}

impl Listing {
    /// Build a fresh listing with no comments.
    pub fn new(id: ListingId, draft: ListingDraft) -> Self {
        let ListingDraft {
            name,
            image,
            description,
        } = draft;
        Self {
            id,
            name,
            image,
            description,
            comment_ids: Vec::new(),
        }
    }

    /// Rehydrate a stored listing.
    pub fn from_parts(
        id: ListingId,
        draft: ListingDraft,
        comment_ids: Vec<CommentId>,
    ) -> Self {
        let mut listing = Self::new(id, draft);
        listing.comment_ids = comment_ids;
        listing
    }

    /// Replace the editable fields, keeping identity and comments.
    pub fn apply(&mut self, draft: ListingDraft) {
        self.name = draft.name;
        self.image = draft.image;
        self.description = draft.description;
    }

    pub fn id(&self) -> &ListingId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn comment_ids(&self) -> &[CommentId] {
        &self.comment_ids
    }

    /// Whether the comment is attached to this listing.
    pub fn has_comment(&self, comment_id: &CommentId) -> bool {
        self.comment_ids.contains(comment_id)
    }

    /// Append a comment id unless it is already attached.
    pub fn attach_comment(&mut self, comment_id: CommentId) {
        if !self.has_comment(&comment_id) {
            self.comment_ids.push(comment_id);
        }
    }

    /// Remove every occurrence of a comment id.
    pub fn detach_comment(&mut self, comment_id: &CommentId) {
        self.comment_ids.retain(|id| id != comment_id);
    }
}
