//! JSON page views.
//!
//! Each GET page returns the data a template would be rendered with: the
//! signed-in user, the notices queued for this view, and page-specific fields
//! flattened alongside them.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Comment, Listing, Notices, User};

/// Envelope shared by every page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub current_user: Option<User>,
    pub notices: Notices,
    #[serde(flatten)]
    pub data: T,
}

/// Landing page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandingView {
    pub title: &'static str,
}

impl Default for LandingView {
    fn default() -> Self {
        Self {
            title: "Campgrounds",
        }
    }
}

/// A blank form and where it submits to.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub action: String,
}

impl FormView {
    pub fn posting_to(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingsView {
    pub listings: Vec<Listing>,
}

/// Edit form prefilled with a listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingFormView {
    pub listing: Listing,
    pub action: String,
}

/// Comment form for a listing; `comment` is present when editing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentFormView {
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, Username};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn page_flattens_data_next_to_the_envelope() {
        let user = User::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
            Username::new("alice").expect("valid username"),
        );
        let page = Page {
            current_user: Some(user),
            notices: Notices {
                success: vec!["Welcome back!".to_owned()],
                error: Vec::new(),
            },
            data: FormView::posting_to("/campgrounds"),
        };

        let value = serde_json::to_value(&page).expect("serialize page");
        assert_eq!(
            value,
            json!({
                "currentUser": {
                    "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                    "username": "alice"
                },
                "notices": { "success": ["Welcome back!"], "error": [] },
                "action": "/campgrounds"
            })
        );
    }

    #[rstest]
    fn anonymous_pages_carry_a_null_user() {
        let page = Page {
            current_user: None,
            notices: Notices::default(),
            data: LandingView::default(),
        };
        let value = serde_json::to_value(&page).expect("serialize page");
        assert!(value["currentUser"].is_null());
        assert_eq!(value["title"], "Campgrounds");
    }
}
