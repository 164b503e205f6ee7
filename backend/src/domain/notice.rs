//! One-shot user-facing notices ("flash messages").
//!
//! A notice is stored in the session by the handler that redirects and is
//! drained by the next page view.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shown when an anonymous visitor reaches a protected route.
pub const MUST_LOG_IN: &str = "You need to be logged in to do that.";
/// Shown when a user tries to change another user's comment.
pub const NOT_OWNER: &str = "You don't have permission to do that.";
/// Shown after a successful login.
pub const WELCOME_BACK: &str = "Welcome back!";
/// Shown after logging out.
pub const SEE_YOU: &str = "See you next time!";
/// Shown for any failed login, whether or not the username exists.
pub const INVALID_LOGIN: &str = "Invalid username or password.";
/// Shown when a listing or comment cannot be found.
pub const NOT_FOUND: &str = "That campground or comment could not be found.";

/// Severity bucket used by the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A single flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Greeting shown after registration.
    pub fn welcome(username: &str) -> Self {
        Self::success(format!("Welcome to Campgrounds, {username}!"))
    }
}

/// Notices grouped by kind, as handed to a page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notices {
    pub success: Vec<String>,
    pub error: Vec<String>,
}

impl FromIterator<Notice> for Notices {
    fn from_iter<I: IntoIterator<Item = Notice>>(iter: I) -> Self {
        let mut notices = Self::default();
        for notice in iter {
            match notice.kind {
                NoticeKind::Success => notices.success.push(notice.message),
                NoticeKind::Error => notices.error.push(notice.message),
            }
        }
        notices
    }
}
