//! Authorization guard.
//!
//! Pure predicates evaluated once per request against the identity resolved
//! from the session. Listings only require an identity; comments also require
//! the identity to be their author.

use std::fmt;

use super::{Authored, Error, User};

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No identity is attached to the request.
    NotAuthenticated,
    /// The identity is not the author of the targeted resource.
    NotOwner,
}

/// Guard rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denied {
    pub reason: DenialReason,
}

impl Denied {
    pub const fn not_authenticated() -> Self {
        Self {
            reason: DenialReason::NotAuthenticated,
        }
    }

    pub const fn not_owner() -> Self {
        Self {
            reason: DenialReason::NotOwner,
        }
    }
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            DenialReason::NotAuthenticated => write!(f, "authentication required"),
            DenialReason::NotOwner => write!(f, "only the author may modify this resource"),
        }
    }
}

impl std::error::Error for Denied {}

impl From<Denied> for Error {
    fn from(value: Denied) -> Self {
        match value.reason {
            DenialReason::NotAuthenticated => Error::unauthorized(value.to_string()),
            DenialReason::NotOwner => Error::forbidden(value.to_string()),
        }
    }
}

/// Succeed iff an identity is present.
pub fn require_authenticated(identity: Option<&User>) -> Result<&User, Denied> {
    identity.ok_or(Denied::not_authenticated())
}

/// Succeed iff an identity is present and authored `resource`.
///
/// Identities compare by id value, never by reference.
///
/// # Examples
/// ```
/// use campgrounds::domain::guard::{DenialReason, require_ownership};
/// use campgrounds::domain::{Comment, CommentText, User, UserId, Username};
///
/// let author = User::new(UserId::random(), Username::new("alice").unwrap());
/// let other = User::new(UserId::random(), Username::new("bob").unwrap());
/// let comment = Comment::new(
///     &author,
///     CommentText::new("hi").unwrap(),
///     &mockable::DefaultClock,
/// );
///
/// assert!(require_ownership(Some(&author), &comment).is_ok());
/// let denied = require_ownership(Some(&other), &comment).unwrap_err();
/// assert_eq!(denied.reason, DenialReason::NotOwner);
/// ```
pub fn require_ownership<'a, R>(identity: Option<&'a User>, resource: &R) -> Result<&'a User, Denied>
where
    R: Authored + ?Sized,
{
    let user = require_authenticated(identity)?;
    if user.id() == resource.author_id() {
        Ok(user)
    } else {
        Err(Denied::not_owner())
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the guard predicates.
    use super::*;
    use crate::domain::{ErrorCode, UserId, Username};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[derive(Debug, Clone)]
    struct Owned(UserId);

    impl Authored for Owned {
        fn author_id(&self) -> &UserId {
            &self.0
        }
    }

    fn user(name: &str) -> User {
        User::new(UserId::random(), Username::new(name).expect("valid username"))
    }

    #[given("an anonymous visitor")]
    fn an_anonymous_visitor() -> Option<User> {
        None
    }

    #[given("a signed in author")]
    fn a_signed_in_author() -> (Option<User>, Owned) {
        let author = user("alice");
        let resource = Owned(*author.id());
        (Some(author), resource)
    }

    #[given("a signed in stranger")]
    fn a_signed_in_stranger() -> (Option<User>, Owned) {
        (Some(user("mallory")), Owned(UserId::random()))
    }

    #[when("ownership is checked")]
    fn ownership_is_checked(setup: (Option<User>, Owned)) -> Result<UserId, Denied> {
        require_ownership(setup.0.as_ref(), &setup.1).map(|user| *user.id())
    }

    #[then("the request is denied as unauthenticated")]
    fn the_request_is_denied_as_unauthenticated(result: Result<UserId, Denied>) {
        assert_eq!(result, Err(Denied::not_authenticated()));
    }

    #[then("the request is denied as not the owner")]
    fn the_request_is_denied_as_not_the_owner(result: Result<UserId, Denied>) {
        assert_eq!(result, Err(Denied::not_owner()));
    }

    #[then("the author is approved")]
    fn the_author_is_approved(result: Result<UserId, Denied>) {
        assert!(result.is_ok(), "expected the author to pass");
    }

    #[rstest]
    fn anonymous_visitors_are_not_authenticated() {
        let identity = an_anonymous_visitor();
        let result = require_authenticated(identity.as_ref()).map(|user| *user.id());
        the_request_is_denied_as_unauthenticated(result);
    }

    #[rstest]
    fn signed_in_users_pass_authentication() {
        let identity = Some(user("alice"));
        let resolved = require_authenticated(identity.as_ref()).expect("identity present");
        assert_eq!(resolved.username().as_ref(), "alice");
    }

    #[rstest]
    fn anonymous_visitors_fail_ownership_as_unauthenticated() {
        let setup = (an_anonymous_visitor(), Owned(UserId::random()));
        let result = ownership_is_checked(setup);
        the_request_is_denied_as_unauthenticated(result);
    }

    #[rstest]
    fn authors_pass_ownership() {
        let setup = a_signed_in_author();
        let expected = setup.1.0;
        let result = ownership_is_checked(setup);
        assert_eq!(result, Ok(expected));
        the_author_is_approved(result);
    }

    #[rstest]
    fn strangers_fail_ownership() {
        let setup = a_signed_in_stranger();
        let result = ownership_is_checked(setup);
        the_request_is_denied_as_not_the_owner(result);
    }

    #[rstest]
    fn identities_compare_by_value() {
        let author = user("alice");
        let clone = User::new(*author.id(), author.username().clone());
        let resource = Owned(*author.id());

        assert!(require_ownership(Some(&clone), &resource).is_ok());
    }

    #[rstest]
    #[case(Denied::not_authenticated(), ErrorCode::Unauthorized)]
    #[case(Denied::not_owner(), ErrorCode::Forbidden)]
    fn denials_map_to_error_codes(#[case] denied: Denied, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(denied).code(), expected);
    }
}
