//! URL-encoded form bodies and their conversion into domain inputs.
//!
//! Every field is optional at the wire level so a missing field surfaces as a
//! validation notice from the domain constructor rather than an extractor
//! rejection. Unknown fields are refused.

use actix_web::web;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    CommentText, CommentValidationError, Credentials, CredentialsValidationError, Error,
    ListingDraft, ListingValidationError,
};

/// Outcome of extracting a form, inspected only after authentication.
pub type FormResult<T> = Result<web::Form<T>, actix_web::Error>;

fn field(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Unwrap an extracted form, reporting a malformed body as a validation error.
pub fn accept<T>(form: FormResult<T>) -> Result<T, Error> {
    form.map(web::Form::into_inner)
        .map_err(|err| Error::invalid_request(format!("malformed form body: {err}")))
}

/// `username` and `password` for the register and login forms.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = Error;

    fn try_from(form: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(field(form.username.as_ref()), field(form.password.as_ref()))
            .map_err(map_credentials_error)
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let name = match err {
        CredentialsValidationError::Username(_) => "username",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": name }))
}

/// Listing fields shared by the new and edit forms.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ListingForm {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<ListingForm> for ListingDraft {
    type Error = Error;

    fn try_from(form: ListingForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            field(form.name.as_ref()),
            field(form.image.as_ref()),
            field(form.description.as_ref()),
        )
        .map_err(map_listing_error)
    }
}

fn map_listing_error(err: ListingValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CommentForm {
    pub text: Option<String>,
}

impl TryFrom<CommentForm> for CommentText {
    type Error = Error;

    fn try_from(form: CommentForm) -> Result<Self, Self::Error> {
        Self::new(field(form.text.as_ref())).map_err(|err: CommentValidationError| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "text" }))
        })
    }
}
