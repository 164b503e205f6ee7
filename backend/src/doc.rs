//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] describes the page routes, the form bodies they accept, and the
//! JSON views they return. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Comment, CommentAuthor, Error, ErrorCode, Listing, ListingDetail, NoticeKind, Notices, User,
};
use crate::inbound::http::forms::{CommentForm, CredentialsForm, ListingForm};
use crate::inbound::http::views::{
    CommentFormView, FormView, LandingView, ListingFormView, ListingsView,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campgrounds",
        description = "Community campground listings with session sign-in and owner-scoped comments. \
Every page view also carries `currentUser` and `notices` next to the fields documented here."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::landing,
        crate::inbound::http::accounts::register_form,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::listings::index,
        crate::inbound::http::listings::new_form,
        crate::inbound::http::listings::create,
        crate::inbound::http::listings::show,
        crate::inbound::http::listings::edit_form,
        crate::inbound::http::listings::update,
        crate::inbound::http::listings::destroy,
        crate::inbound::http::comments::new_form,
        crate::inbound::http::comments::create,
        crate::inbound::http::comments::edit_form,
        crate::inbound::http::comments::update,
        crate::inbound::http::comments::destroy,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Listing,
        ListingDetail,
        Comment,
        CommentAuthor,
        Notices,
        NoticeKind,
        CredentialsForm,
        ListingForm,
        CommentForm,
        LandingView,
        FormView,
        ListingsView,
        ListingFormView,
        CommentFormView,
    )),
    tags(
        (name = "accounts", description = "Registration, sign-in, and sign-out"),
        (name = "listings", description = "Campground listings"),
        (name = "comments", description = "Comments on a listing, editable by their author"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
