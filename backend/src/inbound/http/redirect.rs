//! Redirect responses and the error-to-redirect policy for page routes.
//!
//! Page routes answer most failures with `303 See Other` plus a notice for
//! the next view:
//!
//! | Error            | Destination                        | Notice              |
//! |------------------|------------------------------------|---------------------|
//! | `Unauthorized`   | `/login`                           | must log in         |
//! | `Forbidden`      | referring page, else fallback      | not the owner       |
//! | `NotFound`       | `/campgrounds`                     | not found           |
//! | `InvalidRequest` | the form that was submitted        | validation message  |
//!
//! Anything else propagates and is rendered by the `ResponseError` impl.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use tracing::debug;
use url::Url;

use crate::domain::notice::{MUST_LOG_IN, NOT_FOUND, NOT_OWNER};
use crate::domain::{Error, ErrorCode, Notice};
use crate::inbound::http::session::SessionContext;

pub const LOGIN_PATH: &str = "/login";
pub const LISTINGS_PATH: &str = "/campgrounds";

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Path and query of a same-origin `Referer`, if the request carries one.
pub fn referer_path(req: &HttpRequest) -> Option<String> {
    let raw = req.headers().get(header::REFERER)?.to_str().ok()?;
    let referer = Url::parse(raw).ok()?;
    let host = req.connection_info().host().to_owned();
    let referer_host = match referer.port() {
        Some(port) => format!("{}:{port}", referer.host_str()?),
        None => referer.host_str()?.to_owned(),
    };
    if referer_host != host {
        debug!(%raw, %host, "ignoring cross-origin referer");
        return None;
    }
    Some(match referer.query() {
        Some(query) => format!("{}?{query}", referer.path()),
        None => referer.path().to_owned(),
    })
}

/// Where a failed page request sends the browser.
pub struct Fallbacks {
    /// The form to return to when input is rejected.
    pub form: String,
    /// Where to go back to when the user may not touch the resource.
    pub back: String,
}

impl Fallbacks {
    /// Return to `form` on bad input and to `form`'s referrer on denial.
    pub fn form(req: &HttpRequest, form: impl Into<String>) -> Self {
        let form = form.into();
        Self::new(req, form.clone(), form)
    }

    /// Explicit destinations, preferring the `Referer` for the back link.
    pub fn new(req: &HttpRequest, form: String, back: impl Into<String>) -> Self {
        Self {
            form,
            back: referer_path(req).unwrap_or_else(|| back.into()),
        }
    }
}

/// Turn a recoverable error into a redirect carrying a notice.
///
/// Errors outside the table above are returned unchanged.
pub fn recover(
    session: &SessionContext,
    err: Error,
    fallbacks: &Fallbacks,
) -> Result<HttpResponse, Error> {
    let (notice, location) = match err.code() {
        ErrorCode::Unauthorized => (MUST_LOG_IN, LOGIN_PATH),
        ErrorCode::Forbidden => (NOT_OWNER, fallbacks.back.as_str()),
        ErrorCode::NotFound => (NOT_FOUND, LISTINGS_PATH),
        ErrorCode::InvalidRequest => (err.message(), fallbacks.form.as_str()),
        _ => return Err(err),
    };
    debug!(code = ?err.code(), message = err.message(), %location, "redirecting after error");
    session.push_notice(Notice::error(notice))?;
    Ok(see_other(location))
}
