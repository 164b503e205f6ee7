//! Landing page, registration, login, and logout.
//!
//! ```text
//! GET  /            landing view
//! GET  /register    registration form
//! POST /register    username=..&password=..
//! GET  /login       login form
//! POST /login       username=..&password=..
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::notice::{INVALID_LOGIN, SEE_YOU, WELCOME_BACK};
use crate::domain::{ApiResult, Credentials, Error, ErrorCode, Notice};
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::forms::{CredentialsForm, FormResult, accept};
use crate::inbound::http::redirect::{LISTINGS_PATH, LOGIN_PATH, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{FormView, LandingView};

const REGISTER_PATH: &str = "/register";

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing view", body = LandingView)),
    tags = ["accounts"],
    security([])
)]
#[get("/")]
pub async fn landing(ctx: RequestContext) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ctx.page(LandingView::default())?))
}

#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form view", body = FormView)),
    tags = ["accounts"],
    security([])
)]
#[get("/register")]
pub async fn register_form(ctx: RequestContext) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ctx.page(FormView::posting_to(REGISTER_PATH))?))
}

/// Create an account and sign it in.
///
/// Validation failures and duplicate usernames are flashed verbatim and send
/// the browser back to the form.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered and signed in; redirect to /campgrounds"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Identity store unavailable", body = Error)
    ),
    tags = ["accounts"],
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormResult<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let registered = match accept(form).and_then(Credentials::try_from) {
        Ok(credentials) => state.accounts.register(&credentials).await,
        Err(err) => Err(err),
    };
    match registered {
        Ok(user) => {
            session.persist_user(user.id())?;
            session.push_notice(Notice::welcome(user.username().as_ref()))?;
            info!(user_id = %user.id(), "user signed up");
            Ok(see_other(LISTINGS_PATH))
        }
        Err(err) if matches!(err.code(), ErrorCode::InvalidRequest | ErrorCode::Conflict) => {
            session.push_notice(Notice::error(err.message()))?;
            Ok(see_other(REGISTER_PATH))
        }
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form view", body = FormView)),
    tags = ["accounts"],
    security([])
)]
#[get("/login")]
pub async fn login_form(ctx: RequestContext) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ctx.page(FormView::posting_to(LOGIN_PATH))?))
}

/// Verify credentials and establish a session.
///
/// Every rejection, malformed input included, yields the same notice so the
/// response never reveals whether a username exists.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /campgrounds on success, /login otherwise"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Identity store unavailable", body = Error)
    ),
    tags = ["accounts"],
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormResult<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let verified = match accept(form).and_then(Credentials::try_from) {
        Ok(credentials) => state.accounts.login(&credentials).await,
        Err(_) => Err(Error::unauthorized(INVALID_LOGIN)),
    };
    match verified {
        Ok(user) => {
            session.persist_user(user.id())?;
            session.push_notice(Notice::success(WELCOME_BACK))?;
            Ok(see_other(LISTINGS_PATH))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            session.push_notice(Notice::error(INVALID_LOGIN))?;
            Ok(see_other(LOGIN_PATH))
        }
        Err(err) => Err(err),
    }
}

/// Forget the signed-in user. Safe to call when already signed out.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Redirect to the landing page")),
    tags = ["accounts"],
    security([])
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear_user();
    session.push_notice(Notice::success(SEE_YOU))?;
    Ok(see_other("/"))
}
