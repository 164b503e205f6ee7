//! Comment pages and mutations, nested under their listing.
//!
//! Writing a comment needs a signed-in user. Editing, updating, and deleting
//! one also need that user to be its author; a stranger is sent back with a
//! notice and never sees the edit form.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::{ApiResult, CommentId, CommentText, Error};
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::forms::{CommentForm, FormResult, accept};
use crate::inbound::http::listings::{listing_id, listing_path};
use crate::inbound::http::redirect::{Fallbacks, recover, see_other};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::CommentFormView;

fn comment_id(raw: &str) -> Result<CommentId, Error> {
    CommentId::new(raw).map_err(|_| Error::not_found(format!("comment {raw} not found")))
}

fn comment_path(listing: &str, comment: &str) -> String {
    format!("{}/comments/{comment}", listing_path(listing))
}

/// Redirect targets for a comment owned by `listing`: bad input returns to
/// `form`, denial returns to the referrer or the listing page.
fn fallbacks(req: &HttpRequest, listing: &str, form: String) -> Fallbacks {
    Fallbacks::new(req, form, listing_path(listing))
}

#[utoipa::path(
    get,
    path = "/campgrounds/{id}/comments/new",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "New comment form view", body = CommentFormView),
        (status = 303, description = "Not signed in or unknown listing")
    ),
    operation_id = "comment_new_form",
    tags = ["comments"]
)]
#[get("/campgrounds/{id}/comments/new")]
pub async fn new_form(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let listing = async {
        ctx.require_user()?;
        state.comments.target(&listing_id(&path)?).await
    }
    .await;
    match listing {
        Ok(listing) => {
            let action = format!("{}/comments", listing_path(&path));
            let view = CommentFormView {
                listing,
                comment: None,
                action,
            };
            Ok(HttpResponse::Ok().json(ctx.page(view)?))
        }
        Err(err) => recover(
            ctx.session(),
            err,
            &fallbacks(&req, &path, listing_path(&path)),
        ),
    }
}

/// Comment on a listing as the signed-in user.
#[utoipa::path(
    post,
    path = "/campgrounds/{id}/comments",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the listing. Also used for login and validation redirects"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    operation_id = "comment_create",
    tags = ["comments"]
)]
#[post("/campgrounds/{id}/comments")]
pub async fn create(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
    form: FormResult<CommentForm>,
) -> ApiResult<HttpResponse> {
    let created = async {
        let user = ctx.require_user()?;
        let id = listing_id(&path)?;
        let text = CommentText::try_from(accept(form)?)?;
        state.comments.create(user, &id, text).await
    }
    .await;
    match created {
        Ok(_) => Ok(see_other(&listing_path(&path))),
        Err(err) => recover(
            ctx.session(),
            err,
            &fallbacks(&req, &path, format!("{}/comments/new", listing_path(&path))),
        ),
    }
}

/// Edit form for the caller's own comment.
#[utoipa::path(
    get,
    path = "/campgrounds/{id}/comments/{comment_id}/edit",
    params(
        ("id" = String, Path, description = "Listing identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Edit comment form view", body = CommentFormView),
        (status = 303, description = "Not signed in, not the author, or unknown comment")
    ),
    operation_id = "comment_edit_form",
    tags = ["comments"]
)]
#[get("/campgrounds/{id}/comments/{comment_id}/edit")]
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_listing, raw_comment) = path.into_inner();
    let loaded = async {
        let user = ctx.require_user()?;
        let listing = listing_id(&raw_listing)?;
        let comment = comment_id(&raw_comment)?;
        state.comments.edit(user, &listing, &comment).await
    }
    .await;
    match loaded {
        Ok((listing, comment)) => {
            let action = format!("{}?_method=PUT", comment_path(&raw_listing, &raw_comment));
            let view = CommentFormView {
                listing,
                comment: Some(comment),
                action,
            };
            Ok(HttpResponse::Ok().json(ctx.page(view)?))
        }
        Err(err) => recover(
            ctx.session(),
            err,
            &fallbacks(&req, &raw_listing, listing_path(&raw_listing)),
        ),
    }
}

/// Replace the text of the caller's own comment.
#[utoipa::path(
    put,
    path = "/campgrounds/{id}/comments/{comment_id}",
    params(
        ("id" = String, Path, description = "Listing identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the listing. Also used for denial and validation redirects"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    operation_id = "comment_update",
    tags = ["comments"]
)]
#[put("/campgrounds/{id}/comments/{comment_id}")]
pub async fn update(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<(String, String)>,
    form: FormResult<CommentForm>,
) -> ApiResult<HttpResponse> {
    let (raw_listing, raw_comment) = path.into_inner();
    let updated = async {
        let user = ctx.require_user()?;
        let listing = listing_id(&raw_listing)?;
        let comment = comment_id(&raw_comment)?;
        let text = CommentText::try_from(accept(form)?)?;
        state.comments.update(user, &listing, &comment, text).await
    }
    .await;
    match updated {
        Ok(_) => Ok(see_other(&listing_path(&raw_listing))),
        Err(err) => recover(
            ctx.session(),
            err,
            &fallbacks(
                &req,
                &raw_listing,
                format!("{}/edit", comment_path(&raw_listing, &raw_comment)),
            ),
        ),
    }
}

/// Delete the caller's own comment.
#[utoipa::path(
    delete,
    path = "/campgrounds/{id}/comments/{comment_id}",
    params(
        ("id" = String, Path, description = "Listing identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses(
        (status = 303, description = "Deleted; redirect to the listing. Also used for denial redirects"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    operation_id = "comment_destroy",
    tags = ["comments"]
)]
#[delete("/campgrounds/{id}/comments/{comment_id}")]
pub async fn destroy(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_listing, raw_comment) = path.into_inner();
    let deleted = async {
        let user = ctx.require_user()?;
        let listing = listing_id(&raw_listing)?;
        let comment = comment_id(&raw_comment)?;
        state.comments.delete(user, &listing, &comment).await
    }
    .await;
    match deleted {
        Ok(()) => Ok(see_other(&listing_path(&raw_listing))),
        Err(err) => recover(
            ctx.session(),
            err,
            &fallbacks(&req, &raw_listing, listing_path(&raw_listing)),
        ),
    }
}
