//! Listing pages and mutations.
//!
//! Browsing needs no identity. Creating, editing, and deleting need a signed-in
//! user, any user: listings have no owner.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::{ApiResult, Error, ListingDetail, ListingDraft, ListingId};
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::forms::{FormResult, ListingForm, accept};
use crate::inbound::http::redirect::{Fallbacks, LISTINGS_PATH, recover, see_other};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{FormView, ListingFormView, ListingsView};

const NEW_LISTING_PATH: &str = "/campgrounds/new";

/// Parse a listing id from the path; malformed ids are simply not found.
pub(crate) fn listing_id(raw: &str) -> Result<ListingId, Error> {
    ListingId::new(raw).map_err(|_| Error::not_found(format!("listing {raw} not found")))
}

pub(crate) fn listing_path(id: &str) -> String {
    format!("{LISTINGS_PATH}/{id}")
}

/// All listings.
#[utoipa::path(
    get,
    path = "/campgrounds",
    responses(
        (status = 200, description = "Listings index view", body = ListingsView),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    operation_id = "listing_index",
    tags = ["listings"],
    security([])
)]
#[get("/campgrounds")]
pub async fn index(state: web::Data<HttpState>, ctx: RequestContext) -> ApiResult<HttpResponse> {
    let listings = state.listings.list().await?;
    Ok(HttpResponse::Ok().json(ctx.page(ListingsView { listings })?))
}

#[utoipa::path(
    get,
    path = "/campgrounds/new",
    responses(
        (status = 200, description = "New listing form view", body = FormView),
        (status = 303, description = "Not signed in; redirect to /login")
    ),
    operation_id = "listing_new_form",
    tags = ["listings"]
)]
#[get("/campgrounds/new")]
pub async fn new_form(req: HttpRequest, ctx: RequestContext) -> ApiResult<HttpResponse> {
    match ctx.require_user() {
        Ok(_) => Ok(HttpResponse::Ok().json(ctx.page(FormView::posting_to(LISTINGS_PATH))?)),
        Err(err) => recover(ctx.session(), err, &Fallbacks::form(&req, LISTINGS_PATH)),
    }
}

/// Create a listing.
#[utoipa::path(
    post,
    path = "/campgrounds",
    request_body(content = ListingForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to /campgrounds. Also used for login and validation redirects"),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    operation_id = "listing_create",
    tags = ["listings"]
)]
#[post("/campgrounds")]
pub async fn create(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: FormResult<ListingForm>,
) -> ApiResult<HttpResponse> {
    let created = async {
        let user = ctx.require_user()?;
        let draft = ListingDraft::try_from(accept(form)?)?;
        state.listings.create(user, draft).await
    }
    .await;
    match created {
        Ok(_) => Ok(see_other(LISTINGS_PATH)),
        Err(err) => recover(ctx.session(), err, &Fallbacks::form(&req, NEW_LISTING_PATH)),
    }
}

/// One listing with its comments.
#[utoipa::path(
    get,
    path = "/campgrounds/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing detail view", body = ListingDetail),
        (status = 303, description = "Unknown listing; redirect to /campgrounds")
    ),
    operation_id = "listing_show",
    tags = ["listings"],
    security([])
)]
#[get("/campgrounds/{id}")]
pub async fn show(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let detail = async {
        let id = listing_id(&path)?;
        state.listings.show(&id).await
    }
    .await;
    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ctx.page(detail)?)),
        Err(err) => recover(ctx.session(), err, &Fallbacks::form(&req, LISTINGS_PATH)),
    }
}

#[utoipa::path(
    get,
    path = "/campgrounds/{id}/edit",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Edit listing form view", body = ListingFormView),
        (status = 303, description = "Not signed in or unknown listing")
    ),
    operation_id = "listing_edit_form",
    tags = ["listings"]
)]
#[get("/campgrounds/{id}/edit")]
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let listing = async {
        ctx.require_user()?;
        state.listings.get(&listing_id(&path)?).await
    }
    .await;
    match listing {
        Ok(listing) => {
            let action = format!("{}?_method=PUT", listing_path(&path));
            Ok(HttpResponse::Ok().json(ctx.page(ListingFormView { listing, action })?))
        }
        Err(err) => recover(ctx.session(), err, &Fallbacks::form(&req, listing_path(&path))),
    }
}

/// Replace a listing's content.
#[utoipa::path(
    put,
    path = "/campgrounds/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body(content = ListingForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the listing. Also used for login and validation redirects"),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    operation_id = "listing_update",
    tags = ["listings"]
)]
#[put("/campgrounds/{id}")]
pub async fn update(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
    form: FormResult<ListingForm>,
) -> ApiResult<HttpResponse> {
    let updated = async {
        let user = ctx.require_user()?;
        let id = listing_id(&path)?;
        let draft = ListingDraft::try_from(accept(form)?)?;
        state.listings.update(user, &id, &draft).await
    }
    .await;
    match updated {
        Ok(_) => Ok(see_other(&listing_path(&path))),
        Err(err) => recover(
            ctx.session(),
            err,
            &Fallbacks::form(&req, format!("{}/edit", listing_path(&path))),
        ),
    }
}

/// Delete a listing and its comments.
#[utoipa::path(
    delete,
    path = "/campgrounds/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to /campgrounds"),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    operation_id = "listing_destroy",
    tags = ["listings"]
)]
#[delete("/campgrounds/{id}")]
pub async fn destroy(
    req: HttpRequest,
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let deleted = async {
        let user = ctx.require_user()?;
        state.listings.delete(user, &listing_id(&path)?).await
    }
    .await;
    match deleted {
        Ok(()) => Ok(see_other(LISTINGS_PATH)),
        Err(err) => recover(ctx.session(), err, &Fallbacks::form(&req, listing_path(&path))),
    }
}
