//! HTTP inbound adapter exposing the campground pages.
//!
//! [`configure`] registers every page route. The app still has to supply the
//! [`state::HttpState`] data, a session middleware, and
//! [`crate::middleware::MethodOverride`] so HTML forms can reach the PUT and
//! DELETE routes.

pub mod accounts;
pub mod comments;
pub mod context;
pub mod error;
pub mod forms;
pub mod health;
pub mod listings;
pub mod redirect;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

/// Register the page routes.
///
/// `/campgrounds/new` is registered ahead of `/campgrounds/{id}` so the
/// literal segment wins.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use campgrounds::inbound::http::configure;
/// use campgrounds::inbound::http::state::{HttpState, HttpStatePorts};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::new(HttpStatePorts::in_memory())))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::landing)
        .service(accounts::register_form)
        .service(accounts::register)
        .service(accounts::login_form)
        .service(accounts::login)
        .service(accounts::logout)
        .service(listings::index)
        .service(listings::new_form)
        .service(listings::create)
        .service(listings::show)
        .service(listings::edit_form)
        .service(listings::update)
        .service(listings::destroy)
        .service(comments::new_form)
        .service(comments::create)
        .service(comments::edit_form)
        .service(comments::update)
        .service(comments::destroy);
}
