//! Method override for HTML forms.
//!
//! Browsers only submit forms as GET or POST. A POST whose query string
//! carries `_method=PUT` or `_method=DELETE` is rewritten to that method
//! before routing. No route accepts PATCH, so it is not an override target.
//! Other requests pass through untouched.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};
use tracing::debug;
use url::form_urlencoded;

const OVERRIDE_PARAM: &str = "_method";

/// Middleware factory rewriting overridden POST requests.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use campgrounds::middleware::MethodOverride;
///
/// let app = App::new().wrap(MethodOverride);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

fn requested_override(query: &str) -> Option<Method> {
    let (_, value) = form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == OVERRIDE_PARAM)?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = requested_override(req.query_string()) {
                debug!(path = %req.path(), %method, "overriding form method");
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
