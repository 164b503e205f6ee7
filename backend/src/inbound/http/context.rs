//! Per-request identity and notice context.
//!
//! [`RequestContext`] resolves the signed-in user from the session once per
//! request. A session pointing at an account the store no longer knows is
//! treated as signed out and cleared.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tracing::warn;

use crate::domain::guard::require_authenticated;
use crate::domain::{Error, Notices, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::Page;

/// Identity and session for the current request.
pub struct RequestContext {
    session: SessionContext,
    user: Option<User>,
}

impl RequestContext {
    pub fn new(session: SessionContext, user: Option<User>) -> Self {
        Self { session, user }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in user, or an `Unauthorized` error.
    pub fn require_user(&self) -> Result<&User, Error> {
        require_authenticated(self.user.as_ref()).map_err(Error::from)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Wrap page data, draining the notices queued for this view.
    pub fn page<T: Serialize>(&self, data: T) -> Result<Page<T>, Error> {
        let notices: Notices = self.session.take_notices()?.into_iter().collect();
        Ok(Page {
            current_user: self.user.clone(),
            notices,
            data,
        })
    }
}

async fn resolve_user(state: &HttpState, session: &SessionContext) -> Result<Option<User>, Error> {
    let Some(user_id) = session.user_id()? else {
        return Ok(None);
    };
    let user = state.accounts.resolve(&user_id).await?;
    if user.is_none() {
        warn!(%user_id, "session refers to an unknown user");
        session.clear_user();
    }
    Ok(user)
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let user = resolve_user(&state, &session).await?;
            Ok(Self::new(session, user))
        })
    }
}
