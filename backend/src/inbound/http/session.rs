//! Session helpers keeping handlers free of framework-specific logic.
//!
//! The cookie session carries two things: the signed-in user's id and a
//! queue of one-shot notices waiting for the next page view.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Notice, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const NOTICES_KEY: &str = "notices";

fn session_error(action: &str, error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to {action} session: {error}"))
}

/// Newtype wrapper exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session to `user_id`, rotating the session first.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| session_error("persist", error))
    }

    /// The user id stored in the session, if any.
    ///
    /// A malformed id is treated as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| session_error("read", error))?;
        Ok(raw.and_then(|value| match UserId::new(&value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Forget the signed-in user. Calling it on a signed-out session is a no-op.
    pub fn clear_user(&self) {
        if self.0.remove(USER_ID_KEY).is_some() {
            self.0.renew();
        }
    }

    /// Queue a notice for the next page view.
    pub fn push_notice(&self, notice: Notice) -> Result<(), Error> {
        let mut pending = self.pending_notices()?;
        pending.push(notice);
        self.0
            .insert(NOTICES_KEY, pending)
            .map_err(|error| session_error("store notices in", error))
    }

    /// Remove and return all queued notices.
    pub fn take_notices(&self) -> Result<Vec<Notice>, Error> {
        let pending = self.pending_notices()?;
        if !pending.is_empty() {
            self.0.remove(NOTICES_KEY);
        }
        Ok(pending)
    }

    fn pending_notices(&self) -> Result<Vec<Notice>, Error> {
        self.0
            .get::<Vec<Notice>>(NOTICES_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| session_error("read notices from", error))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    let id = UserId::new(FIXTURE_ID).expect("fixture id");
                    session.persist_user(&id)?;
                    session.push_notice(Notice::success("hello"))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let id = session.user_id()?;
                    Ok::<_, Error>(
                        HttpResponse::Ok().body(id.map(|id| id.to_string()).unwrap_or_default()),
                    )
                }),
            )
            .route(
                "/notices",
                web::get().to(|session: SessionContext| async move {
                    let notices = session.take_notices()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(notices.len().to_string()))
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.clear_user();
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_ID_KEY, "not-a-uuid")
                        .expect("set invalid user id");
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, FIXTURE_ID);
    }

    #[actix_web::test]
    async fn notices_are_drained_once() {
        let app = test::init_service(session_test_app()).await;
        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login).expect("session cookie set");

        let first = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/notices")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let drained = session_cookie(&first).expect("session cookie rewritten");
        assert_eq!(test::read_body(first).await, "1");

        let second = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/notices")
                .cookie(drained)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(second).await, "0");
    }

    #[actix_web::test]
    async fn logout_forgets_the_user() {
        let app = test::init_service(session_test_app()).await;
        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login).expect("session cookie set");

        let logout = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let cleared = session_cookie(&logout).expect("session cookie rewritten");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "");
    }

    #[actix_web::test]
    async fn tampered_user_id_reads_as_signed_out() {
        let app = test::init_service(session_test_app()).await;
        let tamper =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&tamper).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "");
    }
}
