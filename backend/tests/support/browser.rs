//! In-process app and a cookie-carrying client for page flow tests.

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use campgrounds::Trace;
use campgrounds::inbound::http::configure;
use campgrounds::inbound::http::session_config::SessionSettings;
use campgrounds::inbound::http::state::{HttpState, HttpStatePorts};
use campgrounds::middleware::MethodOverride;
use serde_json::Value;

/// The production middleware stack over the in-memory stores.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    App::new()
        .app_data(web::Data::new(HttpState::new(HttpStatePorts::in_memory())))
        .wrap(session.middleware())
        .wrap(MethodOverride)
        .wrap(Trace)
        .configure(configure)
}

/// Client that replays the latest session cookie, like a browser would.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn send<S>(&mut self, app: &S, req: test::TestRequest) -> ServiceResponse
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }
        res
    }

    pub async fn get_json<S>(&mut self, app: &S, uri: &str) -> Value
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = self.send(app, test::TestRequest::get().uri(uri)).await;
        assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
        test::read_body_json(res).await
    }

    pub async fn post_form<S>(
        &mut self,
        app: &S,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> ServiceResponse
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, test::TestRequest::post().uri(uri).set_form(fields))
            .await
    }

    pub async fn register<S>(&mut self, app: &S, username: &str, password: &str) -> ServiceResponse
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.post_form(
            app,
            "/register",
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Create a listing and return its id, read back from the index.
    pub async fn create_listing<S>(&mut self, app: &S, name: &str) -> String
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = self
            .post_form(
                app,
                "/campgrounds",
                &[
                    ("name", name),
                    ("image", "https://example.com/site.jpg"),
                    ("description", "Pitches by the water"),
                ],
            )
            .await;
        assert_eq!(location(&res), "/campgrounds");
        let index = self.get_json(app, "/campgrounds").await;
        index["listings"]
            .as_array()
            .and_then(|listings| listings.iter().find(|listing| listing["name"] == name))
            .and_then(|listing| listing["id"].as_str())
            .expect("created listing in index")
            .to_owned()
    }

    /// Comment on a listing and return the new comment's id.
    pub async fn create_comment<S>(&mut self, app: &S, listing: &str, text: &str) -> String
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = self
            .post_form(
                app,
                &format!("/campgrounds/{listing}/comments"),
                &[("text", text)],
            )
            .await;
        assert_eq!(location(&res), format!("/campgrounds/{listing}"));
        let page = self.get_json(app, &format!("/campgrounds/{listing}")).await;
        page["comments"]
            .as_array()
            .and_then(|comments| comments.iter().find(|comment| comment["text"] == text))
            .and_then(|comment| comment["id"].as_str())
            .expect("created comment on listing page")
            .to_owned()
    }
}

/// Redirect target of a 303 response.
pub fn location(res: &ServiceResponse) -> String {
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "expected a redirect");
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Error notices carried by a page view.
pub fn error_notices(page: &Value) -> Vec<String> {
    page["notices"]["error"]
        .as_array()
        .map(|messages| {
            messages
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
