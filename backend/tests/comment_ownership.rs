//! Comments may only be changed by the user who wrote them.

#[path = "support/browser.rs"]
mod browser;

use actix_web::test;
use browser::{Browser, error_notices, location, test_app};
use campgrounds::domain::notice::{MUST_LOG_IN, NOT_OWNER};
use rstest::rstest;
use serde_json::Value;

struct Thread {
    listing: String,
    comment: String,
}

impl Thread {
    fn page(&self) -> String {
        format!("/campgrounds/{}", self.listing)
    }

    fn comment_path(&self) -> String {
        format!("/campgrounds/{}/comments/{}", self.listing, self.comment)
    }
}

/// `author` registers, lists a campground, and comments on it.
async fn seed<S>(app: &S, author: &mut Browser) -> Thread
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    author.register(app, "ranger", "s3cret").await;
    let listing = author.create_listing(app, "Granite Hill").await;
    let comment = author.create_comment(app, &listing, "Bring bug spray").await;
    Thread { listing, comment }
}

fn only_comment(page: &Value) -> &Value {
    let comments = page["comments"].as_array().expect("comments array");
    assert_eq!(comments.len(), 1);
    &comments[0]
}

#[rstest]
#[actix_web::test]
async fn comments_are_stamped_with_their_author() {
    let app = test::init_service(test_app()).await;
    let mut author = Browser::new();
    let thread = seed(&app, &mut author).await;

    let page = Browser::new().get_json(&app, &thread.page()).await;
    let comment = only_comment(&page);
    assert_eq!(comment["author"]["username"], "ranger");
    assert_eq!(comment["text"], "Bring bug spray");
    assert!(comment["createdAt"].is_string());
}

#[rstest]
#[case::edit_form("GET", "/edit")]
#[case::update("PUT", "")]
#[case::delete("DELETE", "")]
#[actix_web::test]
async fn strangers_are_turned_away(#[case] method: &str, #[case] suffix: &str) {
    let app = test::init_service(test_app()).await;
    let mut author = Browser::new();
    let thread = seed(&app, &mut author).await;

    let mut stranger = Browser::new();
    stranger.register(&app, "hiker", "pa55").await;
    let req = match method {
        "GET" => test::TestRequest::get().uri(&format!("{}{suffix}", thread.comment_path())),
        _ => test::TestRequest::post()
            .uri(&format!("{}?_method={method}", thread.comment_path()))
            .set_form([("text", "Vandalised")]),
    };
    let res = stranger.send(&app, req).await;
    assert_eq!(location(&res), thread.page());

    let page = stranger.get_json(&app, &thread.page()).await;
    assert_eq!(error_notices(&page), vec![NOT_OWNER.to_owned()]);
    assert_eq!(only_comment(&page)["text"], "Bring bug spray");
}

#[rstest]
#[actix_web::test]
async fn anonymous_comment_changes_require_login() {
    let app = test::init_service(test_app()).await;
    let mut author = Browser::new();
    let thread = seed(&app, &mut author).await;

    let mut visitor = Browser::new();
    let res = visitor
        .post_form(
            &app,
            &format!("{}?_method=DELETE", thread.comment_path()),
            &[],
        )
        .await;
    assert_eq!(location(&res), "/login");
    let login = visitor.get_json(&app, "/login").await;
    assert_eq!(error_notices(&login), vec![MUST_LOG_IN.to_owned()]);

    let page = visitor.get_json(&app, &thread.page()).await;
    only_comment(&page);
}

#[rstest]
#[actix_web::test]
async fn the_author_can_edit_and_delete() {
    let app = test::init_service(test_app()).await;
    let mut author = Browser::new();
    let thread = seed(&app, &mut author).await;

    let form = author
        .get_json(&app, &format!("{}/edit", thread.comment_path()))
        .await;
    assert_eq!(form["comment"]["text"], "Bring bug spray");

    let res = author
        .post_form(
            &app,
            &format!("{}?_method=PUT", thread.comment_path()),
            &[("text", "Bring extra bug spray")],
        )
        .await;
    assert_eq!(location(&res), thread.page());
    let page = author.get_json(&app, &thread.page()).await;
    let comment = only_comment(&page);
    assert_eq!(comment["text"], "Bring extra bug spray");
    assert_eq!(comment["author"]["username"], "ranger");

    let res = author
        .post_form(
            &app,
            &format!("{}?_method=DELETE", thread.comment_path()),
            &[],
        )
        .await;
    assert_eq!(location(&res), thread.page());
    let page = author.get_json(&app, &thread.page()).await;
    assert!(page["comments"].as_array().is_some_and(Vec::is_empty));
}

#[rstest]
#[actix_web::test]
async fn comments_are_scoped_to_their_listing() {
    let app = test::init_service(test_app()).await;
    let mut author = Browser::new();
    let thread = seed(&app, &mut author).await;
    let other = author.create_listing(&app, "Pine Flats").await;

    let res = author
        .post_form(
            &app,
            &format!("/campgrounds/{other}/comments/{}?_method=PUT", thread.comment),
            &[("text", "Wrong thread")],
        )
        .await;
    assert_eq!(location(&res), "/campgrounds");

    let page = author.get_json(&app, &thread.page()).await;
    assert_eq!(only_comment(&page)["text"], "Bring bug spray");
}
