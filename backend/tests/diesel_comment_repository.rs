//! `DieselCommentRepository` against embedded PostgreSQL.

#[path = "support/pg_embed.rs"]
mod pg_embed;

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use campgrounds::domain::ports::{CommentRepository, IdentityStore};
use campgrounds::domain::{Comment, CommentId, CommentText, Credentials, User};
use campgrounds::outbound::persistence::{DieselCommentRepository, DieselIdentityStore};
use embedded_postgres::{TestDatabase, provision};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn database() -> Option<TestDatabase> {
    provision("diesel_comment_repository")
}

fn text(body: &str) -> CommentText {
    CommentText::new(body).expect("valid comment text")
}

/// Comments reference their author, so a user must exist first.
async fn author(db: &TestDatabase) -> User {
    let credentials = Credentials::try_from_parts("ranger", "s3cret").expect("valid credentials");
    DieselIdentityStore::new(db.pool.clone())
        .register(&credentials)
        .await
        .expect("registration succeeds")
}

async fn seed(repo: &DieselCommentRepository, author: &User, bodies: &[&str]) -> Vec<CommentId> {
    let mut ids = Vec::new();
    for body in bodies {
        let comment = Comment::new(author, text(body), &DefaultClock);
        repo.insert(&comment).await.expect("insert succeeds");
        ids.push(*comment.id());
    }
    ids
}

#[rstest]
fn find_many_follows_the_requested_order(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = author(&db).await;
        let ids = seed(&repo, &author, &["first", "second", "third"]).await;
        let requested = [ids[2], CommentId::random(), ids[0], ids[1]];

        let found: Vec<String> = repo
            .find_many(&requested)
            .await
            .expect("query succeeds")
            .iter()
            .map(|comment| comment.text().as_ref().to_owned())
            .collect();

        assert_eq!(found, ["third", "first", "second"]);
        assert_eq!(repo.find_many(&[]).await, Ok(Vec::new()));
    });
}

#[rstest]
fn stored_comments_keep_their_author(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = author(&db).await;
        let ids = seed(&repo, &author, &["Bring bug spray"]).await;

        let stored = repo
            .find_by_id(&ids[0])
            .await
            .expect("query succeeds")
            .expect("comment exists");
        assert_eq!(stored.author().id(), author.id());
        assert_eq!(stored.author().username(), author.username());
        assert_eq!(stored.text().as_ref(), "Bring bug spray");
    });
}

#[rstest]
fn update_and_delete_report_whether_a_row_matched(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = author(&db).await;
        let ids = seed(&repo, &author, &["draft"]).await;
        let missing = CommentId::random();

        assert_eq!(repo.update_text(&ids[0], &text("final")).await, Ok(true));
        assert_eq!(repo.update_text(&missing, &text("final")).await, Ok(false));
        let stored = repo
            .find_by_id(&ids[0])
            .await
            .expect("query succeeds")
            .expect("comment exists");
        assert_eq!(stored.text().as_ref(), "final");

        assert_eq!(repo.delete(&ids[0]).await, Ok(true));
        assert_eq!(repo.delete(&ids[0]).await, Ok(false));
    });
}

#[rstest]
fn delete_many_removes_only_the_named_comments(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = author(&db).await;
        let ids = seed(&repo, &author, &["one", "two", "three"]).await;

        repo.delete_many(&[ids[0], ids[2], CommentId::random()])
            .await
            .expect("delete succeeds");

        let remaining = repo.find_many(&ids).await.expect("query succeeds");
        let remaining: Vec<CommentId> = remaining.iter().map(|comment| *comment.id()).collect();
        assert_eq!(remaining, [ids[1]]);
    });
}
