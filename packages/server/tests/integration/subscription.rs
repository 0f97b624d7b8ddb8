use serde_json::json;

use crate::common::{TestApp, routes};

/// Author with three recipes and a logged-in reader. Returns `(author_id, reader_token)`.
async fn author_with_recipes(app: &TestApp) -> (i32, String) {
    let admin = app.create_admin("admin").await;
    let tag = app.create_tag(&admin, "Dinner", "dinner").await;
    let salt = app.create_ingredient(&admin, "salt", "g").await;

    let (author_id, author) = app.create_user("author").await;
    for name in ["First", "Second", "Third"] {
        app.create_recipe(&author, name, &[tag], &[(salt, 5)]).await;
    }

    (author_id, app.create_authenticated_user("reader").await)
}

mod subscribe {
    use super::*;

    #[tokio::test]
    async fn subscribing_returns_the_author_with_recipes() {
        let app = TestApp::spawn().await;
        let (author_id, reader) = author_with_recipes(&app).await;

        let res = app
            .post_with_token(
                &format!("{}?recipes_limit=2", routes::subscribe(author_id)),
                &json!({}),
                &reader,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["id"], author_id);
        assert_eq!(res.body["username"], "author");
        assert_eq!(res.body["is_subscribed"], true);
        assert_eq!(res.body["recipes_count"], 3);
        let recipes = res.body["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0]["name"], "Third");
    }

    #[tokio::test]
    async fn cannot_subscribe_to_yourself() {
        let app = TestApp::spawn().await;
        let (id, token) = app.create_user("alice").await;

        let res = app
            .post_with_token(&routes::subscribe(id), &json!({}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_subscribe_twice() {
        let app = TestApp::spawn().await;
        let (author_id, _) = app.create_user("author").await;
        let reader = app.create_authenticated_user("reader").await;

        let first = app
            .post_with_token(&routes::subscribe(author_id), &json!({}), &reader)
            .await;
        assert_eq!(first.status, 201);

        let second = app
            .post_with_token(&routes::subscribe(author_id), &json!({}), &reader)
            .await;
        assert_eq!(second.status, 400);
    }

    #[tokio::test]
    async fn unknown_author_is_not_found() {
        let app = TestApp::spawn().await;
        let reader = app.create_authenticated_user("reader").await;

        let res = app
            .post_with_token(&routes::subscribe(9999), &json!({}), &reader)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn subscribing_requires_a_token() {
        let app = TestApp::spawn().await;
        let (author_id, _) = app.create_user("author").await;

        let res = app
            .post_without_token(&routes::subscribe(author_id), &json!({}))
            .await;

        assert_eq!(res.status, 401);
    }
}

mod unsubscribe {
    use super::*;

    #[tokio::test]
    async fn unsubscribing_removes_the_follow() {
        let app = TestApp::spawn().await;
        let (author_id, _) = app.create_user("author").await;
        let reader = app.create_authenticated_user("reader").await;
        app.post_with_token(&routes::subscribe(author_id), &json!({}), &reader)
            .await;

        let res = app
            .delete_with_token(&routes::subscribe(author_id), &reader)
            .await;
        assert_eq!(res.status, 204);

        let list = app.get_with_token(routes::SUBSCRIPTIONS, &reader).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unsubscribing_when_not_subscribed_is_rejected() {
        let app = TestApp::spawn().await;
        let (author_id, _) = app.create_user("author").await;
        let reader = app.create_authenticated_user("reader").await;

        let res = app
            .delete_with_token(&routes::subscribe(author_id), &reader)
            .await;

        assert_eq!(res.status, 400);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_followed_authors_with_limited_recipes() {
        let app = TestApp::spawn().await;
        let (author_id, reader) = author_with_recipes(&app).await;
        app.post_with_token(&routes::subscribe(author_id), &json!({}), &reader)
            .await;

        let res = app
            .get_with_token(
                &format!("{}?recipes_limit=1", routes::SUBSCRIPTIONS),
                &reader,
            )
            .await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["username"], "author");
        assert_eq!(data[0]["recipes"].as_array().unwrap().len(), 1);
        assert_eq!(data[0]["recipes_count"], 3);
        assert_eq!(res.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn invalid_recipes_limit_means_no_limit() {
        let app = TestApp::spawn().await;
        let (author_id, reader) = author_with_recipes(&app).await;
        app.post_with_token(&routes::subscribe(author_id), &json!({}), &reader)
            .await;

        let res = app
            .get_with_token(
                &format!("{}?recipes_limit=abc", routes::SUBSCRIPTIONS),
                &reader,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"][0]["recipes"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn listing_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::SUBSCRIPTIONS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}
