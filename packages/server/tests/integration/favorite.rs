use serde_json::json;

use crate::common::{TestApp, routes};

async fn recipe_by_someone_else(app: &TestApp) -> (i32, String) {
    let admin = app.create_admin("admin").await;
    let tag = app.create_tag(&admin, "Dinner", "dinner").await;
    let rice = app.create_ingredient(&admin, "rice", "g").await;
    let author = app.create_authenticated_user("author").await;
    let id = app.create_recipe(&author, "Risotto", &[tag], &[(rice, 300)]).await;
    (id, app.create_authenticated_user("reader").await)
}

#[tokio::test]
async fn adding_a_favorite_returns_the_short_recipe() {
    let app = TestApp::spawn().await;
    let (id, reader) = recipe_by_someone_else(&app).await;

    let res = app
        .post_with_token(&routes::favorite(id), &json!({}), &reader)
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["name"], "Risotto");
    assert_eq!(res.body["cooking_time"], 25);
    assert!(res.body["image"].is_string());
    assert!(res.body.get("ingredients").is_none());

    let recipe = app.get_with_token(&routes::recipe(id), &reader).await;
    assert_eq!(recipe.body["is_favorited"], true);
}

#[tokio::test]
async fn adding_twice_is_rejected() {
    let app = TestApp::spawn().await;
    let (id, reader) = recipe_by_someone_else(&app).await;
    app.post_with_token(&routes::favorite(id), &json!({}), &reader)
        .await;

    let res = app
        .post_with_token(&routes::favorite(id), &json!({}), &reader)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn removing_a_favorite() {
    let app = TestApp::spawn().await;
    let (id, reader) = recipe_by_someone_else(&app).await;
    app.post_with_token(&routes::favorite(id), &json!({}), &reader)
        .await;

    let res = app.delete_with_token(&routes::favorite(id), &reader).await;
    assert_eq!(res.status, 204);

    let again = app.delete_with_token(&routes::favorite(id), &reader).await;
    assert_eq!(again.status, 400);
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let app = TestApp::spawn().await;
    let reader = app.create_authenticated_user("reader").await;

    let res = app
        .post_with_token(&routes::favorite(9999), &json!({}), &reader)
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn favorites_require_a_token() {
    let app = TestApp::spawn().await;
    let (id, _) = recipe_by_someone_else(&app).await;

    let res = app.post_without_token(&routes::favorite(id), &json!({})).await;
    assert_eq!(res.status, 401);

    let res = app.delete_without_token(&routes::favorite(id)).await;
    assert_eq!(res.status, 401);
}
