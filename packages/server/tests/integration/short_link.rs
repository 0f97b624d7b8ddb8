use crate::common::{FRONTEND_URL, PUBLIC_URL, TestApp, routes};

async fn published_recipe(app: &TestApp) -> i32 {
    let admin = app.create_admin("admin").await;
    let tag = app.create_tag(&admin, "Dinner", "dinner").await;
    let rice = app.create_ingredient(&admin, "rice", "g").await;
    let token = app.create_authenticated_user("alice").await;
    app.create_recipe(&token, "Pilaf", &[tag], &[(rice, 200)]).await
}

/// Short code from a `get-link` response.
fn code_of(link: &str) -> String {
    link.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn get_link_is_stable_and_public() {
    let app = TestApp::spawn().await;
    let id = published_recipe(&app).await;

    let first = app.get_without_token(&routes::get_link(id)).await;
    assert_eq!(first.status, 200);
    let link = first.body["short-link"].as_str().unwrap().to_string();
    assert!(link.starts_with(&format!("{PUBLIC_URL}/s/")));
    assert_eq!(code_of(&link).len(), 16);

    let second = app.get_without_token(&routes::get_link(id)).await;
    assert_eq!(second.body["short-link"], link.as_str());
}

#[tokio::test]
async fn short_code_redirects_to_the_recipe_page() {
    let app = TestApp::spawn().await;
    let id = published_recipe(&app).await;
    let link = app.get_without_token(&routes::get_link(id)).await;
    let code = code_of(link.body["short-link"].as_str().unwrap());

    let res = app.get_without_token(&routes::short(&code)).await;

    assert_eq!(res.status, 302);
    assert_eq!(
        res.header("location"),
        Some(format!("{FRONTEND_URL}/recipes/{id}").as_str())
    );
}

#[tokio::test]
async fn codes_match_case_insensitively_and_with_trailing_slash() {
    let app = TestApp::spawn().await;
    let id = published_recipe(&app).await;
    let link = app.get_without_token(&routes::get_link(id)).await;
    let code = code_of(link.body["short-link"].as_str().unwrap());

    let upper = app
        .get_without_token(&routes::short(&code.to_uppercase()))
        .await;
    assert_eq!(upper.status, 302);

    let slash = app
        .get_without_token(&format!("{}/", routes::short(&code)))
        .await;
    assert_eq!(slash.status, 302);
}

#[tokio::test]
async fn unknown_or_malformed_codes_are_not_found() {
    let app = TestApp::spawn().await;

    let unknown = app.get_without_token(&routes::short("doesnotexist")).await;
    assert_eq!(unknown.status, 404);

    let malformed = app.get_without_token(&routes::short("bad%20code")).await;
    assert_eq!(malformed.status, 404);
}

#[tokio::test]
async fn link_disappears_with_the_recipe() {
    let app = TestApp::spawn().await;
    let id = published_recipe(&app).await;
    let link = app.get_without_token(&routes::get_link(id)).await;
    let code = code_of(link.body["short-link"].as_str().unwrap());

    let token = app.login("alice").await;
    app.delete_with_token(&routes::recipe(id), &token).await;

    let res = app.get_without_token(&routes::short(&code)).await;
    assert_eq!(res.status, 404);

    let res = app.get_without_token(&routes::get_link(id)).await;
    assert_eq!(res.status, 404);
}

/// Single-character codes leave 36 case-insensitive slots to fill.
mod collisions {
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
    use server::entity::{recipe, short_link};

    use super::*;

    const CODE_CHARS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

    /// Insert one bare recipe per code, each already holding that short code.
    async fn occupy_codes(app: &TestApp, author_id: i32, codes: impl Iterator<Item = char>) {
        let now = chrono::Utc::now();
        for code in codes {
            let recipe = recipe::ActiveModel {
                author_id: Set(author_id),
                name: Set(format!("Filler {code}")),
                text: Set("Filler".to_string()),
                image: Set("recipes/filler.png".to_string()),
                cooking_time: Set(1),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&app.db)
            .await
            .unwrap();

            short_link::ActiveModel {
                recipe_id: Set(recipe.id),
                code: Set(code.to_string()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&app.db)
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn colliding_codes_are_retried_until_a_free_one_is_found() {
        let app = TestApp::spawn_with(|config| {
            config.short_link.code_length = 1;
            config.short_link.max_attempts = 500;
        })
        .await;
        let admin = app.create_admin("admin").await;
        let tag = app.create_tag(&admin, "Dinner", "dinner").await;
        let rice = app.create_ingredient(&admin, "rice", "g").await;
        let (alice_id, alice) = app.create_user("alice").await;
        occupy_codes(&app, alice_id, CODE_CHARS.chars().filter(|&c| c != 'q')).await;

        let id = app.create_recipe(&alice, "Pilaf", &[tag], &[(rice, 200)]).await;

        let link = app.get_without_token(&routes::get_link(id)).await;
        let code = code_of(link.body["short-link"].as_str().unwrap());
        assert_eq!(code.to_lowercase(), "q");
    }

    #[tokio::test]
    async fn exhausted_attempts_fail_without_creating_the_recipe() {
        let app = TestApp::spawn_with(|config| {
            config.short_link.code_length = 1;
            config.short_link.max_attempts = 3;
        })
        .await;
        let admin = app.create_admin("admin").await;
        let tag = app.create_tag(&admin, "Dinner", "dinner").await;
        let rice = app.create_ingredient(&admin, "rice", "g").await;
        let (alice_id, alice) = app.create_user("alice").await;
        occupy_codes(&app, alice_id, CODE_CHARS.chars()).await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &crate::common::recipe_body("Pilaf", &[tag], &[(rice, 200)]),
                &alice,
            )
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "INTERNAL_ERROR");
        let recipes = recipe::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(recipes, CODE_CHARS.len() as u64);
    }
}
