//! Database-level guards that hold even when the API layer is bypassed.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use server::entity::{follow, recipe_ingredient, short_link};

use crate::common::TestApp;

async fn recipe_with_ingredient(app: &TestApp) -> (i32, i32) {
    let admin = app.create_admin("admin").await;
    let tag = app.create_tag(&admin, "Dinner", "dinner").await;
    let rice = app.create_ingredient(&admin, "rice", "g").await;
    let salt = app.create_ingredient(&admin, "salt", "g").await;
    let id = app.create_recipe(&admin, "Pilaf", &[tag], &[(rice, 200)]).await;
    (id, salt)
}

#[tokio::test]
async fn users_cannot_follow_themselves() {
    let app = TestApp::spawn().await;
    let (alice, _) = app.create_user("alice").await;

    let result = follow::ActiveModel {
        user_id: Set(alice),
        author_id: Set(alice),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&app.db)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn ingredient_amount_must_be_positive() {
    let app = TestApp::spawn().await;
    let (recipe_id, salt) = recipe_with_ingredient(&app).await;

    let result = recipe_ingredient::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(salt),
        amount: Set(0),
    }
    .insert(&app.db)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn short_codes_are_unique_ignoring_case() {
    let app = TestApp::spawn().await;
    let (first, _) = recipe_with_ingredient(&app).await;
    let admin = app.login("admin").await;
    let tag = app.create_tag(&admin, "Lunch", "lunch").await;
    let rye = app.create_ingredient(&admin, "rye", "g").await;
    let second = app.create_recipe(&admin, "Bread", &[tag], &[(rye, 500)]).await;

    let taken = short_link::Entity::find()
        .filter(short_link::Column::RecipeId.eq(first))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    let other = short_link::Entity::find()
        .filter(short_link::Column::RecipeId.eq(second))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    let mut active: short_link::ActiveModel = other.into();
    active.code = Set(taken.code.to_uppercase());
    let result = active.update(&app.db).await;

    assert!(result.is_err());
}
