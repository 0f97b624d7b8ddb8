//! Builders that turn recipe and user rows into API responses for a given viewer.

use std::collections::{HashMap, HashSet};

use sea_orm::*;

use crate::config::AppConfig;
use crate::entity::{
    favorite, follow, ingredient, recipe, recipe_ingredient, recipe_tag, shopping_cart, tag, user,
};
use crate::error::AppError;
use crate::models::recipe::{RecipeIngredientResponse, RecipeResponse, ShortRecipeResponse};
use crate::models::tag::TagResponse;
use crate::models::user::UserResponse;
use crate::utils::media::media_url;

pub fn user_response(config: &AppConfig, user: user::Model, is_subscribed: bool) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        is_subscribed,
        avatar: user.avatar.as_deref().map(|name| media_url(config, name)),
    }
}

pub fn short_recipe(config: &AppConfig, recipe: &recipe::Model) -> ShortRecipeResponse {
    ShortRecipeResponse {
        id: recipe.id,
        name: recipe.name.clone(),
        image: media_url(config, &recipe.image),
        cooking_time: recipe.cooking_time,
    }
}

/// IDs among `author_ids` that `viewer` follows.
pub async fn followed_ids<C: ConnectionTrait>(
    db: &C,
    viewer: Option<i32>,
    author_ids: &[i32],
) -> Result<HashSet<i32>, AppError> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let rows = follow::Entity::find()
        .filter(follow::Column::UserId.eq(viewer))
        .filter(follow::Column::AuthorId.is_in(author_ids.to_vec()))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|f| f.author_id).collect())
}

pub async fn user_responses<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    viewer: Option<i32>,
    users: Vec<user::Model>,
) -> Result<Vec<UserResponse>, AppError> {
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    let followed = followed_ids(db, viewer, &ids).await?;

    Ok(users
        .into_iter()
        .map(|u| {
            let subscribed = followed.contains(&u.id);
            user_response(config, u, subscribed)
        })
        .collect())
}

pub async fn recipe_response<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    viewer: Option<i32>,
    recipe: recipe::Model,
) -> Result<RecipeResponse, AppError> {
    recipe_responses(db, config, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Recipe response missing".into()))
}

/// Build full recipe responses with a fixed number of queries regardless of list size.
pub async fn recipe_responses<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    viewer: Option<i32>,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeResponse>, AppError> {
    if recipes.is_empty() {
        return Ok(vec![]);
    }

    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<i32> = recipes
        .iter()
        .map(|r| r.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let followed = followed_ids(db, viewer, &author_ids).await?;

    let mut tags: HashMap<i32, Vec<TagResponse>> = HashMap::new();
    for (link, tag) in recipe_tag::Entity::find()
        .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.clone()))
        .order_by_asc(recipe_tag::Column::TagId)
        .find_also_related(tag::Entity)
        .all(db)
        .await?
    {
        if let Some(tag) = tag {
            tags.entry(link.recipe_id).or_default().push(tag.into());
        }
    }

    let mut ingredients: HashMap<i32, Vec<RecipeIngredientResponse>> = HashMap::new();
    for (line, ing) in recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids.clone()))
        .order_by_asc(recipe_ingredient::Column::IngredientId)
        .find_also_related(ingredient::Entity)
        .all(db)
        .await?
    {
        if let Some(ing) = ing {
            ingredients
                .entry(line.recipe_id)
                .or_default()
                .push(RecipeIngredientResponse {
                    id: ing.id,
                    name: ing.name,
                    measurement_unit: ing.measurement_unit,
                    amount: line.amount,
                });
        }
    }

    let (favorited, in_cart) = match viewer {
        Some(viewer) => {
            let favorited: HashSet<i32> = favorite::Entity::find()
                .filter(favorite::Column::UserId.eq(viewer))
                .filter(favorite::Column::RecipeId.is_in(recipe_ids.clone()))
                .all(db)
                .await?
                .into_iter()
                .map(|f| f.recipe_id)
                .collect();
            let in_cart: HashSet<i32> = shopping_cart::Entity::find()
                .filter(shopping_cart::Column::UserId.eq(viewer))
                .filter(shopping_cart::Column::RecipeId.is_in(recipe_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| c.recipe_id)
                .collect();
            (favorited, in_cart)
        }
        None => (HashSet::new(), HashSet::new()),
    };

    let mut data = Vec::with_capacity(recipes.len());
    for r in recipes {
        let author = authors
            .get(&r.author_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Author of recipe {} not found", r.id)))?;

        data.push(RecipeResponse {
            id: r.id,
            tags: tags.remove(&r.id).unwrap_or_default(),
            author: user_response(config, author, followed.contains(&r.author_id)),
            ingredients: ingredients.remove(&r.id).unwrap_or_default(),
            is_favorited: favorited.contains(&r.id),
            is_in_shopping_cart: in_cart.contains(&r.id),
            image: media_url(config, &r.image),
            name: r.name,
            text: r.text,
            cooking_time: r.cooking_time,
        });
    }

    Ok(data)
}
