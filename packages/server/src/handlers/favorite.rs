use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::favorite;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::recipe::find_recipe;
use crate::models::recipe::ShortRecipeResponse;
use crate::state::AppState;
use crate::utils::recipe::short_recipe;

#[utoipa::path(
    post,
    path = "/{id}/favorite",
    tag = "Favorites",
    operation_id = "addFavorite",
    summary = "Add a recipe to favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added", body = ShortRecipeResponse),
        (status = 400, description = "Already a favorite (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn add_favorite(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = find_recipe(&state.db, id).await?;

    let txn = state.db.begin().await?;

    let existing = favorite::Entity::find_by_id((auth_user.user_id, recipe.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(already_favorite());
    }

    let new_favorite = favorite::ActiveModel {
        user_id: Set(auth_user.user_id),
        recipe_id: Set(recipe.id),
        added_at: Set(chrono::Utc::now()),
    };

    match new_favorite.insert(&txn).await {
        Ok(_) => {
            txn.commit().await?;
            Ok((
                StatusCode::CREATED,
                Json(short_recipe(&state.config, &recipe)),
            ))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(already_favorite())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/{id}/favorite",
    tag = "Favorites",
    operation_id = "removeFavorite",
    summary = "Remove a recipe from favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 400, description = "Not a favorite (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn remove_favorite(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = find_recipe(&state.db, id).await?;

    let result = favorite::Entity::delete_by_id((auth_user.user_id, recipe.id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Validation(
            "Recipe is not in favorites".into(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn already_favorite() -> AppError {
    AppError::Validation("Recipe is already in favorites".into())
}
