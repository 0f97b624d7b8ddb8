use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use common::ShoppingItem;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{ingredient, recipe_ingredient, shopping_cart};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::recipe::find_recipe;
use crate::models::recipe::ShortRecipeResponse;
use crate::state::AppState;
use crate::utils::recipe::short_recipe;

#[utoipa::path(
    post,
    path = "/{id}/shopping_cart",
    tag = "Shopping Cart",
    operation_id = "addToShoppingCart",
    summary = "Add a recipe to the shopping cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added", body = ShortRecipeResponse),
        (status = 400, description = "Already in the cart (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn add_to_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = find_recipe(&state.db, id).await?;

    let txn = state.db.begin().await?;

    let existing = shopping_cart::Entity::find_by_id((auth_user.user_id, recipe.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(already_in_cart());
    }

    let entry = shopping_cart::ActiveModel {
        user_id: Set(auth_user.user_id),
        recipe_id: Set(recipe.id),
        added_at: Set(chrono::Utc::now()),
    };

    match entry.insert(&txn).await {
        Ok(_) => {
            txn.commit().await?;
            Ok((
                StatusCode::CREATED,
                Json(short_recipe(&state.config, &recipe)),
            ))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(already_in_cart())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/{id}/shopping_cart",
    tag = "Shopping Cart",
    operation_id = "removeFromShoppingCart",
    summary = "Remove a recipe from the shopping cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 400, description = "Not in the cart (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn remove_from_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = find_recipe(&state.db, id).await?;

    let result = shopping_cart::Entity::delete_by_id((auth_user.user_id, recipe.id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Validation(
            "Recipe is not in the shopping cart".into(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Aggregated ingredient row of the caller's cart.
#[derive(Debug, FromQueryResult)]
struct ShoppingRow {
    name: String,
    measurement_unit: String,
    total_amount: i64,
}

#[utoipa::path(
    get,
    path = "/download_shopping_cart",
    tag = "Shopping Cart",
    operation_id = "downloadShoppingCart",
    summary = "Download the shopping list",
    description = "Plain-text attachment with one `name: total unit` line per ingredient, summed over every recipe in the cart and ordered by name.",
    responses(
        (status = 200, description = "Shopping list", body = String, content_type = "text/plain"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn download_shopping_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = recipe_ingredient::Entity::find()
        .select_only()
        .column(ingredient::Column::Name)
        .column(ingredient::Column::MeasurementUnit)
        .column_as(recipe_ingredient::Column::Amount.sum(), "total_amount")
        .join(
            JoinType::InnerJoin,
            recipe_ingredient::Relation::Ingredient.def(),
        )
        .filter(
            recipe_ingredient::Column::RecipeId.in_subquery(
                SeaQuery::select()
                    .column(shopping_cart::Column::RecipeId)
                    .from(shopping_cart::Entity)
                    .and_where(shopping_cart::Column::UserId.eq(auth_user.user_id))
                    .to_owned(),
            ),
        )
        .group_by(ingredient::Column::Name)
        .group_by(ingredient::Column::MeasurementUnit)
        .order_by_asc(ingredient::Column::Name)
        .order_by_asc(ingredient::Column::MeasurementUnit)
        .into_model::<ShoppingRow>()
        .all(&state.db)
        .await?;

    let items: Vec<ShoppingItem> = rows
        .into_iter()
        .map(|r| ShoppingItem {
            name: r.name,
            measurement_unit: r.measurement_unit,
            amount: r.total_amount,
        })
        .collect();

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        common::shopping::render(&items),
    ))
}

fn already_in_cart() -> AppError {
    AppError::Validation("Recipe is already in the shopping cart".into())
}
