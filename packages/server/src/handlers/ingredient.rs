use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::ingredient;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::ingredient::*;
use crate::models::shared::escape_like;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Ingredients",
    operation_id = "listIngredients",
    summary = "List ingredients",
    description = "Returns ingredients ordered by ID, optionally filtered by a case-insensitive name prefix. Not paginated.",
    params(IngredientQuery),
    responses((status = 200, description = "Matching ingredients", body = Vec<IngredientResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let mut select = ingredient::Entity::find();

    if let Some(ref name) = query.name {
        let term = escape_like(name.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::Name)))
                    .like(LikeExpr::new(format!("{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let data = select
        .order_by_asc(ingredient::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Ingredients",
    operation_id = "getIngredient",
    summary = "Get an ingredient by ID",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, AppError> {
    let model = ingredient::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Ingredients",
    operation_id = "createIngredient",
    summary = "Create an ingredient",
    description = "Administrators only. Name and unit are trimmed; a pair equal to an existing one ignoring case is a conflict.",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Ingredient already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_ingredient(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_ingredient(&payload)?;

    let name = payload.name.trim().to_string();
    let unit = payload.measurement_unit.trim().to_string();

    if ingredient_exists(&state.db, &name, &unit).await? {
        return Err(ingredient_conflict());
    }

    let new_ingredient = ingredient::ActiveModel {
        name: Set(name),
        measurement_unit: Set(unit),
        ..Default::default()
    };

    let model = new_ingredient
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ingredient_conflict(),
            _ => e.into(),
        })?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(model))))
}

/// Case-insensitive lookup of a (name, unit) pair.
async fn ingredient_exists<C: ConnectionTrait>(
    db: &C,
    name: &str,
    unit: &str,
) -> Result<bool, AppError> {
    let count = ingredient::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(ingredient::Column::Name))).eq(name.to_lowercase()),
        )
        .filter(
            Expr::expr(Func::lower(Expr::col(ingredient::Column::MeasurementUnit)))
                .eq(unit.to_lowercase()),
        )
        .count(db)
        .await?;
    Ok(count > 0)
}

fn ingredient_conflict() -> AppError {
    AppError::Conflict("An ingredient with this name and unit already exists".into())
}
