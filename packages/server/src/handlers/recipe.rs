use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::Query;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{
    favorite, ingredient, recipe, recipe_ingredient, recipe_tag, shopping_cart, short_link, tag,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::recipe::*;
use crate::models::shared::{Pagination, page_bounds, page_offset};
use crate::state::AppState;
use crate::utils::media::store_data_uri;
use crate::utils::recipe::{recipe_response, recipe_responses};
use crate::utils::short_link::{create_for_recipe, find_or_create, short_url};

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List recipes",
    description = "Paginated recipes, newest first. `tags` may be repeated and matches recipes carrying any of the slugs. `is_favorited` and `is_in_shopping_cart` restrict to the caller's lists and are ignored for anonymous callers.",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "List of recipes", body = RecipeListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_recipes(
    auth_user: Option<AuthUser>,
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.limit);
    let viewer = auth_user.map(|u| u.user_id);

    let mut select = recipe::Entity::find();

    if let Some(author) = query.author {
        select = select.filter(recipe::Column::AuthorId.eq(author));
    }

    if !query.tags.is_empty() {
        select = select.filter(
            recipe::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(recipe_tag::Column::RecipeId)
                    .from(recipe_tag::Entity)
                    .and_where(
                        recipe_tag::Column::TagId.in_subquery(
                            SeaQuery::select()
                                .column(tag::Column::Id)
                                .from(tag::Entity)
                                .and_where(tag::Column::Slug.is_in(query.tags.clone()))
                                .to_owned(),
                        ),
                    )
                    .to_owned(),
            ),
        );
    }

    if let Some(viewer) = viewer {
        if query.is_favorited.is_some_and(|v| v != 0) {
            select = select.filter(
                recipe::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(favorite::Column::RecipeId)
                        .from(favorite::Entity)
                        .and_where(favorite::Column::UserId.eq(viewer))
                        .to_owned(),
                ),
            );
        }
        if query.is_in_shopping_cart.is_some_and(|v| v != 0) {
            select = select.filter(
                recipe::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(shopping_cart::Column::RecipeId)
                        .from(shopping_cart::Entity)
                        .and_where(shopping_cart::Column::UserId.eq(viewer))
                        .to_owned(),
                ),
            );
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let recipes = select
        .order_by_desc(recipe::Column::Id)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = recipe_responses(&state.db, &state.config, viewer, recipes).await?;

    Ok(Json(RecipeListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_recipe(
    auth_user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, AppError> {
    let model = find_recipe(&state.db, id).await?;
    let viewer = auth_user.map(|u| u.user_id);
    Ok(Json(
        recipe_response(&state.db, &state.config, viewer, model).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Publish a recipe",
    description = "Creates the recipe with its tags, ingredient amounts and short link in one transaction.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, name = %payload.name))]
pub async fn create_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recipe(&payload)?;
    ensure_tags_exist(&state.db, &payload.tags).await?;
    ensure_ingredients_exist(&state.db, &payload.ingredients).await?;

    let image = store_data_uri(&state, &payload.image).await?;

    let txn = state.db.begin().await?;

    let now = chrono::Utc::now();
    let model = recipe::ActiveModel {
        author_id: Set(auth_user.user_id),
        name: Set(payload.name.trim().to_string()),
        text: Set(payload.text),
        image: Set(image),
        cooking_time: Set(payload.cooking_time),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    insert_tags(&txn, model.id, &payload.tags).await?;
    insert_ingredients(&txn, model.id, &payload.ingredients).await?;
    create_for_recipe(&txn, &state.config, model.id).await?;

    txn.commit().await?;

    let body = recipe_response(&state.db, &state.config, Some(auth_user.user_id), model).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Update a recipe",
    description = "Author only. `tags`, `ingredients` and `cooking_time` are required and replace the current values; omitted `image`, `name` and `text` keep theirs.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, id))]
pub async fn update_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    let existing = find_recipe(&state.db, id).await?;
    require_author(&auth_user, &existing)?;
    validate_update_recipe(&payload)?;

    ensure_tags_exist(&state.db, &payload.tags).await?;
    ensure_ingredients_exist(&state.db, &payload.ingredients).await?;

    let image = match payload.image {
        Some(ref data_uri) => Some(store_data_uri(&state, data_uri).await?),
        None => None,
    };

    let txn = state.db.begin().await?;

    let mut active: recipe::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(text) = payload.text {
        active.text = Set(text);
    }
    active.cooking_time = Set(payload.cooking_time);
    if let Some(image) = image {
        active.image = Set(image);
    }
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;

    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    insert_tags(&txn, id, &payload.tags).await?;

    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    insert_ingredients(&txn, id, &payload.ingredients).await?;

    txn.commit().await?;

    let body = recipe_response(&state.db, &state.config, Some(auth_user.user_id), model).await?;
    Ok(Json(body))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Author only. Removes the recipe from every favorite list and cart.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn delete_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_recipe(&state.db, id).await?;
    require_author(&auth_user, &existing)?;

    let txn = state.db.begin().await?;
    purge_recipes(&txn, vec![id]).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/get-link",
    tag = "Recipes",
    operation_id = "getRecipeShortLink",
    summary = "Get the recipe's short link",
    description = "Returns the public short URL. Recipes created without one get a link on first request.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Short link", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let model = find_recipe(&state.db, id).await?;
    let link = find_or_create(&state.db, &state.config, model.id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: short_url(&state.config, &link.code),
    }))
}

pub(crate) async fn find_recipe<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<recipe::Model, AppError> {
    recipe::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))
}

/// Delete recipes and every row that references them.
pub(crate) async fn purge_recipes(
    txn: &DatabaseTransaction,
    ids: Vec<i32>,
) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }

    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.is_in(ids.clone()))
        .exec(txn)
        .await?;
    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.is_in(ids.clone()))
        .exec(txn)
        .await?;
    favorite::Entity::delete_many()
        .filter(favorite::Column::RecipeId.is_in(ids.clone()))
        .exec(txn)
        .await?;
    shopping_cart::Entity::delete_many()
        .filter(shopping_cart::Column::RecipeId.is_in(ids.clone()))
        .exec(txn)
        .await?;
    short_link::Entity::delete_many()
        .filter(short_link::Column::RecipeId.is_in(ids.clone()))
        .exec(txn)
        .await?;
    recipe::Entity::delete_many()
        .filter(recipe::Column::Id.is_in(ids))
        .exec(txn)
        .await?;

    Ok(())
}

fn require_author(auth_user: &AuthUser, recipe: &recipe::Model) -> Result<(), AppError> {
    if recipe.author_id != auth_user.user_id {
        return Err(AppError::PermissionDenied);
    }
    Ok(())
}

async fn ensure_tags_exist<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<(), AppError> {
    let found: Vec<i32> = tag::Entity::find()
        .select_only()
        .column(tag::Column::Id)
        .filter(tag::Column::Id.is_in(ids.to_vec()))
        .into_tuple()
        .all(db)
        .await?;

    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(AppError::Validation(format!("Tag {missing} does not exist")));
    }
    Ok(())
}

async fn ensure_ingredients_exist<C: ConnectionTrait>(
    db: &C,
    lines: &[RecipeIngredientInput],
) -> Result<(), AppError> {
    let found: Vec<i32> = ingredient::Entity::find()
        .select_only()
        .column(ingredient::Column::Id)
        .filter(ingredient::Column::Id.is_in(lines.iter().map(|l| l.id)))
        .into_tuple()
        .all(db)
        .await?;

    if let Some(missing) = lines.iter().find(|l| !found.contains(&l.id)) {
        return Err(AppError::Validation(format!(
            "Ingredient {} does not exist",
            missing.id
        )));
    }
    Ok(())
}

async fn insert_tags(txn: &DatabaseTransaction, recipe_id: i32, tags: &[i32]) -> Result<(), AppError> {
    recipe_tag::Entity::insert_many(tags.iter().map(|&tag_id| recipe_tag::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
    }))
    .exec(txn)
    .await?;
    Ok(())
}

async fn insert_ingredients(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    lines: &[RecipeIngredientInput],
) -> Result<(), AppError> {
    recipe_ingredient::Entity::insert_many(lines.iter().map(|line| {
        recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.id),
            amount: Set(line.amount),
        }
    }))
    .exec(txn)
    .await?;
    Ok(())
}
