use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::config::AppConfig;
use crate::entity::{follow, recipe, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::user::find_user;
use crate::models::shared::{Pagination, page_bounds, page_offset};
use crate::models::subscription::*;
use crate::state::AppState;
use crate::utils::recipe::{short_recipe, user_response};

#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = "Subscriptions",
    operation_id = "listSubscriptions",
    summary = "Authors the caller follows",
    description = "Paginated list of followed authors ordered by ID, each with their newest recipes (truncated to `recipes_limit`) and total recipe count.",
    params(SubscriptionListQuery),
    responses(
        (status = 200, description = "Followed authors", body = SubscriptionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_subscriptions(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionListQuery>,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.limit);
    let recipes_limit = parse_recipes_limit(query.recipes_limit.as_deref());

    let select = user::Entity::find()
        .filter(
            user::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(follow::Column::AuthorId)
                    .from(follow::Entity)
                    .and_where(follow::Column::UserId.eq(auth_user.user_id))
                    .to_owned(),
            ),
        )
        .order_by_asc(user::Column::Id);

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let authors = select
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = subscription_responses(&state.db, &state.config, authors, recipes_limit).await?;

    Ok(Json(SubscriptionListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/subscribe",
    tag = "Subscriptions",
    operation_id = "subscribe",
    summary = "Follow an author",
    params(
        ("id" = i32, Path, description = "Author user ID"),
        RecipesLimitQuery,
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Self-subscription or already subscribed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id, id))]
pub async fn subscribe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<RecipesLimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let author = find_user(&state.db, id).await?;

    if author.id == auth_user.user_id {
        return Err(AppError::Validation(
            "You cannot subscribe to yourself".into(),
        ));
    }

    let txn = state.db.begin().await?;

    let existing = follow::Entity::find_by_id((auth_user.user_id, author.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(already_subscribed());
    }

    let new_follow = follow::ActiveModel {
        user_id: Set(auth_user.user_id),
        author_id: Set(author.id),
        created_at: Set(chrono::Utc::now()),
    };

    match new_follow.insert(&txn).await {
        Ok(_) => txn.commit().await?,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(already_subscribed());
        }
        Err(e) => return Err(e.into()),
    }

    let recipes_limit = parse_recipes_limit(query.recipes_limit.as_deref());
    let mut data =
        subscription_responses(&state.db, &state.config, vec![author], recipes_limit).await?;
    let body = data
        .pop()
        .ok_or_else(|| AppError::Internal("Subscription response missing".into()))?;

    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    delete,
    path = "/{id}/subscribe",
    tag = "Subscriptions",
    operation_id = "unsubscribe",
    summary = "Stop following an author",
    params(("id" = i32, Path, description = "Author user ID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Not subscribed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn unsubscribe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let author = find_user(&state.db, id).await?;

    let result = follow::Entity::delete_many()
        .filter(follow::Column::UserId.eq(auth_user.user_id))
        .filter(follow::Column::AuthorId.eq(author.id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Validation(
            "You are not subscribed to this user".into(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn already_subscribed() -> AppError {
    AppError::Validation("You are already subscribed to this user".into())
}

/// Build subscription entries for authors the viewer follows.
async fn subscription_responses<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    authors: Vec<user::Model>,
    recipes_limit: Option<u64>,
) -> Result<Vec<SubscriptionResponse>, AppError> {
    if authors.is_empty() {
        return Ok(vec![]);
    }

    let author_ids: Vec<i32> = authors.iter().map(|a| a.id).collect();

    let counts: HashMap<i32, i64> = recipe::Entity::find()
        .select_only()
        .column(recipe::Column::AuthorId)
        .column_as(recipe::Column::Id.count(), "recipes_count")
        .filter(recipe::Column::AuthorId.is_in(author_ids))
        .group_by(recipe::Column::AuthorId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut data = Vec::with_capacity(authors.len());
    for author in authors {
        let recipes = recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(author.id))
            .order_by_desc(recipe::Column::Id)
            .limit(recipes_limit)
            .all(db)
            .await?;

        let recipes_count = counts.get(&author.id).copied().unwrap_or(0) as u64;
        data.push(SubscriptionResponse {
            recipes: recipes.iter().map(|r| short_recipe(config, r)).collect(),
            recipes_count,
            user: user_response(config, author, true),
        });
    }

    Ok(data)
}
