use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Func;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{favorite, follow, recipe, shopping_cart, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::auth::revoke_tokens;
use crate::handlers::recipe::purge_recipes;
use crate::models::shared::{PageQuery, Pagination, page_bounds, page_offset};
use crate::models::user::*;
use crate::state::AppState;
use crate::utils::hash;
use crate::utils::media::{media_url, store_data_uri};
use crate::utils::recipe::{user_response, user_responses};

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "registerUser",
    summary = "Register a new user",
    description = "Creates an account. Email is stored lower-cased and compared case-insensitively.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email or username taken (EMAIL_TAKEN, USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let email = payload.email.trim().to_lowercase();
    let username = payload.username.trim().to_string();

    let email_taken = user::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(email.as_str()))
        .count(&state.db)
        .await?
        > 0;
    if email_taken {
        return Err(AppError::EmailTaken);
    }

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        email: Set(email),
        username: Set(username),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        password: Set(hash),
        avatar: Set(None),
        is_admin: Set(false),
        token_version: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Registration unique constraint caught on insert: {detail}");
            if detail.contains("email") {
                AppError::EmailTaken
            } else {
                AppError::UsernameTaken
            }
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(RegisterResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users",
    description = "Paginated list of users ordered by ID. Anonymous callers are allowed.",
    params(PageQuery),
    responses(
        (status = 200, description = "List of users", body = UserListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_users(
    auth_user: Option<AuthUser>,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.limit);
    let select = user::Entity::find().order_by_asc(user::Column::Id);

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let users = select
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let viewer = auth_user.map(|u| u.user_id);
    let data = user_responses(&state.db, &state.config, viewer, users).await?;

    Ok(Json(UserListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_user(
    auth_user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let target = find_user(&state.db, id).await?;
    let viewer = auth_user.map(|u| u.user_id);

    let mut data = user_responses(&state.db, &state.config, viewer, vec![target]).await?;
    data.pop()
        .map(Json)
        .ok_or_else(|| AppError::Internal("User response missing".into()))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    operation_id = "getMe",
    summary = "Current user's profile",
    responses(
        (status = 200, description = "Caller's profile", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(auth_user: AuthUser, State(state): State<AppState>) -> Json<UserResponse> {
    Json(user_response(&state.config, auth_user.profile, false))
}

#[utoipa::path(
    delete,
    path = "/me",
    tag = "Users",
    operation_id = "deleteMe",
    summary = "Delete the caller's account",
    description = "Deletes the account together with its recipes, favorites, cart and subscriptions.",
    request_body = DeleteAccountRequest,
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Wrong password (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn delete_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_current_password(&payload.current_password, &auth_user.profile)?;

    let user_id = auth_user.user_id;
    let txn = state.db.begin().await?;

    let recipe_ids: Vec<i32> = recipe::Entity::find()
        .select_only()
        .column(recipe::Column::Id)
        .filter(recipe::Column::AuthorId.eq(user_id))
        .into_tuple()
        .all(&txn)
        .await?;
    purge_recipes(&txn, recipe_ids).await?;

    favorite::Entity::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;
    shopping_cart::Entity::delete_many()
        .filter(shopping_cart::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;
    follow::Entity::delete_many()
        .filter(
            Condition::any()
                .add(follow::Column::UserId.eq(user_id))
                .add(follow::Column::AuthorId.eq(user_id)),
        )
        .exec(&txn)
        .await?;
    user::Entity::delete_by_id(user_id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(user_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/set_password",
    tag = "Users",
    operation_id = "setPassword",
    summary = "Change the caller's password",
    description = "Requires the current password. Existing tokens are revoked.",
    request_body = SetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error or wrong current password (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn set_password(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_set_password(&payload)?;
    check_current_password(&payload.current_password, &auth_user.profile)?;

    let hash = hash::hash_password(&payload.new_password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let txn = state.db.begin().await?;
    let mut active: user::ActiveModel = auth_user.profile.into();
    active.password = Set(hash);
    active.update(&txn).await?;
    revoke_tokens(&txn, auth_user.user_id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/me/avatar",
    tag = "Users",
    operation_id = "setAvatar",
    summary = "Upload the caller's avatar",
    request_body = AvatarRequest,
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Invalid image (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn set_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    let name = store_data_uri(&state, &payload.avatar).await?;

    let mut active: user::ActiveModel = auth_user.profile.into();
    active.avatar = Set(Some(name.clone()));
    active.update(&state.db).await?;

    Ok(Json(AvatarResponse {
        avatar: media_url(&state.config, &name),
    }))
}

#[utoipa::path(
    delete,
    path = "/me/avatar",
    tag = "Users",
    operation_id = "deleteAvatar",
    summary = "Remove the caller's avatar",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn delete_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut active: user::ActiveModel = auth_user.profile.into();
    active.avatar = Set(None);
    active.update(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

fn check_current_password(password: &str, profile: &user::Model) -> Result<(), AppError> {
    let is_valid = hash::verify_password(password, &profile.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if !is_valid {
        return Err(AppError::Validation("Current password is incorrect".into()));
    }
    Ok(())
}
