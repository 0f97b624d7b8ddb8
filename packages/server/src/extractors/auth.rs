use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use sea_orm::EntityTrait;

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication, or take
/// `Option<AuthUser>` on routes that anonymous callers may read. A token is
/// accepted only while its `ver` claim matches the user's `token_version`.
pub struct AuthUser {
    pub user_id: i32,
    pub profile: user::Model,
}

impl AuthUser {
    /// Returns `Ok(())` for administrators, `Err(PermissionDenied)` otherwise.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.profile.is_admin {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

async fn authenticate(header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;

    let claims =
        jwt::verify(token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

    let profile = user::Entity::find_by_id(claims.uid)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    if profile.token_version != claims.ver {
        return Err(AppError::TokenInvalid);
    }

    Ok(AuthUser {
        user_id: profile.id,
        profile,
    })
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    match parts.headers.get("Authorization") {
        None => Ok(None),
        Some(v) => v.to_str().map(Some).map_err(|_| AppError::TokenInvalid),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?.ok_or(AppError::TokenMissing)?;
        authenticate(header, state).await
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match authorization_header(parts)? {
            None => Ok(None),
            Some(header) => authenticate(header, state).await.map(Some),
        }
    }
}
