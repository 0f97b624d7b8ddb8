use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{Pagination, validate_length};

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique email (stored lower-cased).
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Unique username (1-150 chars of letters, digits and `.@+-_`).
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
    /// Password (8-128 characters, not entirely numeric).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || email.chars().count() > 254 {
        return Err(AppError::Validation("Email must be 1-254 characters".into()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::Validation("Email address is not valid".into())),
    }
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    validate_length(username, "Username", 150)?;
    if !username
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
    {
        return Err(AppError::Validation(
            "Username may contain only letters, digits and . @ + - _".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();
    if !(8..=128).contains(&length) {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must not be entirely numeric".into(),
        ));
    }
    Ok(())
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    validate_email(&payload.email)?;
    validate_username(&payload.username)?;
    validate_length(&payload.first_name, "First name", 150)?;
    validate_length(&payload.last_name, "Last name", 150)?;
    validate_password(&payload.password)?;
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
}

impl From<crate::entity::user::Model> for RegisterResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Public user profile as seen by the caller.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
    /// Whether the caller follows this user. Always false for anonymous callers.
    pub is_subscribed: bool,
    /// Absolute avatar URL, or null.
    #[schema(example = "http://localhost:8000/media/9f86d0.png")]
    pub avatar: Option<String>,
}

/// Paginated list of users.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserResponse>,
    pub pagination: Pagination,
}

/// Request body for changing the password.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub fn validate_set_password(payload: &SetPasswordRequest) -> Result<(), AppError> {
    if payload.current_password.is_empty() {
        return Err(AppError::Validation(
            "Current password must not be empty".into(),
        ));
    }
    validate_password(&payload.new_password)
}

/// Request body for deleting the caller's account.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeleteAccountRequest {
    pub current_password: String,
}

/// Request body for setting an avatar.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AvatarRequest {
    /// Base64 image data URI.
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub avatar: String,
}

/// Response after setting an avatar.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    /// Absolute URL of the stored avatar.
    pub avatar: String,
}
