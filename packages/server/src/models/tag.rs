use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_length;

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<crate::entity::tag::Model> for TagResponse {
    fn from(tag: crate::entity::tag::Model) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    /// Display name (1-32 characters).
    #[schema(example = "Breakfast")]
    pub name: String,
    /// URL slug (1-32 chars of letters, digits, `-` and `_`).
    #[schema(example = "breakfast")]
    pub slug: String,
}

#[derive(Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_length(slug, "Slug", 32)?;
    if !slug
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "Slug may contain only letters, digits, '-' and '_'".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_tag(payload: &CreateTagRequest) -> Result<(), AppError> {
    validate_length(&payload.name, "Name", 32)?;
    validate_slug(&payload.slug)
}

pub fn validate_update_tag(payload: &UpdateTagRequest) -> Result<(), AppError> {
    if let Some(ref name) = payload.name {
        validate_length(name, "Name", 32)?;
    }
    if let Some(ref slug) = payload.slug {
        validate_slug(slug)?;
    }
    Ok(())
}
