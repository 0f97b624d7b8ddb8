use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::models::shared::{Pagination, validate_length, validate_unique_ids};
use crate::models::tag::TagResponse;
use crate::models::user::UserResponse;

/// One ingredient line of a recipe write request.
#[derive(Debug, Clone, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct RecipeIngredientInput {
    /// Ingredient ID.
    #[schema(example = 3)]
    pub id: i32,
    /// Amount in the ingredient's unit (>= 1).
    #[schema(example = 200)]
    pub amount: i32,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<RecipeIngredientInput>,
    /// Tag IDs.
    #[schema(example = json!([1, 2]))]
    pub tags: Vec<i32>,
    /// Base64 image data URI.
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub image: String,
    #[schema(example = "Pancakes")]
    pub name: String,
    #[schema(example = "Mix everything and fry.")]
    pub text: String,
    /// Minutes (>= 1).
    #[schema(example = 20)]
    pub cooking_time: i32,
}

/// PATCH body. `tags`, `ingredients` and `cooking_time` are required and the
/// lists replace the whole set; omitted `image`, `name` and `text` keep their value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateRecipeRequest {
    pub ingredients: Vec<RecipeIngredientInput>,
    pub tags: Vec<i32>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: i32,
}

fn validate_name(name: &str) -> Result<(), AppError> {
    validate_length(name, "Name", 256)
}

fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Text must not be empty".into()));
    }
    Ok(())
}

fn validate_cooking_time(minutes: i32) -> Result<(), AppError> {
    if minutes < 1 {
        return Err(AppError::Validation(
            "Cooking time must be at least 1 minute".into(),
        ));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[RecipeIngredientInput]) -> Result<(), AppError> {
    let ids: Vec<i32> = ingredients.iter().map(|i| i.id).collect();
    validate_unique_ids(&ids, "Ingredients")?;
    if let Some(bad) = ingredients.iter().find(|i| i.amount < 1) {
        return Err(AppError::Validation(format!(
            "Amount of ingredient {} must be at least 1",
            bad.id
        )));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), AppError> {
    if image.trim().is_empty() {
        return Err(AppError::Validation("Image must not be empty".into()));
    }
    Ok(())
}

pub fn validate_create_recipe(payload: &CreateRecipeRequest) -> Result<(), AppError> {
    validate_name(&payload.name)?;
    validate_text(&payload.text)?;
    validate_cooking_time(payload.cooking_time)?;
    validate_unique_ids(&payload.tags, "Tags")?;
    validate_ingredients(&payload.ingredients)?;
    validate_image(&payload.image)
}

pub fn validate_update_recipe(payload: &UpdateRecipeRequest) -> Result<(), AppError> {
    if let Some(ref name) = payload.name {
        validate_name(name)?;
    }
    if let Some(ref text) = payload.text {
        validate_text(text)?;
    }
    validate_cooking_time(payload.cooking_time)?;
    validate_unique_ids(&payload.tags, "Tags")?;
    validate_ingredients(&payload.ingredients)?;
    if let Some(ref image) = payload.image {
        validate_image(image)?;
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Page number (default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 6, max: 200).
    pub limit: Option<u64>,
    /// Author user ID.
    pub author: Option<i32>,
    /// Tag slugs; repeat the parameter to match any of several tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Non-zero restricts to the caller's favorites.
    pub is_favorited: Option<i64>,
    /// Non-zero restricts to the caller's shopping cart.
    pub is_in_shopping_cart: Option<i64>,
}

/// Ingredient line inside a recipe response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeIngredientResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
    #[schema(example = 200)]
    pub amount: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Absolute image URL.
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Compact recipe used by favorites, cart and subscription responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ShortRecipeResponse {
    pub id: i32,
    pub name: String,
    /// Absolute image URL.
    pub image: String,
    pub cooking_time: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeListResponse {
    pub data: Vec<RecipeResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    #[schema(example = "http://localhost:8000/s/a1B2c3D4e5F6g7H8")]
    pub short_link: String,
}
