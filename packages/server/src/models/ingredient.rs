use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::models::shared::validate_length;

#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

impl From<crate::entity::ingredient::Model> for IngredientResponse {
    fn from(m: crate::entity::ingredient::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            measurement_unit: m.measurement_unit,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIngredientRequest {
    /// Name (1-128 characters, trimmed).
    #[schema(example = "flour")]
    pub name: String,
    /// Unit (1-64 characters, trimmed).
    #[schema(example = "g")]
    pub measurement_unit: String,
}

pub fn validate_create_ingredient(payload: &CreateIngredientRequest) -> Result<(), AppError> {
    validate_length(&payload.name, "Name", 128)?;
    validate_length(&payload.measurement_unit, "Measurement unit", 64)
}
