use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::models::recipe::ShortRecipeResponse;
use crate::models::shared::Pagination;
use crate::models::user::UserResponse;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionListQuery {
    /// Page number (default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 6, max: 200).
    pub limit: Option<u64>,
    /// Maximum number of recipes embedded per author.
    pub recipes_limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipesLimitQuery {
    /// Maximum number of recipes embedded in the response.
    pub recipes_limit: Option<String>,
}

/// Parse `recipes_limit`; anything that is not a positive integer means "no limit".
pub fn parse_recipes_limit(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
}

/// A followed author with a preview of their recipes.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Newest first, truncated to `recipes_limit`.
    pub recipes: Vec<ShortRecipeResponse>,
    /// Total number of the author's recipes.
    pub recipes_count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubscriptionListResponse {
    pub data: Vec<SubscriptionResponse>,
    pub pagination: Pagination,
}
