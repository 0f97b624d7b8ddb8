use sea_orm::*;

use crate::config::AppConfig;
use crate::entity::short_link;
use crate::error::AppError;

/// Public URL of a short code.
pub fn short_url(config: &AppConfig, code: &str) -> String {
    format!("{}/s/{}", config.server.public_url.trim_end_matches('/'), code)
}

/// Frontend page a short link resolves to.
pub fn recipe_page_url(config: &AppConfig, recipe_id: i32) -> String {
    format!(
        "{}/recipes/{}",
        config.short_link.frontend_url.trim_end_matches('/'),
        recipe_id
    )
}

/// Insert a short link for `recipe_id` inside `txn`.
///
/// Each attempt runs in its own savepoint so that a code collision only
/// rolls back that attempt. Gives up after `short_link.max_attempts`.
pub async fn create_for_recipe(
    txn: &DatabaseTransaction,
    config: &AppConfig,
    recipe_id: i32,
) -> Result<short_link::Model, AppError> {
    let length = config.short_code_length();
    let attempts = Ord::max(config.short_link.max_attempts, 1);

    for attempt in 1..=attempts {
        let code = common::shortcode::generate(length);
        let savepoint = txn.begin().await?;

        let result = short_link::ActiveModel {
            recipe_id: Set(recipe_id),
            code: Set(code),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&savepoint)
        .await;

        match result {
            Ok(model) => {
                savepoint.commit().await?;
                return Ok(model);
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                savepoint.rollback().await?;
                if let Some(existing) = find_by_recipe(txn, recipe_id).await? {
                    return Ok(existing);
                }
                tracing::debug!(attempt, "Short code collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Internal(format!(
        "Could not generate a unique short code for recipe {recipe_id} after {attempts} attempts"
    )))
}

pub async fn find_by_recipe<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
) -> Result<Option<short_link::Model>, AppError> {
    Ok(short_link::Entity::find()
        .filter(short_link::Column::RecipeId.eq(recipe_id))
        .one(db)
        .await?)
}

/// Return the recipe's short link, creating one if it has none yet.
pub async fn find_or_create(
    db: &DatabaseConnection,
    config: &AppConfig,
    recipe_id: i32,
) -> Result<short_link::Model, AppError> {
    if let Some(existing) = find_by_recipe(db, recipe_id).await? {
        return Ok(existing);
    }

    let txn = db.begin().await?;
    let link = create_for_recipe(&txn, config, recipe_id).await?;
    txn.commit().await?;
    Ok(link)
}
