use common::ingredients::IngredientRecord;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{ingredient, recipe, user};
use crate::error::AppError;
use crate::models::user::{validate_email, validate_password, validate_username};
use crate::utils::hash;

/// Constraints and expression indexes that schema-sync cannot express.
const CONSTRAINTS: &[(&str, &str)] = &[
    (
        "follow_no_self",
        r#"DO $$ BEGIN
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'follow_no_self') THEN
        ALTER TABLE "follow" ADD CONSTRAINT follow_no_self CHECK (user_id <> author_id);
    END IF;
END $$"#,
    ),
    (
        "recipe_ingredient_amount_positive",
        r#"DO $$ BEGIN
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'recipe_ingredient_amount_positive') THEN
        ALTER TABLE "recipe_ingredient" ADD CONSTRAINT recipe_ingredient_amount_positive CHECK (amount >= 1);
    END IF;
END $$"#,
    ),
    (
        "recipe_cooking_time_positive",
        r#"DO $$ BEGIN
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'recipe_cooking_time_positive') THEN
        ALTER TABLE "recipe" ADD CONSTRAINT recipe_cooking_time_positive CHECK (cooking_time > 0);
    END IF;
END $$"#,
    ),
    (
        "idx_short_link_code_lower",
        r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_short_link_code_lower ON "short_link" (lower(code))"#,
    ),
    (
        "idx_user_email_lower",
        r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_user_email_lower ON "user" (lower(email))"#,
    ),
    (
        "idx_ingredient_name_lower",
        r#"CREATE INDEX IF NOT EXISTS idx_ingredient_name_lower ON "ingredient" (lower(name))"#,
    ),
];

/// Ensure check constraints and indexes exist.
///
/// Failures are logged and skipped so that a database with conflicting
/// legacy rows still starts.
pub async fn ensure_constraints(db: &DatabaseConnection) -> Result<(), DbErr> {
    for &(name, sql) in CONSTRAINTS {
        match db.execute_unprepared(sql).await {
            Ok(_) => info!("Ensured {name} exists"),
            Err(e) => tracing::warn!("Failed to create {name}: {}", e),
        }
    }

    // Author listings and recipe counts per author.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_recipe_author_id")
        .table(recipe::Entity)
        .col(recipe::Column::AuthorId)
        .col(recipe::Column::Id)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_recipe_author_id exists"),
        Err(e) => tracing::warn!("Failed to create index idx_recipe_author_id: {}", e),
    }

    Ok(())
}

/// Outcome of an ingredient import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: u32,
    pub skipped: u32,
}

/// Insert catalog records, skipping pairs that already exist ignoring case.
pub async fn load_ingredients<C: ConnectionTrait>(
    db: &C,
    records: &[IngredientRecord],
) -> Result<ImportSummary, DbErr> {
    let mut summary = ImportSummary::default();

    for record in records {
        let exists = ingredient::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::Name)))
                    .eq(record.name.to_lowercase()),
            )
            .filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::MeasurementUnit)))
                    .eq(record.measurement_unit.to_lowercase()),
            )
            .count(db)
            .await?
            > 0;
        if exists {
            summary.skipped += 1;
            continue;
        }

        let model = ingredient::ActiveModel {
            name: Set(record.name.clone()),
            measurement_unit: Set(record.measurement_unit.clone()),
            ..Default::default()
        };

        let result = ingredient::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    ingredient::Column::Name,
                    ingredient::Column::MeasurementUnit,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(0) | Err(DbErr::RecordNotInserted) => summary.skipped += 1,
            Ok(_) => summary.inserted += 1,
            Err(e) => return Err(e),
        }
    }

    info!(
        "Imported {} ingredients ({} skipped)",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}

/// Details of an administrator account to create.
pub struct NewAdmin<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Create an administrator, or promote the existing account with that email.
pub async fn create_admin(
    db: &DatabaseConnection,
    admin: NewAdmin<'_>,
) -> Result<user::Model, AppError> {
    validate_email(admin.email)?;
    validate_username(admin.username)?;
    validate_password(admin.password)?;

    let email = admin.email.trim().to_lowercase();

    if let Some(existing) = user::Entity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
    {
        let mut active: user::ActiveModel = existing.into();
        active.is_admin = Set(true);
        let model = active.update(db).await?;
        info!("Promoted {} to administrator", model.email);
        return Ok(model);
    }

    let hash = hash::hash_password(admin.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let model = user::ActiveModel {
        email: Set(email),
        username: Set(admin.username.trim().to_string()),
        first_name: Set(admin.first_name.trim().to_string()),
        last_name: Set(admin.last_name.trim().to_string()),
        password: Set(hash),
        avatar: Set(None),
        is_admin: Set(true),
        token_version: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })?;

    info!("Created administrator {}", model.email);
    Ok(model)
}
