use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Func;
use sea_orm::*;
use tracing::instrument;

use crate::entity::short_link;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::utils::short_link::recipe_page_url;

#[utoipa::path(
    get,
    path = "/{code}",
    tag = "Short Links",
    operation_id = "resolveShortLink",
    summary = "Resolve a short link",
    description = "Redirects to the recipe's frontend page. Codes are matched case-insensitively; a trailing slash is accepted.",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 302, description = "Redirect to the recipe page"),
        (status = 404, description = "Unknown code (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn resolve(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !common::shortcode::is_valid(&code) {
        return Err(not_found());
    }

    let link = short_link::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(short_link::Column::Code)))
                .eq(code.to_lowercase()),
        )
        .one(&state.db)
        .await?
        .ok_or_else(not_found)?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, recipe_page_url(&state.config, link.recipe_id))],
    ))
}

fn not_found() -> AppError {
    AppError::NotFound("Short link not found".into())
}
