use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use common::storage::MediaName;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{name}",
    tag = "Media",
    operation_id = "getMedia",
    summary = "Download an uploaded image",
    params(("name" = String, Path, description = "Media name, `{sha256}.{ext}`")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "Unknown media (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let name = MediaName::parse(&name)?;
    let content = state.media.get(&name).await?;

    let mime = mime_guess::from_ext(&name.extension).first_or_octet_stream();

    // Names are content hashes, so a given URL never changes.
    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}
