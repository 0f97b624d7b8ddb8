mod v1;

use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes(max_media_size: u64) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes(max_media_size))
}

/// Routes served outside `/api`: uploaded media and short-link redirects.
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest(
            "/media",
            OpenApiRouter::new().routes(routes!(handlers::media::serve_media)),
        )
        .nest(
            "/s",
            OpenApiRouter::new()
                .routes(routes!(handlers::short_link::resolve))
                .route("/{code}/", get(handlers::short_link::resolve)),
        )
}
