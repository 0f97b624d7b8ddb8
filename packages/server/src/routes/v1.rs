use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;
use crate::utils::media::media_body_limit;

/// `max_media_size` sizes the body limit of routes that accept images.
pub fn routes(max_media_size: u64) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth/token", auth_routes())
        .nest("/users", user_routes(max_media_size))
        .nest("/tags", tag_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes(max_media_size))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
}

fn user_routes(max_media_size: u64) -> OpenApiRouter<AppState> {
    let avatar = OpenApiRouter::new()
        .routes(routes!(
            handlers::user::set_avatar,
            handlers::user::delete_avatar
        ))
        .layer(media_body_limit(max_media_size));

    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::list_users,
            handlers::user::register
        ))
        .routes(routes!(handlers::user::me, handlers::user::delete_me))
        .routes(routes!(handlers::user::set_password))
        .routes(routes!(handlers::subscription::list_subscriptions))
        .routes(routes!(handlers::user::get_user))
        .routes(routes!(
            handlers::subscription::subscribe,
            handlers::subscription::unsubscribe
        ))
        .merge(avatar)
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::tag::list_tags, handlers::tag::create_tag))
        .routes(routes!(
            handlers::tag::get_tag,
            handlers::tag::update_tag,
            handlers::tag::delete_tag
        ))
}

fn ingredient_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::ingredient::list_ingredients,
            handlers::ingredient::create_ingredient
        ))
        .routes(routes!(handlers::ingredient::get_ingredient))
}

fn recipe_routes(max_media_size: u64) -> OpenApiRouter<AppState> {
    let writes = OpenApiRouter::new()
        .routes(routes!(
            handlers::recipe::list_recipes,
            handlers::recipe::create_recipe
        ))
        .routes(routes!(
            handlers::recipe::get_recipe,
            handlers::recipe::update_recipe,
            handlers::recipe::delete_recipe
        ))
        .layer(media_body_limit(max_media_size));

    OpenApiRouter::new()
        .routes(routes!(handlers::shopping_cart::download_shopping_cart))
        .routes(routes!(handlers::recipe::get_link))
        .routes(routes!(
            handlers::favorite::add_favorite,
            handlers::favorite::remove_favorite
        ))
        .routes(routes!(
            handlers::shopping_cart::add_to_cart,
            handlers::shopping_cart::remove_from_cart
        ))
        .merge(writes)
}
