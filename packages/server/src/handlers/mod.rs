pub mod auth;
pub mod favorite;
pub mod ingredient;
pub mod media;
pub mod recipe;
pub mod shopping_cart;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;
