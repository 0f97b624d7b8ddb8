pub mod hash;
pub mod jwt;
pub mod media;
pub mod recipe;
pub mod short_link;
