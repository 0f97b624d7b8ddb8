//! Domain helpers shared by the Foodgram server and management CLI.

pub mod image;
pub mod ingredients;
pub mod shopping;
pub mod shortcode;
pub mod storage;

pub use image::{DecodedImage, ImageError};
pub use shopping::ShoppingItem;
