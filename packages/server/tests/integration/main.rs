mod common;

mod constraints;
mod favorite;
mod media;
mod short_link;
mod subscription;
