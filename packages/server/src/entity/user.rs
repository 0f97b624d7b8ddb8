use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Stored lower-cased.
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string.
    pub password: String,
    /// Media name (`{sha256}.{ext}`) of the avatar, if any.
    pub avatar: Option<String>,

    #[sea_orm(default_value = false)]
    pub is_admin: bool,
    /// Bumped on logout and password change; tokens carrying an older value are rejected.
    #[sea_orm(default_value = 0)]
    pub token_version: i32,

    #[sea_orm(has_many)]
    pub recipes: HasMany<super::recipe::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
