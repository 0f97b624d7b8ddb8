use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredient")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id", on_delete = "Cascade")]
    pub recipe: Option<super::recipe::Entity>,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id", on_delete = "Cascade")]
    pub ingredient: Option<super::ingredient::Entity>,

    /// At least 1; enforced by a check constraint.
    pub amount: i32,
}

impl ActiveModelBehavior for ActiveModel {}
