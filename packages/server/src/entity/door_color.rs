use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_color")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub door_id: i32,
    #[sea_orm(belongs_to, from = "door_id", to = "id")]
    pub door: HasOne<super::door::Entity>,

    pub name: String,
    #[sea_orm(default_value = true)]
    pub active: bool,

    #[sea_orm(has_many)]
    pub sizes: HasMany<super::door_size::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
