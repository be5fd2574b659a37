use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_size")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub door_color_id: i32,
    #[sea_orm(belongs_to, from = "door_color_id", to = "id")]
    pub door_color: HasOne<super::door_color::Entity>,

    pub name: String,
    pub width: i32,
    pub height: i32,
    #[sea_orm(default_value = true)]
    pub active: bool,
}

impl ActiveModelBehavior for ActiveModel {}
