use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(default_value = true)]
    pub active: bool,

    #[sea_orm(has_many)]
    pub colors: HasMany<super::door_color::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
