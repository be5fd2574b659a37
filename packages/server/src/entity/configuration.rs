use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Root of the configuration aggregate.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "configuration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub type_id: i32,
    #[sea_orm(belongs_to, from = "type_id", to = "id")]
    pub configuration_type: HasOne<super::configuration_type::Entity>,

    #[sea_orm(column_type = "Text")]
    pub image: String,
    #[sea_orm(column_type = "Text")]
    pub screenshot: String,
    pub width: i32,  // in millimetres
    pub height: i32, // in millimetres
    pub scale: f64,

    /// `false` once soft-deleted.
    #[sea_orm(default_value = true)]
    pub active: bool,
    #[sea_orm(default_value = false)]
    pub is_favorite: bool,
    pub title: Option<String>,

    #[sea_orm(has_many)]
    pub doors: HasMany<super::door_configuration::Entity>,

    #[sea_orm(has_many)]
    pub orders: HasMany<super::order::Entity>,

    #[sea_orm(has_many)]
    pub quotes: HasMany<super::quote::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
