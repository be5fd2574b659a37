use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_mailbox_configuration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique: a door carries at most one mailbox.
    #[sea_orm(unique)]
    pub door_configuration_id: i32,
    #[sea_orm(belongs_to, from = "door_configuration_id", to = "id")]
    pub door_configuration: HasOne<super::door_configuration::Entity>,

    pub door_mailbox_id: i32,
    #[sea_orm(belongs_to, from = "door_mailbox_id", to = "id")]
    pub door_mailbox: HasOne<super::door_mailbox::Entity>,

    #[sea_orm(column_type = "JsonBinary")]
    pub bounds: Json,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
