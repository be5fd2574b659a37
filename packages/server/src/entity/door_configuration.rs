use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_configuration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub configuration_id: i32,
    #[sea_orm(belongs_to, from = "configuration_id", to = "id")]
    pub configuration: HasOne<super::configuration::Entity>,

    pub door_id: i32,
    #[sea_orm(belongs_to, from = "door_id", to = "id")]
    pub door: HasOne<super::door::Entity>,

    pub door_color_id: i32,
    #[sea_orm(belongs_to, from = "door_color_id", to = "id")]
    pub door_color: HasOne<super::door_color::Entity>,

    /// NULL for custom-sized doors.
    pub door_size_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_size_id", to = "id")]
    pub door_size: HasOne<super::door_size::Entity>,

    pub door_glass_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_glass_id", to = "id")]
    pub door_glass: HasOne<super::door_glass::Entity>,

    pub door_handle_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_handle_id", to = "id")]
    pub door_handle: HasOne<super::door_handle::Entity>,

    pub door_hinge_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_hinge_id", to = "id")]
    pub door_hinge: HasOne<super::door_hinge::Entity>,

    pub door_lock_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_lock_id", to = "id")]
    pub door_lock: HasOne<super::door_lock::Entity>,

    pub door_weldorpel_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_weldorpel_id", to = "id")]
    pub door_weldorpel: HasOne<super::door_weldorpel::Entity>,

    pub custom: bool,
    pub width: i32,
    pub height: i32,
    /// Placement of the door on the configurator canvas.
    #[sea_orm(column_type = "JsonBinary")]
    pub bounds: Json,
    pub handle_right: bool,
    pub three_point_lock: bool,
    pub draft_trap: bool,

    #[sea_orm(has_one)]
    pub mailbox: HasOne<super::door_mailbox_configuration::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
