use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub key: String,
    #[sea_orm(column_type = "Text")]
    pub value: Option<String>,

    /// Catalog table the setting points at, e.g. `"door"`. When set together
    /// with `related_id`, the public value is that catalog row.
    pub related_type: Option<String>,
    pub related_id: Option<i32>,

    #[sea_orm(default_value = true)]
    pub active: bool,
    #[sea_orm(default_value = false)]
    pub is_hidden: bool,
}

impl ActiveModelBehavior for ActiveModel {}
