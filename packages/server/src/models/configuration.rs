use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shared::{Pagination, truthy_flag, validate_dimension, validate_required_text};
use crate::entity::{
    configuration, configuration_type, door, door_color, door_configuration, door_glass,
    door_handle, door_hinge, door_lock, door_mailbox, door_mailbox_configuration, door_size,
    door_weldorpel,
};
use crate::error::AppError;

/// Upper bound on doors in a single configuration.
pub const MAX_DOORS: usize = 20;

/// Screenshots and images arrive as URLs or data URIs.
const MAX_IMAGE_LEN: usize = 5_000_000;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Mailbox mounted on a door.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct MailboxInput {
    #[schema(example = 3)]
    pub door_mailbox_id: i32,
    /// Placement of the mailbox on the door.
    #[schema(value_type = Object)]
    pub bounds: Value,
}

/// Allow-listed attributes of a door configuration.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct DoorInput {
    #[schema(example = 1)]
    pub door_id: i32,
    #[schema(example = 4)]
    pub door_color_id: i32,
    /// Required unless `custom` is set.
    #[serde(default)]
    pub door_size_id: Option<i32>,
    #[serde(default)]
    pub door_glass_id: Option<i32>,
    #[serde(default)]
    pub door_handle_id: Option<i32>,
    #[serde(default)]
    pub door_hinge_id: Option<i32>,
    #[serde(default)]
    pub door_lock_id: Option<i32>,
    #[serde(default)]
    pub door_weldorpel_id: Option<i32>,
    #[serde(default)]
    pub custom: bool,
    #[schema(example = 930)]
    pub width: i32,
    #[schema(example = 2115)]
    pub height: i32,
    #[schema(value_type = Object)]
    pub bounds: Value,
    #[serde(default)]
    pub handle_right: bool,
    #[serde(default)]
    pub three_point_lock: bool,
    #[serde(default)]
    pub draft_trap: bool,
    /// Omit to have no mailbox. On update, omitting removes an existing one.
    #[serde(default)]
    pub door_mailbox: Option<MailboxInput>,
}

/// A door entry in an update request.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct DoorUpsert {
    /// Door configuration to update in place. Absent, unknown or foreign ids
    /// create a new door.
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(flatten)]
    pub attributes: DoorInput,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateConfigurationRequest {
    #[schema(example = 1)]
    pub type_id: i32,
    pub image: String,
    pub screenshot: String,
    #[schema(example = 2400)]
    pub width: i32,
    #[schema(example = 2600)]
    pub height: i32,
    #[schema(example = 0.25)]
    pub scale: f64,
    pub doors: Vec<DoorInput>,
}

/// Only the screenshot and the door list can change after creation.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateConfigurationRequest {
    #[serde(default)]
    pub screenshot: Option<String>,
    pub doors: Vec<DoorUpsert>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct FavoriteRequest {
    /// New title. Absent or blank keeps the current one.
    #[schema(example = "Front entrance")]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ConfigurationListQuery {
    /// `1` to list favorites only.
    #[serde(default, deserialize_with = "truthy_flag")]
    #[param(value_type = Option<String>, example = "1")]
    pub favorite: Option<bool>,
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 15).
    #[param(example = 15)]
    pub per_page: Option<u64>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A catalog row referenced by a door configuration.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CatalogItem {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

macro_rules! catalog_item_from {
    ($($module:ident),+ $(,)?) => {
        $(
            impl From<$module::Model> for CatalogItem {
                fn from(m: $module::Model) -> Self {
                    Self {
                        id: m.id,
                        name: m.name,
                        active: m.active,
                    }
                }
            }
        )+
    };
}

catalog_item_from!(
    configuration_type,
    door,
    door_glass,
    door_handle,
    door_hinge,
    door_lock,
    door_mailbox,
    door_weldorpel,
);

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorColorItem {
    pub id: i32,
    pub door_id: i32,
    pub name: String,
    pub active: bool,
}

impl From<door_color::Model> for DoorColorItem {
    fn from(m: door_color::Model) -> Self {
        Self {
            id: m.id,
            door_id: m.door_id,
            name: m.name,
            active: m.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorSizeResponse {
    pub id: i32,
    pub door_color_id: i32,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub active: bool,
}

impl From<door_size::Model> for DoorSizeResponse {
    fn from(m: door_size::Model) -> Self {
        Self {
            id: m.id,
            door_color_id: m.door_color_id,
            name: m.name,
            width: m.width,
            height: m.height,
            active: m.active,
        }
    }
}

/// Door model together with the colors it can be ordered in.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorResponse {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub colors: Vec<DoorColorItem>,
}

impl DoorResponse {
    pub fn new(m: door::Model, colors: Vec<DoorColorItem>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            active: m.active,
            colors,
        }
    }
}

/// Selected color together with the sizes it comes in.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorColorResponse {
    pub id: i32,
    pub door_id: i32,
    pub name: String,
    pub active: bool,
    pub sizes: Vec<DoorSizeResponse>,
}

impl DoorColorResponse {
    pub fn new(m: door_color::Model, sizes: Vec<DoorSizeResponse>) -> Self {
        Self {
            id: m.id,
            door_id: m.door_id,
            name: m.name,
            active: m.active,
            sizes,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorMailboxConfigurationResponse {
    pub id: i32,
    pub door_configuration_id: i32,
    pub door_mailbox_id: i32,
    #[schema(value_type = Object)]
    pub bounds: Value,
    pub door_mailbox: Option<CatalogItem>,
}

impl DoorMailboxConfigurationResponse {
    pub fn new(m: door_mailbox_configuration::Model, door_mailbox: Option<CatalogItem>) -> Self {
        Self {
            id: m.id,
            door_configuration_id: m.door_configuration_id,
            door_mailbox_id: m.door_mailbox_id,
            bounds: m.bounds,
            door_mailbox,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DoorConfigurationResponse {
    pub id: i32,
    pub configuration_id: i32,
    pub door_id: i32,
    pub door_color_id: i32,
    pub door_size_id: Option<i32>,
    pub door_glass_id: Option<i32>,
    pub door_handle_id: Option<i32>,
    pub door_hinge_id: Option<i32>,
    pub door_lock_id: Option<i32>,
    pub door_weldorpel_id: Option<i32>,
    pub custom: bool,
    pub width: i32,
    pub height: i32,
    #[schema(value_type = Object)]
    pub bounds: Value,
    pub handle_right: bool,
    pub three_point_lock: bool,
    pub draft_trap: bool,
    pub door: Option<DoorResponse>,
    pub door_color: Option<DoorColorResponse>,
    pub door_size: Option<DoorSizeResponse>,
    pub door_glass: Option<CatalogItem>,
    pub door_handle: Option<CatalogItem>,
    pub door_hinge: Option<CatalogItem>,
    pub door_lock: Option<CatalogItem>,
    pub door_weldorpel: Option<CatalogItem>,
    pub door_mailbox: Option<DoorMailboxConfigurationResponse>,
}

impl From<door_configuration::Model> for DoorConfigurationResponse {
    /// Scalar columns only; relations are attached by the projection loader.
    fn from(m: door_configuration::Model) -> Self {
        Self {
            id: m.id,
            configuration_id: m.configuration_id,
            door_id: m.door_id,
            door_color_id: m.door_color_id,
            door_size_id: m.door_size_id,
            door_glass_id: m.door_glass_id,
            door_handle_id: m.door_handle_id,
            door_hinge_id: m.door_hinge_id,
            door_lock_id: m.door_lock_id,
            door_weldorpel_id: m.door_weldorpel_id,
            custom: m.custom,
            width: m.width,
            height: m.height,
            bounds: m.bounds,
            handle_right: m.handle_right,
            three_point_lock: m.three_point_lock,
            draft_trap: m.draft_trap,
            door: None,
            door_color: None,
            door_size: None,
            door_glass: None,
            door_handle: None,
            door_hinge: None,
            door_lock: None,
            door_weldorpel: None,
            door_mailbox: None,
        }
    }
}

/// Configuration row without its doors, used by list and favorite endpoints.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ConfigurationSummary {
    pub id: i32,
    pub user_id: i32,
    pub type_id: i32,
    pub image: String,
    pub screenshot: String,
    pub width: i32,
    pub height: i32,
    pub scale: f64,
    pub active: bool,
    pub is_favorite: bool,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<configuration::Model> for ConfigurationSummary {
    fn from(m: configuration::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            type_id: m.type_id,
            image: m.image,
            screenshot: m.screenshot,
            width: m.width,
            height: m.height,
            scale: m.scale,
            active: m.active,
            is_favorite: m.is_favorite,
            title: m.title,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// The full aggregate: configuration, its doors and their mailboxes.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ConfigurationResponse {
    #[serde(flatten)]
    pub configuration: ConfigurationSummary,
    pub configuration_type: Option<CatalogItem>,
    pub doors: Vec<DoorConfigurationResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConfigurationListResponse {
    pub data: Vec<ConfigurationSummary>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_create_configuration(req: &CreateConfigurationRequest) -> Result<(), AppError> {
    validate_image("image", &req.image)?;
    validate_image("screenshot", &req.screenshot)?;
    validate_dimension("width", req.width)?;
    validate_dimension("height", req.height)?;
    if !req.scale.is_finite() || req.scale <= 0.0 {
        return Err(AppError::Validation(
            "scale must be a positive number".into(),
        ));
    }
    validate_door_count(req.doors.len())?;
    for (index, door) in req.doors.iter().enumerate() {
        validate_door(index, door)?;
    }
    Ok(())
}

pub fn validate_update_configuration(req: &UpdateConfigurationRequest) -> Result<(), AppError> {
    if let Some(ref screenshot) = req.screenshot {
        validate_image("screenshot", screenshot)?;
    }
    validate_door_count(req.doors.len())?;
    let mut seen = HashSet::new();
    for (index, door) in req.doors.iter().enumerate() {
        if let Some(id) = door.id
            && !seen.insert(id)
        {
            return Err(AppError::Validation(format!(
                "doors[{index}].id {id} appears more than once"
            )));
        }
        validate_door(index, &door.attributes)?;
    }
    Ok(())
}

pub fn validate_favorite(req: &FavoriteRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title
        && title.trim().chars().count() > 255
    {
        return Err(AppError::Validation(
            "title must be at most 255 characters".into(),
        ));
    }
    Ok(())
}

fn validate_image(field: &str, value: &str) -> Result<(), AppError> {
    validate_required_text(field, value, MAX_IMAGE_LEN)
}

fn validate_door_count(count: usize) -> Result<(), AppError> {
    if count > MAX_DOORS {
        return Err(AppError::Validation(format!(
            "doors must contain at most {MAX_DOORS} entries"
        )));
    }
    Ok(())
}

fn validate_door(index: usize, door: &DoorInput) -> Result<(), AppError> {
    validate_dimension(&format!("doors[{index}].width"), door.width)?;
    validate_dimension(&format!("doors[{index}].height"), door.height)?;
    if !door.bounds.is_object() {
        return Err(AppError::Validation(format!(
            "doors[{index}].bounds must be an object"
        )));
    }
    if !door.custom && door.door_size_id.is_none() {
        return Err(AppError::Validation(format!(
            "doors[{index}].door_size_id is required unless custom is set"
        )));
    }
    if let Some(ref mailbox) = door.door_mailbox
        && !mailbox.bounds.is_object()
    {
        return Err(AppError::Validation(format!(
            "doors[{index}].door_mailbox.bounds must be an object"
        )));
    }
    Ok(())
}
