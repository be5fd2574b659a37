use std::collections::{BTreeMap, BTreeSet, HashMap};

use axum::{Json, extract::State};
use sea_orm::*;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::entity::{
    configuration_type, door, door_color, door_glass, door_handle, door_hinge, door_lock,
    door_mailbox, door_size, door_weldorpel, setting,
};
use crate::error::{AppError, ErrorBody};
use crate::models::configuration::{CatalogItem, DoorColorItem, DoorSizeResponse};
use crate::models::setting::{CatalogTable, SettingSource, setting_source};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Settings",
    operation_id = "listSettings",
    summary = "Public application settings",
    description = "Maps each active, non-hidden setting key to its value. Settings that point at a catalog row resolve to that row, or `null` when it no longer exists.",
    responses(
        (status = 200, description = "Settings by key", body = BTreeMap<String, Value>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Value>>, AppError> {
    let rows = setting::Entity::find()
        .order_by_asc(setting::Column::Id)
        .all(&state.db)
        .await?;

    let published: Vec<(String, SettingSource)> = rows
        .iter()
        .filter_map(|m| setting_source(m).map(|source| (m.key.clone(), source)))
        .collect();

    let mut wanted: HashMap<CatalogTable, BTreeSet<i32>> = HashMap::new();
    for (_, source) in &published {
        if let SettingSource::Related { table, id } = source {
            wanted.entry(*table).or_default().insert(*id);
        }
    }

    let mut resolved: HashMap<(CatalogTable, i32), Value> = HashMap::new();
    for (table, ids) in wanted {
        for (id, item) in load_catalog(&state.db, table, ids).await? {
            resolved.insert((table, id), item);
        }
    }

    let body = published
        .into_iter()
        .map(|(key, source)| {
            let value = match source {
                SettingSource::Plain(value) => value.map(Value::String).unwrap_or(Value::Null),
                SettingSource::Related { table, id } => {
                    resolved.remove(&(table, id)).unwrap_or(Value::Null)
                }
            };
            (key, value)
        })
        .collect();

    Ok(Json(body))
}

async fn load_catalog<C: ConnectionTrait>(
    conn: &C,
    table: CatalogTable,
    ids: BTreeSet<i32>,
) -> Result<Vec<(i32, Value)>, AppError> {
    match table {
        CatalogTable::ConfigurationType => {
            fetch::<configuration_type::Entity, CatalogItem, _>(
                conn,
                configuration_type::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
        CatalogTable::Door => {
            fetch::<door::Entity, CatalogItem, _>(conn, door::Column::Id, ids, |m| m.id).await
        }
        CatalogTable::DoorColor => {
            fetch::<door_color::Entity, DoorColorItem, _>(
                conn,
                door_color::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
        CatalogTable::DoorSize => {
            fetch::<door_size::Entity, DoorSizeResponse, _>(
                conn,
                door_size::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
        CatalogTable::DoorGlass => {
            fetch::<door_glass::Entity, CatalogItem, _>(conn, door_glass::Column::Id, ids, |m| m.id)
                .await
        }
        CatalogTable::DoorHandle => {
            fetch::<door_handle::Entity, CatalogItem, _>(
                conn,
                door_handle::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
        CatalogTable::DoorHinge => {
            fetch::<door_hinge::Entity, CatalogItem, _>(conn, door_hinge::Column::Id, ids, |m| m.id)
                .await
        }
        CatalogTable::DoorLock => {
            fetch::<door_lock::Entity, CatalogItem, _>(conn, door_lock::Column::Id, ids, |m| m.id)
                .await
        }
        CatalogTable::DoorMailbox => {
            fetch::<door_mailbox::Entity, CatalogItem, _>(
                conn,
                door_mailbox::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
        CatalogTable::DoorWeldorpel => {
            fetch::<door_weldorpel::Entity, CatalogItem, _>(
                conn,
                door_weldorpel::Column::Id,
                ids,
                |m| m.id,
            )
            .await
        }
    }
}

/// Load rows of `E` by id and render them through the response type `R`.
async fn fetch<E, R, C>(
    conn: &C,
    column: E::Column,
    ids: BTreeSet<i32>,
    key: fn(&E::Model) -> i32,
) -> Result<Vec<(i32, Value)>, AppError>
where
    E: EntityTrait,
    R: From<E::Model> + Serialize,
    C: ConnectionTrait,
{
    let rows = E::find().filter(column.is_in(ids)).all(conn).await?;
    rows.into_iter()
        .map(|m| {
            let id = key(&m);
            serde_json::to_value(R::from(m))
                .map(|v| (id, v))
                .map_err(|e| AppError::Internal(format!("Setting serialization error: {}", e)))
        })
        .collect()
}
