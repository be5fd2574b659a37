use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QueryTrait,
};

use super::store::ConfigurationStore;
use crate::entity::{
    configuration, configuration_type, door, door_color, door_glass, door_handle, door_hinge,
    door_lock, door_mailbox, door_size, door_weldorpel,
};
use crate::models::configuration::{
    CatalogItem, ConfigurationResponse, DoorColorItem, DoorColorResponse,
    DoorConfigurationResponse, DoorMailboxConfigurationResponse, DoorResponse, DoorSizeResponse,
};

/// Which colors to list under each door model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorFilter {
    #[default]
    ActiveOnly,
    All,
}

/// Shape of a loaded aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateProjection {
    pub door_colors: ColorFilter,
}

/// Load `configuration` with its doors, mailboxes and every catalog row they
/// reference.
pub async fn load_aggregate<C: ConnectionTrait>(
    conn: &C,
    configuration: configuration::Model,
    projection: &AggregateProjection,
) -> Result<ConfigurationResponse, DbErr> {
    let store = ConfigurationStore::new(conn);
    let doors = store.doors_of(configuration.id).await?;
    let door_ids: Vec<i32> = doors.iter().map(|d| d.id).collect();
    let mailboxes: HashMap<i32, _> = store
        .mailboxes_of(&door_ids)
        .await?
        .into_iter()
        .map(|m| (m.door_configuration_id, m))
        .collect();

    let configuration_type = index_by_id::<configuration_type::Entity, _, _>(
        conn,
        configuration_type::Column::Id,
        BTreeSet::from([configuration.type_id]),
        |m| m.id,
    )
    .await?
    .remove(&configuration.type_id)
    .map(CatalogItem::from);

    let models = index_by_id::<door::Entity, _, _>(
        conn,
        door::Column::Id,
        doors.iter().map(|d| d.door_id).collect(),
        |m| m.id,
    )
    .await?;
    let selected_colors = index_by_id::<door_color::Entity, _, _>(
        conn,
        door_color::Column::Id,
        doors.iter().map(|d| d.door_color_id).collect(),
        |m| m.id,
    )
    .await?;
    let sizes = index_by_id::<door_size::Entity, _, _>(
        conn,
        door_size::Column::Id,
        doors.iter().filter_map(|d| d.door_size_id).collect(),
        |m| m.id,
    )
    .await?;
    let glasses = index_by_id::<door_glass::Entity, _, _>(
        conn,
        door_glass::Column::Id,
        doors.iter().filter_map(|d| d.door_glass_id).collect(),
        |m| m.id,
    )
    .await?;
    let handles = index_by_id::<door_handle::Entity, _, _>(
        conn,
        door_handle::Column::Id,
        doors.iter().filter_map(|d| d.door_handle_id).collect(),
        |m| m.id,
    )
    .await?;
    let hinges = index_by_id::<door_hinge::Entity, _, _>(
        conn,
        door_hinge::Column::Id,
        doors.iter().filter_map(|d| d.door_hinge_id).collect(),
        |m| m.id,
    )
    .await?;
    let locks = index_by_id::<door_lock::Entity, _, _>(
        conn,
        door_lock::Column::Id,
        doors.iter().filter_map(|d| d.door_lock_id).collect(),
        |m| m.id,
    )
    .await?;
    let weldorpels = index_by_id::<door_weldorpel::Entity, _, _>(
        conn,
        door_weldorpel::Column::Id,
        doors.iter().filter_map(|d| d.door_weldorpel_id).collect(),
        |m| m.id,
    )
    .await?;
    let mailbox_models = index_by_id::<door_mailbox::Entity, _, _>(
        conn,
        door_mailbox::Column::Id,
        mailboxes.values().map(|m| m.door_mailbox_id).collect(),
        |m| m.id,
    )
    .await?;

    let colors_by_door = colors_of_doors(
        conn,
        models.keys().copied().collect(),
        projection.door_colors,
    )
    .await?;
    let sizes_by_color = sizes_of_colors(conn, selected_colors.keys().copied().collect()).await?;

    let doors = doors
        .into_iter()
        .map(|d| {
            let mut response = DoorConfigurationResponse::from(d.clone());
            response.door = models.get(&d.door_id).map(|m| {
                DoorResponse::new(
                    m.clone(),
                    colors_by_door.get(&d.door_id).cloned().unwrap_or_default(),
                )
            });
            response.door_color = selected_colors.get(&d.door_color_id).map(|c| {
                DoorColorResponse::new(
                    c.clone(),
                    sizes_by_color
                        .get(&d.door_color_id)
                        .cloned()
                        .unwrap_or_default(),
                )
            });
            response.door_size = lookup(&sizes, d.door_size_id).map(DoorSizeResponse::from);
            response.door_glass = lookup(&glasses, d.door_glass_id).map(CatalogItem::from);
            response.door_handle = lookup(&handles, d.door_handle_id).map(CatalogItem::from);
            response.door_hinge = lookup(&hinges, d.door_hinge_id).map(CatalogItem::from);
            response.door_lock = lookup(&locks, d.door_lock_id).map(CatalogItem::from);
            response.door_weldorpel =
                lookup(&weldorpels, d.door_weldorpel_id).map(CatalogItem::from);
            response.door_mailbox = mailboxes.get(&d.id).map(|m| {
                DoorMailboxConfigurationResponse::new(
                    m.clone(),
                    mailbox_models
                        .get(&m.door_mailbox_id)
                        .cloned()
                        .map(CatalogItem::from),
                )
            });
            response
        })
        .collect();

    Ok(ConfigurationResponse {
        configuration: configuration.into(),
        configuration_type,
        doors,
    })
}

/// Fetch rows of `E` whose `column` is in `ids`, keyed by `key`.
async fn index_by_id<E, C, F>(
    conn: &C,
    column: E::Column,
    ids: BTreeSet<i32>,
    key: F,
) -> Result<HashMap<i32, E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
    F: Fn(&E::Model) -> i32,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = E::find().filter(column.is_in(ids)).all(conn).await?;
    Ok(rows.into_iter().map(|m| (key(&m), m)).collect())
}

fn lookup<T: Clone>(rows: &HashMap<i32, T>, id: Option<i32>) -> Option<T> {
    id.and_then(|id| rows.get(&id).cloned())
}

async fn colors_of_doors<C: ConnectionTrait>(
    conn: &C,
    door_ids: BTreeSet<i32>,
    filter: ColorFilter,
) -> Result<HashMap<i32, Vec<DoorColorItem>>, DbErr> {
    if door_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = door_color::Entity::find()
        .filter(door_color::Column::DoorId.is_in(door_ids))
        .apply_if(
            (filter == ColorFilter::ActiveOnly).then_some(true),
            |q, active| q.filter(door_color::Column::Active.eq(active)),
        )
        .order_by_asc(door_color::Column::Id)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<DoorColorItem>> = HashMap::new();
    for color in rows {
        grouped
            .entry(color.door_id)
            .or_default()
            .push(DoorColorItem::from(color));
    }
    Ok(grouped)
}

async fn sizes_of_colors<C: ConnectionTrait>(
    conn: &C,
    color_ids: BTreeSet<i32>,
) -> Result<HashMap<i32, Vec<DoorSizeResponse>>, DbErr> {
    if color_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = door_size::Entity::find()
        .filter(door_size::Column::DoorColorId.is_in(color_ids))
        .order_by_asc(door_size::Column::Id)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<DoorSizeResponse>> = HashMap::new();
    for size in rows {
        grouped
            .entry(size.door_color_id)
            .or_default()
            .push(DoorSizeResponse::from(size));
    }
    Ok(grouped)
}
