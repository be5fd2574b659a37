use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::entity::{
    configuration_type, door, door_color, door_glass, door_handle, door_hinge, door_lock,
    door_mailbox, door_size, door_weldorpel,
};
use crate::error::AppError;
use crate::models::configuration::DoorInput;

/// Catalog ids referenced by a write request, grouped per catalog table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogReferences {
    pub configuration_types: BTreeSet<i32>,
    pub doors: BTreeSet<i32>,
    pub colors: BTreeSet<i32>,
    pub sizes: BTreeSet<i32>,
    pub glasses: BTreeSet<i32>,
    pub handles: BTreeSet<i32>,
    pub hinges: BTreeSet<i32>,
    pub locks: BTreeSet<i32>,
    pub weldorpels: BTreeSet<i32>,
    pub mailboxes: BTreeSet<i32>,
}

impl CatalogReferences {
    pub fn collect<'a>(
        type_id: Option<i32>,
        doors: impl IntoIterator<Item = &'a DoorInput>,
    ) -> Self {
        let mut refs = Self::default();
        refs.configuration_types.extend(type_id);
        for door in doors {
            refs.doors.insert(door.door_id);
            refs.colors.insert(door.door_color_id);
            refs.sizes.extend(door.door_size_id);
            refs.glasses.extend(door.door_glass_id);
            refs.handles.extend(door.door_handle_id);
            refs.hinges.extend(door.door_hinge_id);
            refs.locks.extend(door.door_lock_id);
            refs.weldorpels.extend(door.door_weldorpel_id);
            if let Some(ref mailbox) = door.door_mailbox {
                refs.mailboxes.insert(mailbox.door_mailbox_id);
            }
        }
        refs
    }
}

/// Reject the request when any referenced catalog row does not exist.
pub async fn ensure_catalog_references<C: ConnectionTrait>(
    conn: &C,
    refs: &CatalogReferences,
) -> Result<(), AppError> {
    check::<configuration_type::Entity, _>(
        conn,
        configuration_type::Column::Id,
        &refs.configuration_types,
        "type_id",
    )
    .await?;
    check::<door::Entity, _>(conn, door::Column::Id, &refs.doors, "doors.*.door_id").await?;
    check::<door_color::Entity, _>(
        conn,
        door_color::Column::Id,
        &refs.colors,
        "doors.*.door_color_id",
    )
    .await?;
    check::<door_size::Entity, _>(
        conn,
        door_size::Column::Id,
        &refs.sizes,
        "doors.*.door_size_id",
    )
    .await?;
    check::<door_glass::Entity, _>(
        conn,
        door_glass::Column::Id,
        &refs.glasses,
        "doors.*.door_glass_id",
    )
    .await?;
    check::<door_handle::Entity, _>(
        conn,
        door_handle::Column::Id,
        &refs.handles,
        "doors.*.door_handle_id",
    )
    .await?;
    check::<door_hinge::Entity, _>(
        conn,
        door_hinge::Column::Id,
        &refs.hinges,
        "doors.*.door_hinge_id",
    )
    .await?;
    check::<door_lock::Entity, _>(
        conn,
        door_lock::Column::Id,
        &refs.locks,
        "doors.*.door_lock_id",
    )
    .await?;
    check::<door_weldorpel::Entity, _>(
        conn,
        door_weldorpel::Column::Id,
        &refs.weldorpels,
        "doors.*.door_weldorpel_id",
    )
    .await?;
    check::<door_mailbox::Entity, _>(
        conn,
        door_mailbox::Column::Id,
        &refs.mailboxes,
        "doors.*.door_mailbox.door_mailbox_id",
    )
    .await?;
    Ok(())
}

async fn check<E, C>(
    conn: &C,
    id_column: E::Column,
    ids: &BTreeSet<i32>,
    field: &str,
) -> Result<(), AppError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let missing = missing_ids::<E, C>(conn, id_column, ids).await?;
    if missing.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = missing.iter().map(i32::to_string).collect();
    Err(AppError::Validation(format!(
        "{field} references unknown id(s): {}",
        listed.join(", ")
    )))
}

async fn missing_ids<E, C>(
    conn: &C,
    id_column: E::Column,
    ids: &BTreeSet<i32>,
) -> Result<BTreeSet<i32>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(BTreeSet::new());
    }
    let found: BTreeSet<i32> = E::find()
        .filter(id_column.is_in(ids.iter().copied()))
        .select_only()
        .column(id_column)
        .into_tuple::<i32>()
        .all(conn)
        .await?
        .into_iter()
        .collect();
    Ok(ids.difference(&found).copied().collect())
}
