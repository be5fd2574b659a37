use std::str::FromStr;

use crate::entity::setting;

/// Catalog tables a setting may point at through `related_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CatalogTable {
    ConfigurationType,
    Door,
    DoorColor,
    DoorSize,
    DoorGlass,
    DoorHandle,
    DoorHinge,
    DoorLock,
    DoorMailbox,
    DoorWeldorpel,
}

impl FromStr for CatalogTable {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "configuration_type" => CatalogTable::ConfigurationType,
            "door" => CatalogTable::Door,
            "door_color" => CatalogTable::DoorColor,
            "door_size" => CatalogTable::DoorSize,
            "door_glass" => CatalogTable::DoorGlass,
            "door_handle" => CatalogTable::DoorHandle,
            "door_hinge" => CatalogTable::DoorHinge,
            "door_lock" => CatalogTable::DoorLock,
            "door_mailbox" => CatalogTable::DoorMailbox,
            "door_weldorpel" => CatalogTable::DoorWeldorpel,
            _ => return Err(()),
        })
    }
}

/// Where the public value of a setting comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    Plain(Option<String>),
    Related { table: CatalogTable, id: i32 },
}

/// Settings that are not shown publicly yield `None`.
pub fn setting_source(m: &setting::Model) -> Option<SettingSource> {
    if !m.active || m.is_hidden {
        return None;
    }
    let related = m
        .related_type
        .as_deref()
        .zip(m.related_id)
        .and_then(|(table, id)| match table.parse() {
            Ok(table) => Some(SettingSource::Related { table, id }),
            Err(()) => {
                tracing::warn!(key = %m.key, related_type = table, "Unknown setting relation");
                None
            }
        });
    Some(related.unwrap_or_else(|| SettingSource::Plain(m.value.clone())))
}
