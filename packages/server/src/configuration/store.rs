use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::LockType,
};

use crate::entity::{
    configuration, door_configuration, door_mailbox_configuration, order, quote,
};
use crate::models::configuration::{CreateConfigurationRequest, DoorInput, MailboxInput};

/// Reads and writes the three record kinds of the configuration aggregate.
///
/// Works over a pooled connection or a transaction; atomicity is the caller's
/// concern.
pub struct ConfigurationStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ConfigurationStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(&self, id: i32) -> Result<Option<configuration::Model>, DbErr> {
        configuration::Entity::find_by_id(id).one(self.conn).await
    }

    /// Like [`find`](Self::find) but takes a row lock for the rest of the
    /// transaction.
    pub async fn find_for_update(&self, id: i32) -> Result<Option<configuration::Model>, DbErr> {
        configuration::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(self.conn)
            .await
    }

    pub async fn insert_configuration(
        &self,
        owner_id: i32,
        input: &CreateConfigurationRequest,
    ) -> Result<configuration::Model, DbErr> {
        let now = Utc::now();
        configuration::ActiveModel {
            user_id: Set(owner_id),
            type_id: Set(input.type_id),
            image: Set(input.image.clone()),
            screenshot: Set(input.screenshot.clone()),
            width: Set(input.width),
            height: Set(input.height),
            scale: Set(input.scale),
            active: Set(true),
            is_favorite: Set(false),
            title: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Touch the configuration row, replacing the screenshot when one is given.
    pub async fn update_screenshot(
        &self,
        existing: configuration::Model,
        screenshot: Option<&str>,
    ) -> Result<configuration::Model, DbErr> {
        let mut active: configuration::ActiveModel = existing.into();
        if let Some(screenshot) = screenshot {
            active.screenshot = Set(screenshot.to_string());
        }
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await
    }

    pub async fn set_favorite(
        &self,
        existing: configuration::Model,
        is_favorite: bool,
        title: Option<String>,
    ) -> Result<configuration::Model, DbErr> {
        let mut active: configuration::ActiveModel = existing.into();
        active.is_favorite = Set(is_favorite);
        if let Some(title) = title {
            active.title = Set(Some(title));
        }
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await
    }

    /// Soft delete: the row stays reachable by id but leaves the listing.
    pub async fn deactivate(
        &self,
        existing: configuration::Model,
    ) -> Result<configuration::Model, DbErr> {
        let mut active: configuration::ActiveModel = existing.into();
        active.active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await
    }

    /// Hard delete of the whole aggregate, children first.
    pub async fn delete_aggregate(&self, id: i32) -> Result<(), DbErr> {
        let door_ids: Vec<i32> = self
            .doors_of(id)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();
        self.delete_doors(&door_ids).await?;
        configuration::Entity::delete_by_id(id)
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Number of orders and quotes that reference the configuration.
    pub async fn count_links(&self, id: i32) -> Result<(u64, u64), DbErr> {
        let orders = order::Entity::find()
            .filter(order::Column::ConfigurationId.eq(id))
            .count(self.conn)
            .await?;
        let quotes = quote::Entity::find()
            .filter(quote::Column::ConfigurationId.eq(id))
            .count(self.conn)
            .await?;
        Ok((orders, quotes))
    }

    pub async fn doors_of(
        &self,
        configuration_id: i32,
    ) -> Result<Vec<door_configuration::Model>, DbErr> {
        door_configuration::Entity::find()
            .filter(door_configuration::Column::ConfigurationId.eq(configuration_id))
            .order_by_asc(door_configuration::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn mailboxes_of(
        &self,
        door_ids: &[i32],
    ) -> Result<Vec<door_mailbox_configuration::Model>, DbErr> {
        if door_ids.is_empty() {
            return Ok(Vec::new());
        }
        door_mailbox_configuration::Entity::find()
            .filter(
                door_mailbox_configuration::Column::DoorConfigurationId.is_in(door_ids.to_vec()),
            )
            .all(self.conn)
            .await
    }

    pub async fn insert_door(
        &self,
        configuration_id: i32,
        input: &DoorInput,
    ) -> Result<door_configuration::Model, DbErr> {
        let now = Utc::now();
        let mut active = door_configuration::ActiveModel {
            configuration_id: Set(configuration_id),
            created_at: Set(now),
            ..Default::default()
        };
        apply_door_attributes(&mut active, input);
        active.updated_at = Set(now);
        active.insert(self.conn).await
    }

    /// Overwrite the allow-listed columns of an existing door.
    pub async fn update_door(
        &self,
        id: i32,
        input: &DoorInput,
    ) -> Result<door_configuration::Model, DbErr> {
        let mut active = door_configuration::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        apply_door_attributes(&mut active, input);
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await
    }

    /// Remove doors by id together with their mailboxes. Returns the number
    /// of door rows deleted.
    pub async fn delete_doors(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }
        door_mailbox_configuration::Entity::delete_many()
            .filter(door_mailbox_configuration::Column::DoorConfigurationId.is_in(ids.to_vec()))
            .exec(self.conn)
            .await?;
        let result = door_configuration::Entity::delete_many()
            .filter(door_configuration::Column::Id.is_in(ids.to_vec()))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn insert_mailbox(
        &self,
        door_configuration_id: i32,
        input: &MailboxInput,
    ) -> Result<door_mailbox_configuration::Model, DbErr> {
        let now = Utc::now();
        door_mailbox_configuration::ActiveModel {
            door_configuration_id: Set(door_configuration_id),
            door_mailbox_id: Set(input.door_mailbox_id),
            bounds: Set(input.bounds.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn update_mailbox(
        &self,
        id: i32,
        input: &MailboxInput,
    ) -> Result<door_mailbox_configuration::Model, DbErr> {
        door_mailbox_configuration::ActiveModel {
            id: Unchanged(id),
            door_mailbox_id: Set(input.door_mailbox_id),
            bounds: Set(input.bounds.clone()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(self.conn)
        .await
    }

    pub async fn delete_mailbox(&self, id: i32) -> Result<(), DbErr> {
        door_mailbox_configuration::Entity::delete_by_id(id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}

fn apply_door_attributes(active: &mut door_configuration::ActiveModel, input: &DoorInput) {
    active.door_id = Set(input.door_id);
    active.door_color_id = Set(input.door_color_id);
    active.door_size_id = Set(input.door_size_id);
    active.door_glass_id = Set(input.door_glass_id);
    active.door_handle_id = Set(input.door_handle_id);
    active.door_hinge_id = Set(input.door_hinge_id);
    active.door_lock_id = Set(input.door_lock_id);
    active.door_weldorpel_id = Set(input.door_weldorpel_id);
    active.custom = Set(input.custom);
    active.width = Set(input.width);
    active.height = Set(input.height);
    active.bounds = Set(input.bounds.clone());
    active.handle_right = Set(input.handle_right);
    active.three_point_lock = Set(input.three_point_lock);
    active.draft_trap = Set(input.draft_trap);
}
