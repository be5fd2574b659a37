use std::collections::HashMap;
use std::fmt;

use sea_orm::{DatabaseTransaction, DbErr};
use tracing::{debug, instrument};

use super::plan::{DoorTarget, ExistingDoor, MailboxAction, SubmittedDoor, plan_update};
use super::store::ConfigurationStore;
use crate::entity::configuration;
use crate::extractors::auth::AuthUser;
use crate::models::configuration::{
    CreateConfigurationRequest, DoorInput, UpdateConfigurationRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Configuration,
    Door,
    Mailbox,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Configuration => "configuration",
            RecordKind::Door => "door configuration",
            RecordKind::Mailbox => "door mailbox configuration",
        })
    }
}

/// A persistence failure while writing the aggregate. Always fatal for the
/// request; the surrounding transaction is never committed.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("failed to load {kind} rows: {source}")]
    Load {
        kind: RecordKind,
        #[source]
        source: DbErr,
    },
    #[error("failed to save {kind}: {source}")]
    Save {
        kind: RecordKind,
        #[source]
        source: DbErr,
    },
    #[error("failed to delete {kind}: {source}")]
    Delete {
        kind: RecordKind,
        #[source]
        source: DbErr,
    },
}

impl ReconcileError {
    fn load(kind: RecordKind) -> impl FnOnce(DbErr) -> Self {
        move |source| ReconcileError::Load { kind, source }
    }

    fn save(kind: RecordKind) -> impl FnOnce(DbErr) -> Self {
        move |source| ReconcileError::Save { kind, source }
    }

    fn delete(kind: RecordKind) -> impl FnOnce(DbErr) -> Self {
        move |source| ReconcileError::Delete { kind, source }
    }
}

/// Row counts written by one reconciliation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub doors_inserted: usize,
    pub doors_updated: usize,
    pub doors_deleted: u64,
    pub mailboxes_created: usize,
    pub mailboxes_updated: usize,
    pub mailboxes_deleted: usize,
}

pub struct Reconciled {
    pub configuration: configuration::Model,
    pub summary: ReconcileSummary,
}

/// Writes a configuration aggregate so that its persisted doors and mailboxes
/// match a submitted list exactly.
///
/// Runs on a transaction: on any error the caller drops it uncommitted and
/// nothing of the request persists.
pub struct AggregateReconciler<'a> {
    store: ConfigurationStore<'a, DatabaseTransaction>,
}

impl<'a> AggregateReconciler<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self {
            store: ConfigurationStore::new(txn),
        }
    }

    /// Create a configuration owned by `owner` with every submitted door and
    /// mailbox.
    #[instrument(skip_all, fields(user_id = owner.user_id, doors = input.doors.len()))]
    pub async fn create(
        &self,
        owner: &AuthUser,
        input: &CreateConfigurationRequest,
    ) -> Result<Reconciled, ReconcileError> {
        let configuration = self
            .store
            .insert_configuration(owner.user_id, input)
            .await
            .map_err(ReconcileError::save(RecordKind::Configuration))?;

        let mut summary = ReconcileSummary::default();
        for door in &input.doors {
            let created = self
                .store
                .insert_door(configuration.id, door)
                .await
                .map_err(ReconcileError::save(RecordKind::Door))?;
            summary.doors_inserted += 1;

            if let Some(ref mailbox) = door.door_mailbox {
                self.store
                    .insert_mailbox(created.id, mailbox)
                    .await
                    .map_err(ReconcileError::save(RecordKind::Mailbox))?;
                summary.mailboxes_created += 1;
            }
        }

        Ok(Reconciled {
            configuration,
            summary,
        })
    }

    /// Update `existing` so its doors mirror `input.doors`: matched ids are
    /// updated in place, everything else is inserted, and doors left out of
    /// the submission are deleted along with their mailboxes.
    #[instrument(skip_all, fields(configuration_id = existing.id, doors = input.doors.len()))]
    pub async fn update(
        &self,
        existing: configuration::Model,
        input: &UpdateConfigurationRequest,
    ) -> Result<Reconciled, ReconcileError> {
        let configuration = self
            .store
            .update_screenshot(existing, input.screenshot.as_deref())
            .await
            .map_err(ReconcileError::save(RecordKind::Configuration))?;

        let current = self.existing_doors(configuration.id).await?;
        let submitted: Vec<SubmittedDoor> = input
            .doors
            .iter()
            .map(|d| SubmittedDoor {
                id: d.id,
                has_mailbox: d.attributes.door_mailbox.is_some(),
            })
            .collect();
        let plan = plan_update(&current, &submitted);
        debug!(stale = plan.stale.len(), "Planned door reconciliation");

        let mut summary = ReconcileSummary::default();
        for (door, step) in input.doors.iter().zip(&plan.steps) {
            let door_id = self
                .write_door(configuration.id, step.target, &door.attributes, &mut summary)
                .await?;
            self.write_mailbox(door_id, step.mailbox, &door.attributes, &mut summary)
                .await?;
        }

        summary.doors_deleted = self
            .store
            .delete_doors(&plan.stale)
            .await
            .map_err(ReconcileError::delete(RecordKind::Door))?;

        Ok(Reconciled {
            configuration,
            summary,
        })
    }

    async fn existing_doors(
        &self,
        configuration_id: i32,
    ) -> Result<Vec<ExistingDoor>, ReconcileError> {
        let doors = self
            .store
            .doors_of(configuration_id)
            .await
            .map_err(ReconcileError::load(RecordKind::Door))?;
        let door_ids: Vec<i32> = doors.iter().map(|d| d.id).collect();
        let mailboxes: HashMap<i32, i32> = self
            .store
            .mailboxes_of(&door_ids)
            .await
            .map_err(ReconcileError::load(RecordKind::Mailbox))?
            .into_iter()
            .map(|m| (m.door_configuration_id, m.id))
            .collect();

        Ok(doors
            .into_iter()
            .map(|d| ExistingDoor {
                id: d.id,
                mailbox_id: mailboxes.get(&d.id).copied(),
            })
            .collect())
    }

    async fn write_door(
        &self,
        configuration_id: i32,
        target: DoorTarget,
        attributes: &DoorInput,
        summary: &mut ReconcileSummary,
    ) -> Result<i32, ReconcileError> {
        let saved = match target {
            DoorTarget::Existing(id) => {
                summary.doors_updated += 1;
                self.store.update_door(id, attributes).await
            }
            DoorTarget::New => {
                summary.doors_inserted += 1;
                self.store.insert_door(configuration_id, attributes).await
            }
        }
        .map_err(ReconcileError::save(RecordKind::Door))?;
        Ok(saved.id)
    }

    async fn write_mailbox(
        &self,
        door_id: i32,
        action: MailboxAction,
        attributes: &DoorInput,
        summary: &mut ReconcileSummary,
    ) -> Result<(), ReconcileError> {
        match (action, attributes.door_mailbox.as_ref()) {
            (MailboxAction::Create, Some(mailbox)) => {
                self.store
                    .insert_mailbox(door_id, mailbox)
                    .await
                    .map_err(ReconcileError::save(RecordKind::Mailbox))?;
                summary.mailboxes_created += 1;
            }
            (MailboxAction::Update(id), Some(mailbox)) => {
                self.store
                    .update_mailbox(id, mailbox)
                    .await
                    .map_err(ReconcileError::save(RecordKind::Mailbox))?;
                summary.mailboxes_updated += 1;
            }
            (MailboxAction::Delete(id), _) => {
                self.store
                    .delete_mailbox(id)
                    .await
                    .map_err(ReconcileError::delete(RecordKind::Mailbox))?;
                summary.mailboxes_deleted += 1;
            }
            _ => {}
        }
        Ok(())
    }
}
