use std::collections::{HashMap, HashSet};

/// A persisted door of the configuration being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingDoor {
    pub id: i32,
    pub mailbox_id: Option<i32>,
}

/// Where a submitted door entry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorTarget {
    /// Update this existing row in place.
    Existing(i32),
    /// Insert a new row.
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxAction {
    Create,
    Update(i32),
    Delete(i32),
    None,
}

/// What to do for one submitted door entry, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorStep {
    pub target: DoorTarget,
    pub mailbox: MailboxAction,
}

/// Everything an update has to write, decided before any write happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub steps: Vec<DoorStep>,
    /// Existing doors the submission no longer mentions.
    pub stale: Vec<i32>,
}

/// A submitted entry as seen by the planner: its client-supplied id and
/// whether it carries a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedDoor {
    pub id: Option<i32>,
    pub has_mailbox: bool,
}

pub fn door_target(submitted_id: Option<i32>, existing: &HashSet<i32>) -> DoorTarget {
    match submitted_id {
        Some(id) if existing.contains(&id) => DoorTarget::Existing(id),
        _ => DoorTarget::New,
    }
}

/// Mailbox presence follows the submission: a submitted mailbox is upserted,
/// an omitted one is removed.
pub fn mailbox_action(existing_mailbox: Option<i32>, submitted: bool) -> MailboxAction {
    match (existing_mailbox, submitted) {
        (Some(id), true) => MailboxAction::Update(id),
        (None, true) => MailboxAction::Create,
        (Some(id), false) => MailboxAction::Delete(id),
        (None, false) => MailboxAction::None,
    }
}

/// Doors to delete: every existing door not matched by the submission. New
/// rows never appear in `existing`, so an empty `matched` set selects all of
/// them.
pub fn stale_doors(existing: &[ExistingDoor], matched: &HashSet<i32>) -> Vec<i32> {
    existing
        .iter()
        .map(|d| d.id)
        .filter(|id| !matched.contains(id))
        .collect()
}

/// Plan an update of `existing` doors towards `submitted`.
///
/// Submitted ids are expected to be unique; request validation rejects
/// duplicates before planning.
pub fn plan_update(existing: &[ExistingDoor], submitted: &[SubmittedDoor]) -> UpdatePlan {
    let ids: HashSet<i32> = existing.iter().map(|d| d.id).collect();
    let mailboxes: HashMap<i32, Option<i32>> =
        existing.iter().map(|d| (d.id, d.mailbox_id)).collect();

    let mut matched = HashSet::new();
    let steps = submitted
        .iter()
        .map(|entry| {
            let target = door_target(entry.id, &ids);
            let existing_mailbox = match target {
                DoorTarget::Existing(id) => {
                    matched.insert(id);
                    mailboxes.get(&id).copied().flatten()
                }
                DoorTarget::New => None,
            };
            DoorStep {
                target,
                mailbox: mailbox_action(existing_mailbox, entry.has_mailbox),
            }
        })
        .collect();

    UpdatePlan {
        steps,
        stale: stale_doors(existing, &matched),
    }
}
