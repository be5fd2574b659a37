//! The configuration aggregate: a configuration, its doors and their
//! mailboxes, always written together in one transaction.

mod lifecycle;
mod plan;
mod projection;
mod reconcile;
mod references;
mod store;

pub use lifecycle::{DeletionMode, deletion_mode};
pub use plan::{
    DoorStep, DoorTarget, ExistingDoor, MailboxAction, SubmittedDoor, UpdatePlan, plan_update,
};
pub use projection::{AggregateProjection, ColorFilter, load_aggregate};
pub use reconcile::{AggregateReconciler, ReconcileError, ReconcileSummary, Reconciled, RecordKind};
pub use references::{CatalogReferences, ensure_catalog_references};
pub use store::ConfigurationStore;
