use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{configuration, door_configuration};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Listing: WHERE user_id = ? AND active ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_configuration_user_active")
        .table(configuration::Entity)
        .col(configuration::Column::UserId)
        .col(configuration::Column::Active)
        .to_string(PostgresQueryBuilder);
    create(db, "idx_configuration_user_active", &stmt).await;

    // Aggregate loads and reconciliation: WHERE configuration_id = ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_door_configuration_configuration")
        .table(door_configuration::Entity)
        .col(door_configuration::Column::ConfigurationId)
        .to_string(PostgresQueryBuilder);
    create(db, "idx_door_configuration_configuration", &stmt).await;

    Ok(())
}

async fn create(db: &DatabaseConnection, name: &str, stmt: &str) {
    match db.execute_unprepared(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}
