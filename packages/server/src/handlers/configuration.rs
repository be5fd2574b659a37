use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::configuration::{
    AggregateProjection, AggregateReconciler, CatalogReferences, ConfigurationStore,
    DeletionMode, deletion_mode, ensure_catalog_references, load_aggregate,
};
use crate::entity::configuration;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::payload::{AppJson, AppQuery};
use crate::models::configuration::*;
use crate::models::shared::{Pagination, page_window};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Configurations",
    operation_id = "listConfigurations",
    summary = "List the caller's configurations",
    description = "Returns the caller's active configurations, newest first. Pass `favorite=1` to only list favorites.",
    params(ConfigurationListQuery),
    responses(
        (status = 200, description = "Page of configurations", body = ConfigurationListResponse),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_configurations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ConfigurationListQuery>,
) -> Result<Json<ConfigurationListResponse>, AppError> {
    let (page, per_page) = page_window(query.page, query.per_page, 15);

    let mut select = configuration::Entity::find()
        .filter(configuration::Column::UserId.eq(auth_user.user_id))
        .filter(configuration::Column::Active.eq(true));
    if query.favorite == Some(true) {
        select = select.filter(configuration::Column::IsFavorite.eq(true));
    }

    let paginator = select
        .order_by_desc(configuration::Column::CreatedAt)
        .order_by_desc(configuration::Column::Id)
        .paginate(&state.db, per_page);
    let total = paginator.num_items().await?;
    let data = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(ConfigurationSummary::from)
        .collect();

    Ok(Json(ConfigurationListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Configurations",
    operation_id = "createConfiguration",
    summary = "Create a configuration with its doors",
    description = "Creates a configuration owned by the caller together with every submitted door and mailbox, in one transaction. Any failure leaves nothing behind.",
    request_body = CreateConfigurationRequest,
    responses(
        (status = 201, description = "Configuration created", body = ConfigurationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Write failed, nothing persisted (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateConfigurationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_configuration(&payload)?;
    ensure_catalog_references(
        &state.db,
        &CatalogReferences::collect(Some(payload.type_id), &payload.doors),
    )
    .await?;

    let txn = state.db.begin().await?;
    let reconciled = AggregateReconciler::new(&txn)
        .create(&auth_user, &payload)
        .await?;
    let aggregate = load_aggregate(
        &txn,
        reconciled.configuration,
        &AggregateProjection::default(),
    )
    .await?;
    txn.commit().await?;

    info!(
        configuration_id = aggregate.configuration.id,
        doors = reconciled.summary.doors_inserted,
        mailboxes = reconciled.summary.mailboxes_created,
        "Configuration created"
    );

    Ok((StatusCode::CREATED, Json(aggregate)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Configurations",
    operation_id = "getConfiguration",
    summary = "Get a configuration with its doors",
    description = "Returns the full aggregate. Soft-deleted configurations are still returned, with `active = false`.",
    params(("id" = i32, Path, description = "Configuration ID")),
    responses(
        (status = 200, description = "Configuration details", body = ConfigurationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ConfigurationResponse>, AppError> {
    let model = find_owned(&state.db, &auth_user, id).await?;
    let aggregate = load_aggregate(&state.db, model, &AggregateProjection::default()).await?;
    Ok(Json(aggregate))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Configurations",
    operation_id = "replaceConfiguration",
    summary = "Reconcile a configuration's doors",
    description = "Same as the PATCH variant.",
    params(("id" = i32, Path, description = "Configuration ID")),
    request_body = UpdateConfigurationRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ConfigurationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Write failed, nothing changed (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
pub async fn replace_configuration(
    auth_user: AuthUser,
    state: State<AppState>,
    id: Path<i32>,
    payload: AppJson<UpdateConfigurationRequest>,
) -> Result<Json<ConfigurationResponse>, AppError> {
    update_configuration(auth_user, state, id, payload).await
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Configurations",
    operation_id = "updateConfiguration",
    summary = "Reconcile a configuration's doors",
    description = "Makes the persisted doors mirror the submitted list: entries whose `id` belongs to this configuration are updated in place, all others are created, and doors missing from the list are deleted with their mailboxes. A door submitted without `door_mailbox` loses any existing mailbox. An empty `doors` list deletes every door. Only `screenshot` can change on the configuration itself.",
    params(("id" = i32, Path, description = "Configuration ID")),
    request_body = UpdateConfigurationRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ConfigurationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Write failed, nothing changed (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateConfigurationRequest>,
) -> Result<Json<ConfigurationResponse>, AppError> {
    validate_update_configuration(&payload)?;
    ensure_catalog_references(
        &state.db,
        &CatalogReferences::collect(None, payload.doors.iter().map(|d| &d.attributes)),
    )
    .await?;

    let txn = state.db.begin().await?;
    let existing = find_owned_for_update(&txn, &auth_user, id).await?;
    let reconciled = AggregateReconciler::new(&txn)
        .update(existing, &payload)
        .await?;
    let aggregate = load_aggregate(
        &txn,
        reconciled.configuration,
        &AggregateProjection::default(),
    )
    .await?;
    txn.commit().await?;

    let summary = reconciled.summary;
    info!(
        configuration_id = id,
        doors_inserted = summary.doors_inserted,
        doors_updated = summary.doors_updated,
        doors_deleted = summary.doors_deleted,
        mailboxes_created = summary.mailboxes_created,
        mailboxes_updated = summary.mailboxes_updated,
        mailboxes_deleted = summary.mailboxes_deleted,
        "Configuration reconciled"
    );

    Ok(Json(aggregate))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Configurations",
    operation_id = "deleteConfiguration",
    summary = "Delete a configuration",
    description = "Configurations referenced by an order or quote are deactivated (`active = false`) and stay readable by id. Unreferenced ones are removed with their doors and mailboxes.",
    params(("id" = i32, Path, description = "Configuration ID")),
    responses(
        (status = 204, description = "Configuration deleted or deactivated"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_owned_for_update(&txn, &auth_user, id).await?;

    let store = ConfigurationStore::new(&txn);
    let (orders, quotes) = store.count_links(id).await?;
    let mode = deletion_mode(orders, quotes);
    match mode {
        DeletionMode::Soft => {
            store.deactivate(existing).await?;
        }
        DeletionMode::Hard => store.delete_aggregate(id).await?,
    }
    txn.commit().await?;

    info!(configuration_id = id, ?mode, orders, quotes, "Configuration deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/favorite",
    tag = "Configurations",
    operation_id = "favoriteConfiguration",
    summary = "Mark a configuration as favorite",
    description = "Sets `is_favorite`. A non-blank `title` in the optional body replaces the current title.",
    params(("id" = i32, Path, description = "Configuration ID")),
    request_body(content = FavoriteRequest, description = "Optional body"),
    responses(
        (status = 200, description = "Configuration marked as favorite", body = ConfigurationSummary),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, body))]
pub async fn favorite_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Bytes,
) -> Result<Json<ConfigurationSummary>, AppError> {
    let payload: FavoriteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        FavoriteRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::Validation(e.to_string()))?
    };
    validate_favorite(&payload)?;

    let existing = find_owned(&state.db, &auth_user, id).await?;
    let title = payload
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let model = ConfigurationStore::new(&state.db)
        .set_favorite(existing, true, title)
        .await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/unfavorite",
    tag = "Configurations",
    operation_id = "unfavoriteConfiguration",
    summary = "Remove a configuration from favorites",
    params(("id" = i32, Path, description = "Configuration ID")),
    responses(
        (status = 200, description = "Configuration no longer favorite", body = ConfigurationSummary),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Configuration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn unfavorite_configuration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ConfigurationSummary>, AppError> {
    let existing = find_owned(&state.db, &auth_user, id).await?;
    let model = ConfigurationStore::new(&state.db)
        .set_favorite(existing, false, None)
        .await?;
    Ok(Json(model.into()))
}

async fn find_owned<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    id: i32,
) -> Result<configuration::Model, AppError> {
    let model = ConfigurationStore::new(db)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Configuration not found".into()))?;
    auth_user.require_owner(model.user_id)?;
    Ok(model)
}

async fn find_owned_for_update(
    txn: &DatabaseTransaction,
    auth_user: &AuthUser,
    id: i32,
) -> Result<configuration::Model, AppError> {
    let model = ConfigurationStore::new(txn)
        .find_for_update(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Configuration not found".into()))?;
    auth_user.require_owner(model.user_id)?;
    Ok(model)
}
