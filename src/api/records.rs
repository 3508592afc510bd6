//! Generic record endpoints for students, teachers and classes.

use axum::extract::{Path, State};

use super::{created, no_content, success, ApiResult, FormPayload};
use crate::errors::AppError;
use crate::models::{Entity, EntityDraft, EntityKind, EntityList, EntityPatch};
use crate::AppState;

/// Record identifiers in paths. Anything that is not a plain integer matches nothing.
fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// GET /api/:type - List every record of a kind.
pub async fn list_records(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<EntityList> {
    let kind: EntityKind = kind.parse()?;

    let records = state.store.list(kind).await;
    tracing::debug!("Listing {} {}", records.len(), kind);
    success(records)
}

/// GET /api/:type/:id - Get a single record.
pub async fn get_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Entity> {
    let kind: EntityKind = kind.parse()?;

    let found = match parse_id(&id) {
        Some(id) => state.store.get(kind, id).await,
        None => None,
    };

    match found {
        Some(entity) => success(entity),
        None => Err(AppError::NotFound(kind)),
    }
}

/// POST /api/:type - Create a record, storing the attached image first.
///
/// The body is only inspected once the kind is known, so an unknown kind is
/// reported as such whatever was sent.
pub async fn create_record(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<FormPayload, AppError>,
) -> ApiResult<Entity> {
    let kind: EntityKind = kind.parse()?;
    let payload = payload?;

    // Validate before touching the disk so rejected requests leave no files behind.
    let mut draft = EntityDraft::from_fields(kind, &payload.fields)?;

    if let Some(file) = payload.file.as_ref() {
        if kind.accepts_upload() {
            let path = state.uploads.store(file).await?;
            draft = draft.with_image(path);
        } else {
            tracing::debug!("Ignoring image attached to a {} create", kind.singular());
        }
    }

    created(state.store.create(draft).await)
}

/// PUT /api/:type/:id - Update the editable fields of a record.
pub async fn update_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    payload: Result<FormPayload, AppError>,
) -> ApiResult<Entity> {
    let kind: EntityKind = kind.parse()?;
    let payload = payload?;

    let Some(id) = parse_id(&id) else {
        return Err(AppError::NotFound(kind));
    };

    let patch = EntityPatch::from_fields(kind, &payload.fields);
    match state.store.update(id, patch).await {
        Some(entity) => success(entity),
        None => Err(AppError::NotFound(kind)),
    }
}

/// DELETE /api/:type/:id - Delete a record. Deleting a missing record still succeeds.
pub async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<()> {
    let kind: EntityKind = kind.parse()?;

    if let Some(id) = parse_id(&id) {
        state.store.remove(kind, id).await;
    }

    no_content()
}
