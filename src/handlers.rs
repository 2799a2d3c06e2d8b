use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::exchange::{export_payload, parse_import};
use crate::models::{
    CollectionResponse, ExportFile, Filter, ImportResponse, MonthSummary, RawEntry,
};
use crate::state::AppState;
use crate::stats::month_summary;
use crate::storage::StoreSnapshot;
use crate::ui::render_index;
use crate::validate::{normalize, validate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.year))
}

pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<CollectionResponse>, AppError> {
    let snapshot = state.client.reload().await?;
    Ok(Json(collection_response(state.year, snapshot)))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(raw): Json<RawEntry>,
) -> Result<Json<CollectionResponse>, AppError> {
    let entry = normalize(raw);
    if let Err(err) = validate(&entry, state.year) {
        return Err(AppError::validation(err.message));
    }
    let snapshot = state.client.add_entry(entry).await?;
    Ok(Json(collection_response(state.year, snapshot)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CollectionResponse>, AppError> {
    match state.client.remove_entry(&id).await? {
        Some(snapshot) => Ok(Json(collection_response(state.year, snapshot))),
        None => Err(AppError::not_found(format!("no entry with id {id}"))),
    }
}

pub async fn get_month(
    State(state): State<AppState>,
    Path(month): Path<u32>,
    Query(filter): Query<Filter>,
) -> Result<Json<MonthSummary>, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation("month must be between 1 and 12"));
    }
    let snapshot = state.client.snapshot().await;
    Ok(Json(month_summary(
        &snapshot.entries,
        state.year,
        month,
        &filter,
    )))
}

pub async fn export(State(state): State<AppState>) -> Result<Json<ExportFile>, AppError> {
    let snapshot = state.client.snapshot().await;
    Ok(Json(export_payload(state.year, &snapshot.entries)))
}

pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ImportResponse>, AppError> {
    let records = parse_import(&payload).map_err(|err| AppError::format(err.message))?;
    let (summary, snapshot) = state.client.import(records, state.year).await?;
    Ok(Json(ImportResponse {
        summary,
        collection: collection_response(state.year, snapshot),
    }))
}

/// Push whatever is in memory, including a delta left unsaved by an earlier
/// transport failure.
pub async fn save(State(state): State<AppState>) -> Result<Json<CollectionResponse>, AppError> {
    let snapshot = state.client.save().await?;
    Ok(Json(collection_response(state.year, snapshot)))
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<CollectionResponse>, AppError> {
    let snapshot = state.client.clear().await?;
    Ok(Json(collection_response(state.year, snapshot)))
}

fn collection_response(year: i32, snapshot: StoreSnapshot) -> CollectionResponse {
    CollectionResponse {
        year,
        entries: snapshot.entries,
        revision: snapshot.revision,
        updated_at: snapshot.updated_at,
    }
}
