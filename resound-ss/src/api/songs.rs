//! Song catalog endpoints
//!
//! - `POST /songs` (JSON) → `{"id": n}`
//! - `GET /songs/:id` → song JSON
//! - `DELETE /songs?id=1,2` → `{"ids": [...]}`

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use resound_common::api::{CreatedId, DeletedIds};
use resound_common::parse_csv_ids;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::api::method_not_allowed;
use crate::db::songs::InsertResult;
use crate::error::{ApiError, ApiResult};
use crate::validation::{Song, SongDto};
use crate::AppState;

/// Query parameters for bulk delete
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Comma-separated identifiers
    pub id: Option<String>,
}

/// POST /songs
pub async fn create_song(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SongDto>, JsonRejection>,
) -> ApiResult<Json<CreatedId>> {
    let Json(dto) = payload.map_err(|rejection| body_error(&headers, rejection))?;
    let song = dto.validate().map_err(ApiError::Validation)?;

    match state.songs.insert(&song).await? {
        InsertResult::Created => {
            info!(song_id = song.id, "Created song");
            Ok(Json(CreatedId { id: song.id }))
        }
        InsertResult::Duplicate => Err(ApiError::AlreadyExists(song.id)),
    }
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Song>> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidParameter("id".to_string()))?;

    state
        .songs
        .find(id)
        .await?
        .map(Json)
        .ok_or(ApiError::SongNotFound(id))
}

/// DELETE /songs?id=...
///
/// Unknown identifiers are skipped; the response lists what was removed.
pub async fn delete_songs(
    State(state): State<AppState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<DeletedIds>> {
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "Rejected delete query");
        ApiError::InvalidParameter("id".to_string())
    })?;
    let ids = parse_csv_ids(query.id.as_deref().unwrap_or_default())?;

    let mut seen = HashSet::with_capacity(ids.len());
    let mut deleted = Vec::new();
    for id in ids {
        if seen.insert(id) && state.songs.delete(id).await? {
            deleted.push(id);
        }
    }

    debug!(song_ids = ?deleted, "Deleted songs");
    Ok(Json(DeletedIds { ids: deleted }))
}

fn body_error(headers: &HeaderMap, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(
            headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
                .to_string(),
        ),
        other => {
            debug!(error = %other, "Rejected song payload");
            ApiError::InvalidRequestBody
        }
    }
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/songs",
            post(create_song)
                .delete(delete_songs)
                .fallback(method_not_allowed),
        )
        .route("/songs/:id", get(get_song).fallback(method_not_allowed))
}
