//! Read-later and favorites endpoints
//!
//! Both collections expose the same three operations under
//! `/api/read-later` and `/api/favorites`.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{delete, get},
};
use ghfeed_core::{CollectionKind, SavedItem};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::routes::AppError;
use crate::state::AppState;

const INVALID_ACTIVITY: &str = "Invalid activity data";

pub fn router() -> Router<AppState> {
    CollectionKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| router.merge(collection_router(kind)))
}

fn collection_router(kind: CollectionKind) -> Router<AppState> {
    let base = format!("/api/{}", kind.slug());

    Router::new()
        .route(
            &base,
            get(move |state: State<AppState>| list_items(state, kind)).post(
                move |state: State<AppState>, body: Result<Json<Value>, JsonRejection>| {
                    add_item(state, kind, body)
                },
            ),
        )
        .route(
            &format!("{base}/{{id}}"),
            delete(move |state: State<AppState>, id: Path<String>| remove_item(state, kind, id)),
        )
}

#[derive(Serialize)]
pub struct AddResponse {
    pub success: bool,
    pub activity: Value,
}

#[derive(Serialize)]
pub struct RemoveResponse {
    pub success: bool,
}

/// GET /api/{collection} - Saved snapshots in insertion order
async fn list_items(State(state): State<AppState>, kind: CollectionKind) -> Json<Vec<Value>> {
    let store = state.store.read().await;
    Json(store.collection(kind).snapshots())
}

/// POST /api/{collection} - Save an activity snapshot, replacing any with the same id
async fn add_item(
    State(state): State<AppState>,
    kind: CollectionKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AddResponse>, AppError> {
    let Json(snapshot) = body.map_err(|rejection| {
        debug!(collection = %kind, error = %rejection, "rejected activity body");
        AppError::bad_request(INVALID_ACTIVITY)
    })?;

    let item =
        SavedItem::from_snapshot(snapshot).map_err(|_| AppError::bad_request(INVALID_ACTIVITY))?;
    let activity = item.snapshot.clone();

    info!(collection = %kind, id = %item.id, "saved activity");
    state.store.write().await.collection_mut(kind).insert(item);

    Ok(Json(AddResponse {
        success: true,
        activity,
    }))
}

/// DELETE /api/{collection}/{id} - Remove a snapshot; unknown ids succeed too
async fn remove_item(
    State(state): State<AppState>,
    kind: CollectionKind,
    Path(id): Path<String>,
) -> Json<RemoveResponse> {
    let removed = state.store.write().await.collection_mut(kind).remove(&id);
    info!(collection = %kind, id = %id, removed, "removed activity");

    Json(RemoveResponse { success: true })
}
