//! Activity feed endpoint

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use ghfeed_core::pagination::parse_page;
use ghfeed_core::{ActivityView, FeedResult, LinkHeader, PageDescriptor, PaginationMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/changes", get(list_changes))
}

#[derive(Deserialize)]
pub struct ChangesQuery {
    pub username: Option<String>,
    pub page: Option<String>,
}

/// One page of normalized activity
#[derive(Serialize)]
pub struct ChangesResponse {
    pub events: Vec<ActivityView>,
    pub pagination: PageDescriptor,
}

impl ChangesResponse {
    /// What clients get whenever the feed can't be fetched.
    fn empty() -> Self {
        ChangesResponse {
            events: Vec::new(),
            pagination: PageDescriptor::empty(),
        }
    }
}

/// GET /api/changes?username=..&page=.. - One page of a user's activity
///
/// Upstream failures never surface as errors: the client gets an empty
/// page so it always has something to display.
async fn list_changes(
    State(state): State<AppState>,
    query: Result<Query<ChangesQuery>, QueryRejection>,
) -> Result<Json<ChangesResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "rejected activity query");
        AppError::bad_request("Invalid query parameters")
    })?;
    let username = query
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("Username is required"))?;
    let page = parse_page(query.page.as_deref());

    match fetch_changes(&state, &username, page).await {
        Ok(changes) => {
            info!(
                username = %username,
                page,
                events = changes.events.len(),
                total_pages = changes.pagination.total_pages,
                "served activity page"
            );
            Ok(Json(changes))
        }
        Err(e) => {
            warn!(username = %username, page, error = %e, "returning empty activity page");
            Ok(Json(ChangesResponse::empty()))
        }
    }
}

async fn fetch_changes(state: &AppState, username: &str, page: u32) -> FeedResult<ChangesResponse> {
    let (events, pagination) = match state.pagination_mode {
        PaginationMode::Link => {
            state.github.check_user(username).await?;
            let fetched = state.github.list_events(username, page).await?;
            let links = fetched
                .link
                .as_deref()
                .map(LinkHeader::parse)
                .unwrap_or_default();
            (fetched.events, PageDescriptor::from_links(&links, page))
        }
        PaginationMode::Length => {
            let fetched = state.github.list_events(username, page).await?;
            let pagination = PageDescriptor::from_page_length(page, fetched.events.len());
            (fetched.events, pagination)
        }
    };

    let store = state.store.read().await;
    let events = events
        .into_iter()
        .map(|event| {
            let read_later = store.is_read_later(&event.id);
            let favorite = store.is_favorite(&event.id);
            ActivityView::from_event(event, read_later, favorite)
        })
        .collect();

    Ok(ChangesResponse { events, pagination })
}
