//! The normalized view of one event, as served by `/api/changes`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::details::EventDetails;
use crate::event::{Event, EventKind, Repo, opaque_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireActivity")]
pub struct ActivityView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub repo: Repo,
    pub created_at: DateTime<Utc>,
    pub details: EventDetails,
    #[serde(rename = "isReadLater")]
    pub is_read_later: bool,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

impl ActivityView {
    pub fn from_event(event: Event, is_read_later: bool, is_favorite: bool) -> Self {
        let details = EventDetails::from_event(&event);

        ActivityView {
            id: event.id,
            kind: event.kind,
            repo: event.repo,
            created_at: event.created_at,
            details,
            is_read_later,
            is_favorite,
        }
    }
}

/// Serialized form, with details still untyped until the kind is known.
#[derive(Deserialize)]
struct WireActivity {
    #[serde(deserialize_with = "opaque_id")]
    id: String,
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    repo: Repo,
    created_at: DateTime<Utc>,
    #[serde(default)]
    details: Value,
    #[serde(default, rename = "isReadLater")]
    is_read_later: bool,
    #[serde(default, rename = "isFavorite")]
    is_favorite: bool,
}

impl TryFrom<WireActivity> for ActivityView {
    type Error = serde_json::Error;

    fn try_from(wire: WireActivity) -> Result<Self, Self::Error> {
        let details = EventDetails::from_wire(&wire.kind, wire.details)?;

        Ok(ActivityView {
            id: wire.id,
            kind: wire.kind,
            repo: wire.repo,
            created_at: wire.created_at,
            details,
            is_read_later: wire.is_read_later,
            is_favorite: wire.is_favorite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::ForkDetails;
    use serde_json::json;

    fn fork_event() -> Event {
        serde_json::from_value(json!({
            "id": "9001",
            "type": "ForkEvent",
            "repo": { "id": 1, "name": "octocat/Spoon-Knife", "url": "https://api.github.com/repos/octocat/Spoon-Knife" },
            "payload": { "forkee": { "full_name": "someone/Spoon-Knife" } },
            "created_at": "2024-03-01T08:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_serialized_shape() {
        let view = ActivityView::from_event(fork_event(), true, false);

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": "9001",
                "type": "ForkEvent",
                "repo": { "id": 1, "name": "octocat/Spoon-Knife", "url": "https://api.github.com/repos/octocat/Spoon-Knife" },
                "created_at": "2024-03-01T08:00:00Z",
                "details": { "forkee": "someone/Spoon-Knife" },
                "isReadLater": true,
                "isFavorite": false
            })
        );
    }

    #[test]
    fn test_deserialize_uses_kind_for_details() {
        let view = ActivityView::from_event(fork_event(), false, true);
        let wire = serde_json::to_value(&view).unwrap();

        let parsed: ActivityView = serde_json::from_value(wire).unwrap();
        assert_eq!(
            parsed.details,
            EventDetails::Fork(ForkDetails {
                forkee: Some("someone/Spoon-Knife".to_string())
            })
        );
        assert!(parsed.is_favorite);
    }

    #[test]
    fn test_deserialize_snapshot_without_flags() {
        let parsed: ActivityView = serde_json::from_value(json!({
            "id": 5,
            "type": "PublicEvent",
            "repo": { "name": "a/b" },
            "created_at": "2024-03-01T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(parsed.id, "5");
        assert!(!parsed.is_read_later);
        assert!(!parsed.is_favorite);
    }
}
