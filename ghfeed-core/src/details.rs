//! Normalized per-kind details of a GitHub event.
//!
//! The events API delivers a payload whose shape depends on the event type.
//! `EventDetails` keeps only the handful of fields a feed needs to display.
//! Every input field is optional: a missing or mistyped field is omitted from
//! the output, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{Event, EventKind};

/// Length of an abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 7;

/// Number of characters of a comment body kept in the details.
pub const COMMENT_PREVIEW_LEN: usize = 100;

/// Marker appended to a comment preview.
pub const ELLIPSIS: &str = "...";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Details of an event, one shape per known kind.
///
/// Serializes as a flat camelCase object without a tag; the event's `type`
/// travels next to it and tells the shapes apart (see `from_wire`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventDetails {
    Push(PushDetails),
    Create(RefDetails),
    PullRequest(ItemDetails),
    Issues(ItemDetails),
    IssueComment(CommentDetails),
    Watch(WatchDetails),
    Fork(ForkDetails),
    Delete(RefDetails),
    Public(NoDetails),
    Release(ReleaseDetails),
    Unknown(NoDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDetails {
    #[serde(default)]
    pub commits: Vec<CommitSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub commit_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Created or deleted branch/tag. `description` is only set for creations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Pull request or issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForkDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forkee: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoDetails {}

impl EventDetails {
    pub fn from_event(event: &Event) -> Self {
        Self::normalize(&event.kind, &event.payload)
    }

    /// Extract the displayable fields of `payload` for an event of `kind`.
    pub fn normalize(kind: &EventKind, payload: &Value) -> Self {
        match kind {
            EventKind::Push => EventDetails::Push(PushDetails {
                commits: payload
                    .get("commits")
                    .and_then(Value::as_array)
                    .map(|commits| commits.iter().map(commit_summary).collect())
                    .unwrap_or_default(),
                branch: text(payload, "/ref").map(|r| branch_name(&r)),
                commit_count: payload.get("size").and_then(Value::as_u64).unwrap_or(0),
            }),
            EventKind::Create => EventDetails::Create(RefDetails {
                ref_type: text(payload, "/ref_type"),
                ref_name: text(payload, "/ref"),
                description: text(payload, "/description"),
            }),
            EventKind::PullRequest => {
                EventDetails::PullRequest(item_details(payload, "/pull_request"))
            }
            EventKind::Issues => EventDetails::Issues(item_details(payload, "/issue")),
            EventKind::IssueComment => EventDetails::IssueComment(CommentDetails {
                action: text(payload, "/action"),
                issue_title: text(payload, "/issue/title"),
                issue_number: number(payload, "/issue/number"),
                comment_body: text(payload, "/comment/body").map(|body| comment_preview(&body)),
            }),
            EventKind::Watch => EventDetails::Watch(WatchDetails {
                action: text(payload, "/action"),
            }),
            EventKind::Fork => EventDetails::Fork(ForkDetails {
                forkee: text(payload, "/forkee/full_name"),
            }),
            EventKind::Delete => EventDetails::Delete(RefDetails {
                ref_type: text(payload, "/ref_type"),
                ref_name: text(payload, "/ref"),
                description: None,
            }),
            EventKind::Public => EventDetails::Public(NoDetails {}),
            EventKind::Release => EventDetails::Release(ReleaseDetails {
                action: text(payload, "/action"),
                release_name: text(payload, "/release/name")
                    .or_else(|| text(payload, "/release/tag_name")),
            }),
            EventKind::Other(_) => EventDetails::Unknown(NoDetails {}),
        }
    }

    /// Read details back from their serialized form, using the event kind to
    /// pick the shape.
    pub fn from_wire(kind: &EventKind, value: Value) -> serde_json::Result<Self> {
        // Null or missing details (older snapshots) read as an empty record.
        let value = if value.is_null() {
            Value::Object(Default::default())
        } else {
            value
        };

        Ok(match kind {
            EventKind::Push => EventDetails::Push(serde_json::from_value(value)?),
            EventKind::Create => EventDetails::Create(serde_json::from_value(value)?),
            EventKind::PullRequest => EventDetails::PullRequest(serde_json::from_value(value)?),
            EventKind::Issues => EventDetails::Issues(serde_json::from_value(value)?),
            EventKind::IssueComment => EventDetails::IssueComment(serde_json::from_value(value)?),
            EventKind::Watch => EventDetails::Watch(serde_json::from_value(value)?),
            EventKind::Fork => EventDetails::Fork(serde_json::from_value(value)?),
            EventKind::Delete => EventDetails::Delete(serde_json::from_value(value)?),
            EventKind::Public => EventDetails::Public(NoDetails {}),
            EventKind::Release => EventDetails::Release(serde_json::from_value(value)?),
            EventKind::Other(_) => EventDetails::Unknown(NoDetails {}),
        })
    }
}

/// First `SHORT_SHA_LEN` characters of a commit hash. Shorter input is returned as is.
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// Branch name of a git ref, e.g. `refs/heads/main` -> `main`.
pub fn branch_name(git_ref: &str) -> String {
    git_ref
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(git_ref)
        .to_string()
}

/// First `COMMENT_PREVIEW_LEN` characters of a comment body, followed by `ELLIPSIS`.
///
/// The marker is appended even when nothing was cut off; feed consumers
/// already rely on every preview ending with it.
pub fn comment_preview(body: &str) -> String {
    let mut preview: String = body.chars().take(COMMENT_PREVIEW_LEN).collect();
    preview.push_str(ELLIPSIS);
    preview
}

fn commit_summary(commit: &Value) -> CommitSummary {
    CommitSummary {
        message: text(commit, "/message"),
        sha: text(commit, "/sha").map(|sha| short_sha(&sha)),
    }
}

fn item_details(payload: &Value, item: &str) -> ItemDetails {
    ItemDetails {
        action: text(payload, "/action"),
        title: text(payload, &format!("{item}/title")),
        number: number(payload, &format!("{item}/number")),
        state: text(payload, &format!("{item}/state")),
    }
}

fn text(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn number(value: &Value, pointer: &str) -> Option<u64> {
    value.pointer(pointer).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details_json(kind: &str, payload: Value) -> Value {
        let details = EventDetails::normalize(&EventKind::from(kind.to_string()), &payload);
        serde_json::to_value(details).unwrap()
    }

    #[test]
    fn test_push_event() {
        let payload = json!({
            "ref": "refs/heads/main",
            "size": 2,
            "commits": [
                { "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e", "message": "Fix all the bugs" },
                { "sha": "abc12", "message": "Tiny" }
            ]
        });

        assert_eq!(
            details_json("PushEvent", payload),
            json!({
                "commits": [
                    { "message": "Fix all the bugs", "sha": "6dcb09b" },
                    { "message": "Tiny", "sha": "abc12" }
                ],
                "branch": "main",
                "commitCount": 2
            })
        );
    }

    #[test]
    fn test_push_event_without_commits_or_size() {
        assert_eq!(
            details_json("PushEvent", json!({})),
            json!({ "commits": [], "commitCount": 0 })
        );
    }

    #[test]
    fn test_push_event_keeps_non_branch_refs() {
        let details = details_json("PushEvent", json!({ "ref": "refs/tags/v1.0" }));
        assert_eq!(details["branch"], "refs/tags/v1.0");
    }

    #[test]
    fn test_create_event() {
        let payload = json!({
            "ref": "feature-x",
            "ref_type": "branch",
            "description": "A sample repo",
            "master_branch": "main"
        });

        assert_eq!(
            details_json("CreateEvent", payload),
            json!({ "refType": "branch", "ref": "feature-x", "description": "A sample repo" })
        );
    }

    #[test]
    fn test_create_event_null_description_is_omitted() {
        let payload = json!({ "ref": null, "ref_type": "repository", "description": null });
        assert_eq!(
            details_json("CreateEvent", payload),
            json!({ "refType": "repository" })
        );
    }

    #[test]
    fn test_pull_request_event() {
        let payload = json!({
            "action": "opened",
            "number": 7,
            "pull_request": { "title": "Add feature", "number": 7, "state": "open", "body": "long" }
        });

        assert_eq!(
            details_json("PullRequestEvent", payload),
            json!({ "action": "opened", "title": "Add feature", "number": 7, "state": "open" })
        );
    }

    #[test]
    fn test_issues_event() {
        let payload = json!({
            "action": "closed",
            "issue": { "title": "Crash on start", "number": 12, "state": "closed" }
        });

        assert_eq!(
            details_json("IssuesEvent", payload),
            json!({ "action": "closed", "title": "Crash on start", "number": 12, "state": "closed" })
        );
    }

    #[test]
    fn test_issues_event_without_issue() {
        assert_eq!(
            details_json("IssuesEvent", json!({ "action": "opened" })),
            json!({ "action": "opened" })
        );
    }

    #[test]
    fn test_issue_comment_event_truncates_long_body() {
        let body = "x".repeat(250);
        let payload = json!({
            "action": "created",
            "issue": { "title": "Crash on start", "number": 12 },
            "comment": { "body": body }
        });

        let details = details_json("IssueCommentEvent", payload);
        let expected_body = format!("{}...", "x".repeat(100));
        assert_eq!(
            details,
            json!({
                "action": "created",
                "issueTitle": "Crash on start",
                "issueNumber": 12,
                "commentBody": expected_body
            })
        );
    }

    #[test]
    fn test_issue_comment_short_body_still_gets_ellipsis() {
        let payload = json!({ "comment": { "body": "Looks good" } });
        let details = details_json("IssueCommentEvent", payload);
        assert_eq!(details["commentBody"], "Looks good...");
    }

    #[test]
    fn test_issue_comment_missing_body_is_omitted() {
        let details = details_json("IssueCommentEvent", json!({ "action": "created" }));
        assert_eq!(details, json!({ "action": "created" }));
    }

    #[test]
    fn test_watch_event() {
        assert_eq!(
            details_json("WatchEvent", json!({ "action": "started" })),
            json!({ "action": "started" })
        );
    }

    #[test]
    fn test_fork_event() {
        let payload = json!({ "forkee": { "full_name": "someone/Hello-World", "id": 1 } });
        assert_eq!(
            details_json("ForkEvent", payload),
            json!({ "forkee": "someone/Hello-World" })
        );
    }

    #[test]
    fn test_delete_event() {
        let payload = json!({ "ref": "old-branch", "ref_type": "branch", "description": "ignored" });
        assert_eq!(
            details_json("DeleteEvent", payload),
            json!({ "refType": "branch", "ref": "old-branch" })
        );
    }

    #[test]
    fn test_public_event_has_no_fields() {
        assert_eq!(details_json("PublicEvent", json!({ "anything": 1 })), json!({}));
    }

    #[test]
    fn test_release_event_prefers_name() {
        let payload = json!({
            "action": "published",
            "release": { "name": "Version 1.0", "tag_name": "v1.0" }
        });
        assert_eq!(
            details_json("ReleaseEvent", payload),
            json!({ "action": "published", "releaseName": "Version 1.0" })
        );
    }

    #[test]
    fn test_release_event_falls_back_to_tag_name() {
        let payload = json!({
            "action": "published",
            "release": { "name": null, "tag_name": "v1.0" }
        });
        assert_eq!(details_json("ReleaseEvent", payload)["releaseName"], "v1.0");
    }

    #[test]
    fn test_unknown_event_yields_empty_record() {
        let payload = json!({ "pages": [{ "page_name": "Home" }] });
        assert_eq!(details_json("GollumEvent", payload), json!({}));
        assert_eq!(details_json("", json!(null)), json!({}));
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("6dcb09b5b57875f334f61aebed695e2e4193db5e"), "6dcb09b");
        assert_eq!(short_sha("abc12"), "abc12");
        assert_eq!(short_sha(""), "");
    }

    #[test]
    fn test_comment_preview_counts_characters() {
        let body = "é".repeat(150);
        let preview = comment_preview(&body);
        assert_eq!(preview.chars().count(), COMMENT_PREVIEW_LEN + ELLIPSIS.len());
        assert!(preview.ends_with("é..."));
    }

    #[test]
    fn test_from_wire_reads_back_normalized_details() {
        let kind = EventKind::IssueComment;
        let details = EventDetails::normalize(
            &kind,
            &json!({ "action": "created", "issue": { "number": 3 }, "comment": { "body": "hi" } }),
        );
        let wire = serde_json::to_value(&details).unwrap();

        assert_eq!(EventDetails::from_wire(&kind, wire).unwrap(), details);
    }

    #[test]
    fn test_from_wire_null_details() {
        assert_eq!(
            EventDetails::from_wire(&EventKind::Push, Value::Null).unwrap(),
            EventDetails::Push(PushDetails::default())
        );
    }
}
