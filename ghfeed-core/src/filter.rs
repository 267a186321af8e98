//! Case-insensitive search over activities.

use crate::activity::ActivityView;

/// Whether an activity matches a search term, by event type or repository name.
pub fn matches(activity: &ActivityView, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    activity.kind.as_str().to_lowercase().contains(&term)
        || activity.repo.name.to_lowercase().contains(&term)
}

/// Keep the activities matching `term`. An empty term keeps everything.
pub fn filter_activities<'a>(activities: &'a [ActivityView], term: &str) -> Vec<&'a ActivityView> {
    activities
        .iter()
        .filter(|activity| matches(activity, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use serde_json::json;

    fn activity(kind: &str, repo: &str) -> ActivityView {
        let event: Event = serde_json::from_value(json!({
            "id": format!("{kind}-{repo}"),
            "type": kind,
            "repo": { "name": repo },
            "created_at": "2024-01-15T10:30:00Z"
        }))
        .unwrap();
        ActivityView::from_event(event, false, false)
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let activities = vec![activity("PushEvent", "a/b"), activity("WatchEvent", "c/d")];
        assert_eq!(filter_activities(&activities, "").len(), 2);
    }

    #[test]
    fn test_matches_type_case_insensitively() {
        let activities = vec![activity("PushEvent", "a/b"), activity("WatchEvent", "c/d")];
        let found = filter_activities(&activities, "push");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].repo.name, "a/b");
    }

    #[test]
    fn test_matches_repo_name() {
        let activities = vec![
            activity("PushEvent", "rust-lang/rust"),
            activity("ForkEvent", "octocat/Hello-World"),
        ];
        let found = filter_activities(&activities, "HELLO");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].repo.name, "octocat/Hello-World");
    }

    #[test]
    fn test_no_match() {
        let activities = vec![activity("PushEvent", "a/b")];
        assert!(filter_activities(&activities, "release").is_empty());
    }
}
