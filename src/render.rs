//! Terminal rendering for ghfeed types.
//!
//! Extension traits that add colored output to ghfeed-core types using
//! owo_colors.

use ghfeed_core::details::{
    CommentDetails, ForkDetails, ItemDetails, PushDetails, RefDetails, ReleaseDetails,
};
use ghfeed_core::{ActivityView, EventDetails, PageDescriptor};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ActivityView {
    fn render(&self) -> String {
        let mut header = format!(
            "{} {}  {}",
            "●".cyan(),
            self.kind.as_str().bold(),
            self.repo.name.blue()
        );

        let time = self.created_at.format("%Y-%m-%d %H:%M").to_string();
        header.push_str(&format!("  {}", time.dimmed()));

        if self.is_read_later {
            header.push_str(&format!(" {}", "[read later]".yellow()));
        }
        if self.is_favorite {
            header.push_str(&format!(" {}", "[★]".magenta()));
        }
        header.push_str(&format!(" {}", format!("#{}", self.id).dimmed()));

        let mut lines = vec![header];
        lines.extend(
            self.details
                .detail_lines()
                .into_iter()
                .map(|line| format!("    {}", line)),
        );
        lines.join("\n")
    }
}

/// Per-kind description lines of an event's details.
pub trait DetailLines {
    fn detail_lines(&self) -> Vec<String>;
}

impl DetailLines for EventDetails {
    fn detail_lines(&self) -> Vec<String> {
        match self {
            EventDetails::Push(push) => push_lines(push),
            EventDetails::Create(created) => create_lines(created),
            EventDetails::PullRequest(pr) => vec![item_line("PR", pr)],
            EventDetails::Issues(issue) => vec![item_line("Issue", issue)],
            EventDetails::IssueComment(comment) => comment_lines(comment),
            EventDetails::Watch(_) => vec!["Starred the repository".to_string()],
            EventDetails::Fork(ForkDetails { forkee }) => {
                vec![format!("Forked to: {}", or_blank(forkee))]
            }
            EventDetails::Delete(deleted) => vec![format!(
                "Deleted {}: {}",
                or_blank(&deleted.ref_type),
                or_blank(&deleted.ref_name)
            )],
            EventDetails::Public(_) => vec!["Made repository public".to_string()],
            EventDetails::Release(release) => vec![release_line(release)],
            EventDetails::Unknown(_) => Vec::new(),
        }
    }
}

fn push_lines(push: &PushDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Branch: {}", or_blank(&push.branch)),
        format!("Commits: {}", push.commit_count),
    ];
    for commit in &push.commits {
        lines.push(format!(
            "{}: {}",
            or_blank(&commit.sha).yellow(),
            or_blank(&commit.message)
        ));
    }
    lines
}

fn create_lines(created: &RefDetails) -> Vec<String> {
    let mut lines = vec![format!(
        "Created {}: {}",
        or_blank(&created.ref_type),
        or_blank(&created.ref_name)
    )];
    if let Some(description) = &created.description {
        lines.push(format!("Description: {}", description));
    }
    lines
}

fn item_line(label: &str, item: &ItemDetails) -> String {
    let number = item.number.map(|n| n.to_string()).unwrap_or_default();
    let mut line = format!("{} #{}: {}", label, number, or_blank(&item.title));
    if let Some(state) = &item.state {
        line.push_str(&format!(" {}", format!("[{}]", state).dimmed()));
    }
    line
}

fn comment_lines(comment: &CommentDetails) -> Vec<String> {
    let number = comment.issue_number.map(|n| n.to_string()).unwrap_or_default();
    let mut lines = vec![format!("Commented on issue #{}", number)];
    if let Some(body) = &comment.comment_body {
        lines.push(body.italic().to_string());
    }
    lines
}

fn release_line(release: &ReleaseDetails) -> String {
    format!(
        "{} release: {}",
        or_blank(&release.action),
        or_blank(&release.release_name)
    )
}

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Pagination footer for an activity page. Empty when there is nothing to page through.
pub fn render_pagination(page: &PageDescriptor, username: &str) -> Vec<String> {
    let position = if page.total_pages > 0 {
        format!("Page {} of {}", page.current_page, page.total_pages)
    } else if page.has_next_page || page.has_previous_page {
        format!("Page {}", page.current_page)
    } else {
        return Vec::new();
    };

    let mut lines = vec![position.bold().to_string()];
    if page.has_previous_page {
        let hint = format!(
            "  previous: ghfeed activity {} --page {}",
            username,
            page.current_page.saturating_sub(1).max(1)
        );
        lines.push(hint.dimmed().to_string());
    }
    if page.has_next_page {
        let hint = format!(
            "  next:     ghfeed activity {} --page {}",
            username,
            page.current_page + 1
        );
        lines.push(hint.dimmed().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghfeed_core::details::{CommitSummary, NoDetails, WatchDetails};

    #[test]
    fn test_push_lines() {
        let details = EventDetails::Push(PushDetails {
            commits: vec![CommitSummary {
                message: Some("Fix typo".to_string()),
                sha: Some("6dcb09b".to_string()),
            }],
            branch: Some("main".to_string()),
            commit_count: 1,
        });

        let lines = details.detail_lines();
        assert_eq!(lines[0], "Branch: main");
        assert_eq!(lines[1], "Commits: 1");
        assert!(lines[2].contains("6dcb09b"));
        assert!(lines[2].ends_with("Fix typo"));
    }

    #[test]
    fn test_create_lines_with_description() {
        let details = EventDetails::Create(RefDetails {
            ref_type: Some("tag".to_string()),
            ref_name: Some("v1.0".to_string()),
            description: Some("First release".to_string()),
        });

        assert_eq!(
            details.detail_lines(),
            vec!["Created tag: v1.0", "Description: First release"]
        );
    }

    #[test]
    fn test_marker_only_kinds() {
        assert_eq!(
            EventDetails::Watch(WatchDetails::default()).detail_lines(),
            vec!["Starred the repository"]
        );
        assert_eq!(
            EventDetails::Public(NoDetails {}).detail_lines(),
            vec!["Made repository public"]
        );
        assert!(EventDetails::Unknown(NoDetails {}).detail_lines().is_empty());
    }

    #[test]
    fn test_release_line() {
        let details = EventDetails::Release(ReleaseDetails {
            action: Some("published".to_string()),
            release_name: Some("v2.0".to_string()),
        });
        assert_eq!(details.detail_lines(), vec!["published release: v2.0"]);
    }

    #[test]
    fn test_pagination_hidden_without_pages() {
        assert!(render_pagination(&PageDescriptor::empty(), "octocat").is_empty());
    }

    #[test]
    fn test_pagination_footer() {
        let page = PageDescriptor {
            current_page: 2,
            total_pages: 5,
            has_next_page: true,
            has_previous_page: true,
            total_items: 75,
            items_per_page: 15,
        };

        let lines = render_pagination(&page, "octocat");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Page 2 of 5"));
        assert!(lines[1].contains("--page 1"));
        assert!(lines[2].contains("--page 3"));
    }

    #[test]
    fn test_pagination_footer_without_total() {
        let page = PageDescriptor::from_page_length(2, 15);

        let lines = render_pagination(&page, "octocat");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Page 2"));
        assert!(!lines[0].contains(" of "));
    }
}
