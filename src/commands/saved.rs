use anyhow::Result;
use ghfeed_core::event::id_from_value;
use ghfeed_core::filter::filter_activities;
use ghfeed_core::{ActivityView, CollectionKind};
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::Render;

/// Print a saved collection, optionally filtered.
pub async fn list(client: &Client, kind: CollectionKind, search: Option<&str>) -> Result<()> {
    let snapshots = client.saved(kind).await?;

    if snapshots.is_empty() {
        println!("{}", format!("Nothing saved in {}", kind).dimmed());
        return Ok(());
    }

    let mut activities = Vec::new();
    let mut unreadable = Vec::new();
    for snapshot in snapshots {
        let id = snapshot
            .get("id")
            .and_then(id_from_value)
            .unwrap_or_default();
        match serde_json::from_value::<ActivityView>(snapshot) {
            Ok(activity) => activities.push(activity),
            Err(_) => unreadable.push(id),
        }
    }

    let term = search.unwrap_or("");
    let shown = filter_activities(&activities, term);
    for activity in &shown {
        println!("{}", activity.render());
        println!();
    }

    // Snapshots saved by other clients may not carry a full activity
    if term.is_empty() {
        for id in &unreadable {
            println!("{} {}", "●".dimmed(), format!("saved item {}", id).dimmed());
        }
    }

    if shown.is_empty() && !term.is_empty() {
        println!("{}", "No saved activity matches the search".dimmed());
    }

    Ok(())
}

/// Look up an activity on a feed page and save it.
pub async fn add(
    client: &Client,
    kind: CollectionKind,
    username: &str,
    id: &str,
    page: u32,
) -> Result<()> {
    let changes = client.changes(username, page).await?;

    let Some(activity) = changes.events.into_iter().find(|a| a.id == id) else {
        anyhow::bail!(
            "Activity {} not found on page {} of {}'s feed",
            id,
            page,
            username
        );
    };

    client.save(kind, &activity).await?;
    println!("{} Added to {}:", "✓".green(), kind);
    println!("{}", activity.render());

    Ok(())
}

pub async fn remove(client: &Client, kind: CollectionKind, id: &str) -> Result<()> {
    client.remove(kind, id).await?;
    println!("{} Removed {} from {}", "✓".green(), id, kind);
    Ok(())
}
