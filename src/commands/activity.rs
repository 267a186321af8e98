use anyhow::Result;
use ghfeed_core::filter::filter_activities;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::{Render, render_pagination};

pub async fn run(client: &Client, username: &str, page: u32, search: Option<&str>) -> Result<()> {
    let changes = client.changes(username, page).await?;
    let activities = filter_activities(&changes.events, search.unwrap_or(""));

    if activities.is_empty() {
        if changes.events.is_empty() {
            println!("{}", format!("No activity found for {}", username).dimmed());
        } else {
            println!("{}", "No activity matches the search".dimmed());
        }
        return Ok(());
    }

    for activity in activities {
        println!("{}", activity.render());
        println!();
    }

    for line in render_pagination(&changes.pagination, username) {
        println!("{}", line);
    }

    Ok(())
}
