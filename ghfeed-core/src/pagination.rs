//! Page descriptors for the activity feed.
//!
//! GitHub paginates list endpoints with a `Link` response header such as
//!
//! ```text
//! <https://api.github.com/user/1/events?per_page=15&page=2>; rel="next",
//! <https://api.github.com/user/1/events?per_page=15&page=5>; rel="last"
//! ```
//!
//! Two ways of turning a fetched page into a `PageDescriptor` are supported,
//! see `PaginationMode`.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FeedError;

/// Number of events requested per feed page.
pub const ITEMS_PER_PAGE: u32 = 15;

/// How the page descriptor of a feed page is computed.
///
/// Deserializes through `FromStr`, so config values are trimmed and
/// case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PaginationMode {
    /// Read the total page count from the `Link` header's `last` relation.
    /// Requires the account to exist, which is checked before fetching.
    #[default]
    Link,
    /// Infer "more pages" from whether a full page came back. No total is tracked.
    Length,
}

impl FromStr for PaginationMode {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "link" => Ok(PaginationMode::Link),
            "length" => Ok(PaginationMode::Length),
            other => Err(FeedError::Config(format!(
                "unknown pagination mode '{other}' (expected 'link' or 'length')"
            ))),
        }
    }
}

impl TryFrom<String> for PaginationMode {
    type Error = FeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Pagination state of one feed page, as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub current_page: u32,
    /// 0 means unknown or no results.
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Estimate only; does not account for a partial last page.
    pub total_items: u64,
    pub items_per_page: u32,
}

impl PageDescriptor {
    /// Descriptor used whenever the feed could not be fetched.
    pub fn empty() -> Self {
        PageDescriptor {
            current_page: 1,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
            total_items: 0,
            items_per_page: ITEMS_PER_PAGE,
        }
    }

    /// Link-header policy. Without a usable `last` relation the requested
    /// page is taken as the total.
    pub fn from_links(links: &LinkHeader, requested_page: u32) -> Self {
        let total_pages = links.last_page().unwrap_or(requested_page);

        PageDescriptor {
            current_page: requested_page,
            total_pages,
            has_next_page: links.get("next").is_some(),
            has_previous_page: links.get("prev").is_some(),
            total_items: u64::from(total_pages) * u64::from(ITEMS_PER_PAGE),
            items_per_page: ITEMS_PER_PAGE,
        }
    }

    /// Length policy: a full page means more may follow, a short page is the end.
    pub fn from_page_length(requested_page: u32, returned: usize) -> Self {
        let seen_before = u64::from(requested_page.saturating_sub(1)) * u64::from(ITEMS_PER_PAGE);

        PageDescriptor {
            current_page: requested_page,
            total_pages: 0,
            has_next_page: returned == ITEMS_PER_PAGE as usize,
            has_previous_page: requested_page > 1,
            total_items: seen_before + returned as u64,
            items_per_page: ITEMS_PER_PAGE,
        }
    }
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parse a client-supplied page number. Anything that is not a positive
/// integer means the first page.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}

/// Relations of a `Link` header, keyed by `rel` name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkHeader {
    links: HashMap<String, String>,
}

impl LinkHeader {
    /// Parse `<url>; rel="name"` segments separated by commas. Segments that
    /// don't have that shape are skipped; a repeated relation keeps the last URL.
    pub fn parse(header: &str) -> Self {
        let links = header
            .split(',')
            .filter_map(parse_segment)
            .collect::<HashMap<_, _>>();

        LinkHeader { links }
    }

    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// `page` query parameter of the `last` relation.
    pub fn last_page(&self) -> Option<u32> {
        self.get("last").and_then(page_param)
    }
}

fn parse_segment(segment: &str) -> Option<(String, String)> {
    let segment = segment.trim();
    let rest = segment.strip_prefix('<')?;
    let (url, params) = rest.split_once('>')?;

    let rel = params.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim() != "rel" {
            return None;
        }
        value.trim().strip_prefix('"')?.strip_suffix('"')
    })?;

    Some((rel.to_string(), url.trim().to_string()))
}

fn page_param(link: &str) -> Option<u32> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
