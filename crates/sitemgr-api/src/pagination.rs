//! Offset/limit pagination over Site Manager collection endpoints.
//!
//! Collection endpoints answer with a page envelope:
//!
//! ```json
//! { "data": [...], "count": 25, "totalCount": 112, "offset": 0, "limit": 25 }
//! ```
//!
//! [`Paginator::fetch_all`] walks those pages one blocking request at a time
//! and folds them into a single [`Envelope`] describing the aggregated
//! result rather than any one page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::Error;
use crate::transport::Transport;

/// Items requested per page unless the caller says otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One record from a collection (a site, device, or client).
///
/// Kept as an opaque JSON object; callers pick out the keys they need.
pub type Item = Map<String, Value>;

// ── Options ──────────────────────────────────────────────────────────

/// How far and how fast to page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Stop once this many items are collected. `None` fetches everything.
    pub max_items: Option<usize>,
    /// `limit` sent with each page request.
    pub page_size: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            max_items: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ── Wire page ────────────────────────────────────────────────────────

/// A single page as sent by the server. Every field may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    data: Option<Vec<Item>>,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    total_count: Option<u64>,
}

impl PageResponse {
    fn from_body(endpoint: &str, body: &Value) -> Result<Self, Error> {
        if !body.is_object() {
            return Err(Error::Deserialization {
                endpoint: endpoint.to_owned(),
                message: "expected a JSON object page envelope".into(),
                body: body.to_string(),
            });
        }

        Self::deserialize(body).map_err(|e| Error::Deserialization {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
            body: body.to_string(),
        })
    }
}

// ── Aggregated envelope ──────────────────────────────────────────────

/// The aggregated result of a paginated fetch.
///
/// `offset` is always 0 and `count`/`limit` always equal `data.len()`;
/// `total_count` is the last total the server reported, or 0 if it never
/// reported one. The constructor is the only way to build one, so
/// `count == data.len()` cannot be broken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    data: Vec<Item>,
    count: usize,
    total_count: u64,
    offset: u64,
    limit: usize,
}

impl Envelope {
    pub fn new(data: Vec<Item>, total_count: u64) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            total_count,
            offset: 0,
            limit: count,
        }
    }

    pub fn data(&self) -> &[Item] {
        &self.data
    }

    /// Drop the envelope and keep the flat item list.
    pub fn into_data(self) -> Vec<Item> {
        self.data
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ── Paginator ────────────────────────────────────────────────────────

/// Drives a [`Transport`] across the pages of one collection endpoint.
pub struct Paginator<'a, T: Transport + ?Sized> {
    transport: &'a T,
    options: PageOptions,
}

impl<'a, T: Transport + ?Sized> Paginator<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self::with_options(transport, PageOptions::default())
    }

    pub fn with_options(transport: &'a T, options: PageOptions) -> Self {
        Self { transport, options }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.options.page_size = page_size;
        self
    }

    pub fn max_items(mut self, max_items: Option<usize>) -> Self {
        self.options.max_items = max_items;
        self
    }

    /// Fetch every item of `endpoint`, honoring the item cap.
    ///
    /// Stops on the first empty page, when the cap is reached, or once the
    /// offset passes a known total. The total is sticky: a page that omits
    /// `totalCount` keeps the last one seen. The offset advances by the
    /// page's reported `count`, so short pages are not skipped over.
    ///
    /// Any transport error aborts the walk; nothing collected so far is
    /// returned.
    pub fn fetch_all(&self, endpoint: &str, filters: &[(String, String)]) -> Result<Envelope, Error> {
        let mut items: Vec<Item> = Vec::new();
        let mut offset: u64 = 0;
        let mut total: u64 = 0;
        let mut pages: usize = 0;

        loop {
            let query = self.page_query(filters, offset);
            let body = self.transport.get(endpoint, &query)?;
            pages += 1;

            let page = PageResponse::from_body(endpoint, &body)?;
            let data = page.data.unwrap_or_default();
            let received = u64::try_from(data.len()).unwrap_or(u64::MAX);
            // A zero count next to real data would stall the offset.
            let count = page.count.filter(|c| *c > 0).unwrap_or(received);
            if let Some(reported) = page.total_count.filter(|t| *t > 0) {
                total = reported;
            }

            debug!(endpoint, offset, received, total, "fetched page");

            if data.is_empty() {
                break;
            }

            items.extend(data);

            if let Some(cap) = self.options.max_items {
                if items.len() >= cap {
                    items.truncate(cap);
                    break;
                }
            }

            offset = offset.saturating_add(count);

            if total > 0 && offset >= total {
                break;
            }
        }

        debug!(endpoint, items = items.len(), pages, "pagination complete");
        Ok(Envelope::new(items, total))
    }

    /// Caller filters followed by our own `offset`/`limit`, which win.
    fn page_query(&self, filters: &[(String, String)], offset: u64) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = filters
            .iter()
            .filter(|(key, _)| key != "offset" && key != "limit")
            .cloned()
            .collect();
        query.push(("offset".into(), offset.to_string()));
        query.push(("limit".into(), self.options.page_size.to_string()));
        query
    }
}

/// Shorthand for `Paginator::with_options(transport, *options).fetch_all(..)`.
pub fn fetch_all<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &str,
    filters: &[(String, String)],
    options: &PageOptions,
) -> Result<Envelope, Error> {
    Paginator::with_options(transport, *options).fetch_all(endpoint, filters)
}
