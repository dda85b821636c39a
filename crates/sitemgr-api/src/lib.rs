// sitemgr-api: Blocking Rust client for the UniFi Site Manager API
//
// One synchronous request at a time. Collection endpoints are walked with
// offset/limit pagination and handed back as a single aggregated envelope.

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod transport;

pub use client::{ListOptions, SiteManagerClient};
pub use config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, SiteManagerConfig};
pub use error::Error;
pub use pagination::{DEFAULT_PAGE_SIZE, Envelope, Item, PageOptions, Paginator};
pub use transport::{HttpTransport, Transport};
