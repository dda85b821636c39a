// Site Manager API facade.
//
// One method per resource. Endpoint paths and pagination stay in here;
// callers pick the result shape by picking the method.

use serde_json::Value;
use tracing::debug;

use crate::Error;
use crate::config::SiteManagerConfig;
use crate::pagination::{DEFAULT_PAGE_SIZE, Envelope, Item, PageOptions, Paginator};
use crate::transport::{HttpTransport, Transport};

// ── List options ─────────────────────────────────────────────────────

/// Knobs shared by the site-scoped list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Stop after this many items. `None` fetches the whole collection.
    pub max_items: Option<usize>,
    /// Opaque `filter` expression, passed through verbatim.
    pub filter: Option<String>,
    /// Items requested per page.
    pub page_size: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            max_items: None,
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListOptions {
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn page_options(&self) -> PageOptions {
        PageOptions {
            max_items: self.max_items,
            page_size: self.page_size,
        }
    }

    /// Extra query parameters; an empty filter is not sent.
    fn filters(&self) -> Vec<(String, String)> {
        self.filter
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| vec![("filter".to_owned(), f.to_owned())])
            .unwrap_or_default()
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Blocking client for the UniFi Site Manager API.
///
/// Holds no state besides its transport, so a single instance can serve
/// any number of calls; each call owns its own pagination state.
#[derive(Debug)]
pub struct SiteManagerClient<T = HttpTransport> {
    transport: T,
}

impl SiteManagerClient<HttpTransport> {
    /// Build an HTTP-backed client from connection settings.
    pub fn new(config: &SiteManagerConfig) -> Result<Self, Error> {
        debug!(
            base_url = config.base_url(),
            version = config.version(),
            verify_tls = config.verify_tls(),
            "building Site Manager client"
        );
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> SiteManagerClient<T> {
    /// Wrap any transport (a fake one in tests, a proxy, ...).
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Sites ────────────────────────────────────────────────────────

    /// `GET /{version}/sites`, returned exactly as decoded.
    ///
    /// Not paginated or normalized: the body may be an envelope or a bare
    /// array depending on the service.
    pub fn list_sites(&self) -> Result<Value, Error> {
        self.transport.get("sites", &[])
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// All devices of a site, as an aggregated envelope.
    pub fn list_devices(&self, site_id: &str, opts: &ListOptions) -> Result<Envelope, Error> {
        self.list_site_collection(site_id, "devices", opts)
    }

    /// All devices of a site, as a flat list.
    pub fn list_devices_data(&self, site_id: &str, opts: &ListOptions) -> Result<Vec<Item>, Error> {
        self.list_devices(site_id, opts).map(Envelope::into_data)
    }

    // ── Clients ──────────────────────────────────────────────────────

    /// All clients of a site, as an aggregated envelope.
    pub fn list_clients(&self, site_id: &str, opts: &ListOptions) -> Result<Envelope, Error> {
        self.list_site_collection(site_id, "clients", opts)
    }

    /// All clients of a site, as a flat list.
    pub fn list_clients_data(&self, site_id: &str, opts: &ListOptions) -> Result<Vec<Item>, Error> {
        self.list_clients(site_id, opts).map(Envelope::into_data)
    }

    // ── Generic collection ───────────────────────────────────────────

    /// Aggregate any paginated collection endpoint (relative to the version).
    pub fn fetch_all(
        &self,
        endpoint: &str,
        filters: &[(String, String)],
        options: &PageOptions,
    ) -> Result<Envelope, Error> {
        Paginator::with_options(&self.transport, *options).fetch_all(endpoint, filters)
    }

    fn list_site_collection(
        &self,
        site_id: &str,
        collection: &str,
        opts: &ListOptions,
    ) -> Result<Envelope, Error> {
        let endpoint = format!("sites/{site_id}/{collection}");
        self.fetch_all(&endpoint, &opts.filters(), &opts.page_options())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// Records every call and answers with one fixed body.
    struct Recorder {
        body: Value,
        calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Recorder {
        fn new(body: Value) -> Self {
            Self {
                body,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Recorder {
        fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value, Error> {
            self.calls
                .borrow_mut()
                .push((endpoint.to_owned(), query.to_vec()));
            Ok(self.body.clone())
        }
    }

    fn two_devices() -> Value {
        json!({
            "data": [
                { "id": "d1", "name": "USW-Pro-24" },
                { "id": "d2", "name": "U6-LR" }
            ],
            "count": 2,
            "totalCount": 2,
            "offset": 0,
            "limit": 100
        })
    }

    #[test]
    fn list_sites_returns_body_untouched() {
        let body = json!([{ "id": "s1", "name": "HQ" }]);
        let client = SiteManagerClient::with_transport(Recorder::new(body.clone()));

        assert_eq!(client.list_sites().unwrap(), body);

        let calls = client.transport().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sites");
        assert!(calls[0].1.is_empty(), "sites must not be paginated");
    }

    #[test]
    fn list_devices_builds_site_path() {
        let client = SiteManagerClient::with_transport(Recorder::new(two_devices()));

        let env = client.list_devices("abc-123", &ListOptions::default()).unwrap();

        assert_eq!(env.count(), 2);
        assert_eq!(client.transport().calls.borrow()[0].0, "sites/abc-123/devices");
    }

    #[test]
    fn list_clients_builds_site_path() {
        let client = SiteManagerClient::with_transport(Recorder::new(json!({ "data": [] })));

        client.list_clients("abc-123", &ListOptions::default()).unwrap();

        assert_eq!(client.transport().calls.borrow()[0].0, "sites/abc-123/clients");
    }

    #[test]
    fn filter_is_sent_only_when_non_empty() {
        let client = SiteManagerClient::with_transport(Recorder::new(json!({ "data": [] })));

        client
            .list_devices("s1", &ListOptions::default().with_filter("state.eq('ONLINE')"))
            .unwrap();
        client
            .list_devices("s1", &ListOptions::default().with_filter(""))
            .unwrap();

        let calls = client.transport().calls.borrow();
        assert!(
            calls[0]
                .1
                .contains(&("filter".to_owned(), "state.eq('ONLINE')".to_owned()))
        );
        assert!(calls[1].1.iter().all(|(k, _)| k != "filter"));
    }

    #[test]
    fn page_size_reaches_the_wire() {
        let client = SiteManagerClient::with_transport(Recorder::new(json!({ "data": [] })));

        client
            .list_clients("s1", &ListOptions::default().with_page_size(25))
            .unwrap();

        let calls = client.transport().calls.borrow();
        assert!(calls[0].1.contains(&("limit".to_owned(), "25".to_owned())));
    }

    #[test]
    fn flat_list_equals_envelope_data() {
        let client = SiteManagerClient::with_transport(Recorder::new(two_devices()));
        let opts = ListOptions::default().with_max_items(1);

        let env = client.list_devices("s1", &opts).unwrap();
        let list = client.list_devices_data("s1", &opts).unwrap();

        assert_eq!(list.as_slice(), env.data());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SiteManagerClient>();
    }
}
