// HTTP transport for the Site Manager API.
//
// Base path: {base_url}/{version}/
// Auth: X-API-KEY header

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::config::SiteManagerConfig;

/// A single blocking GET that yields decoded JSON.
///
/// Implementations must fail on any non-2xx status and on a body that is
/// not valid JSON. The paginator and the facade only ever talk to this.
pub trait Transport {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value, Error> {
        (**self).get(endpoint, query)
    }
}

// ── Error response shape from the Site Manager API ───────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── HttpTransport ────────────────────────────────────────────────────

/// `reqwest::blocking` transport with the API key injected on every request.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build the HTTP client from connection settings.
    ///
    /// Injects `X-API-KEY` (marked sensitive) and `Accept: application/json`
    /// as default headers.
    pub fn new(config: &SiteManagerConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(config.api_key().expose_secret()).map_err(
            |e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            },
        )?;
        key_value.set_sensitive(true);
        headers.insert("X-API-KEY", key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("sitemgr-api/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))?;

        let base_url = Self::versioned_base(config.base_url(), config.version())?;

        Ok(Self { http, base_url })
    }

    /// `https://api.ui.com` + `v1` -> `https://api.ui.com/v1/`
    fn versioned_base(raw: &str, version: &str) -> Result<Url, Error> {
        let base = raw.trim_end_matches('/');
        let version = version.trim_matches('/');
        Ok(Url::parse(&format!("{base}/{version}/"))?)
    }

    /// Join an endpoint (e.g. `"sites/abc/devices"`) onto the versioned base.
    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    fn handle_response(endpoint: &str, resp: reqwest::blocking::Response) -> Result<Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text()?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    endpoint: endpoint.to_owned(),
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(endpoint, status, resp))
        }
    }

    fn parse_error(
        endpoint: &str,
        status: reqwest::StatusCode,
        resp: reqwest::blocking::Response,
    ) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey {
                endpoint: endpoint.to_owned(),
            };
        }

        let raw = resp.text().unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let url = self.url(endpoint)?;
        debug!("GET {url} params={query:?}");

        let resp = self.http.get(url).query(query).send()?;
        Self::handle_response(endpoint, resp)
    }
}
