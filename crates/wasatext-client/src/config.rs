use url::Url;

use crate::error::{ApiError, ApiResult};

/// Port the backend listens on when derived from the page location.
pub const DEFAULT_PORT: u16 = 3000;

pub const FALLBACK_BASE_URL: &str = "http://localhost:3000";

/// Explicit base URL override.
pub const API_URL_ENV: &str = "WASATEXT_API_URL";

/// URL of the page hosting the client; its protocol and hostname are used
/// when no override is set.
pub const PAGE_URL_ENV: &str = "WASATEXT_PAGE_URL";

/// Network location of the page the client runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme, with or without the trailing `:` (`"https:"` or `"https"`).
    pub protocol: String,
    pub hostname: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
        }
    }

    pub fn parse(page_url: &str) -> ApiResult<Self> {
        let url = Url::parse(page_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;
        let hostname = url.host_str().ok_or_else(|| ApiError::InvalidBaseUrl {
            url: page_url.to_string(),
            reason: "page URL has no host".into(),
        })?;
        Ok(Self::new(url.scheme(), hostname))
    }

    /// `{protocol}//{hostname}:3000`
    pub fn api_origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.protocol.trim_end_matches(':'),
            self.hostname,
            DEFAULT_PORT
        )
    }
}

/// Resolved once at construction; the client never re-reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            });
        }
        Ok(Self { base_url: url })
    }

    /// Explicit override > page location with [`DEFAULT_PORT`] > [`FALLBACK_BASE_URL`].
    /// A blank override counts as unset.
    pub fn resolve(explicit: Option<&str>, page: Option<&PageLocation>) -> ApiResult<Self> {
        let base = explicit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| page.map(PageLocation::api_origin))
            .unwrap_or_else(|| FALLBACK_BASE_URL.to_string());

        Self::new(&base)
    }

    pub fn from_env() -> ApiResult<Self> {
        let explicit = std::env::var(API_URL_ENV).ok();
        let page = match std::env::var(PAGE_URL_ENV) {
            Ok(page_url) if !page_url.trim().is_empty() => Some(PageLocation::parse(page_url.trim())?),
            _ => None,
        };
        Self::resolve(explicit.as_deref(), page.as_ref())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(FALLBACK_BASE_URL).expect("fallback base URL is valid"),
        }
    }
}
