use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use wasatext_store::{SessionStore, StaticToken, session_token};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Client for the messaging backend. Cheap to clone; clones share the
/// connection pool, cookie jar and session store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
}

enum Payload {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

/// One backend call: method, path segments, optional body and extra headers.
/// Path segments are percent-encoded individually, so ids are forwarded
/// verbatim whatever they contain.
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    payload: Payload,
    headers: HeaderMap,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            method,
            segments: segments.into_iter().map(|s| s.as_ref().to_string()).collect(),
            payload: Payload::Empty,
            headers: HeaderMap::new(),
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let bytes = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        self.payload = Payload::Json(bytes);
        Ok(self)
    }

    /// Multipart body. The transport sets `Content-Type` with the boundary.
    pub fn multipart(mut self, form: Form) -> Self {
        self.payload = Payload::Multipart(form);
        self
    }

    /// Operation-specific header; replaces a default header of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL, unencoded (`/users/ann`).
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        // Cookies stand in for the browser's cross-origin credentials mode.
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            store,
        })
    }

    /// Client with a fixed, caller-supplied session token.
    pub fn with_token(config: ClientConfig, token: impl Into<String>) -> ApiResult<Self> {
        Self::new(config, Arc::new(StaticToken::new(token)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Full URL for a request.
    pub fn url_for(&self, request: &ApiRequest) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            })?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    /// Issue a request and decode the response.
    ///
    /// - non-2xx: [`ApiError::RequestFailed`] with the raw body text
    /// - 204, or a 2xx with an empty body: `Ok(None)`
    /// - otherwise the body is decoded as `T`; a mismatch is
    ///   [`ApiError::MalformedResponse`]
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<Option<T>> {
        let url = self.url_for(&request)?;
        let path = request.path();
        let ApiRequest {
            method,
            payload,
            headers: extra,
            ..
        } = request;

        let token = session_token(self.store.as_ref()).unwrap_or_default();
        let is_multipart = matches!(payload, Payload::Multipart(_));
        let headers = build_headers(&token, &extra, !is_multipart)?;

        debug!("{} {}", method, url);

        let builder = self.http.request(method.clone(), url).headers(headers);
        let builder = match payload {
            Payload::Empty => builder,
            Payload::Json(bytes) => builder.body(bytes),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            warn!("{} {} failed with status {}", method, path, status);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(ApiError::MalformedResponse)
    }

    /// [`send`](Self::send) for list endpoints. The backend writes an empty
    /// list as `null`, which decodes to an empty `Vec` here; 204 stays `None`.
    pub async fn send_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<Option<Vec<T>>> {
        let list = self.send::<Option<Vec<T>>>(request).await?;
        Ok(list.map(Option::unwrap_or_default))
    }
}

/// Default headers plus the operation's own; the operation's win on conflict.
/// An absent token is sent as an empty bearer credential.
fn build_headers(token: &str, extra: &HeaderMap, json: bool) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    if json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::InvalidCredential)?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    for (name, value) in extra {
        headers.insert(name.clone(), value.clone());
    }

    Ok(headers)
}
