//! HTTP transport for the backend API.
//!
//! Two pre-configured clients share one implementation: the auth client is
//! rooted at the deployment root (CSRF priming, login, logout) and the
//! resource client at `{root}/api/v1` (everything else). Both send
//! credentials on every request, mark requests as programmatic via
//! `X-Requested-With`, and best-effort attach the `XSRF-TOKEN` cookie as a
//! request header. A missing token is tolerated; the request proceeds.
//!
//! No retry, backoff, or timeout logic lives here; a failed call is
//! terminal for that call.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

/// Versioned path segment prepended to resource-client requests.
pub const API_PREFIX: &str = "/api/v1";

/// Cookie holding the server-issued anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header the token is forwarded on.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Deployment root for the backend. Empty means same-origin.
pub fn deployment_root() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or("")
}

/// A resolved response: HTTP status plus the parsed JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

/// A failed request. `status` is `None` when the failure happened before
/// an HTTP response existed (network error, malformed request). `message`
/// carries the server's `{message}` body field when one was present.
#[derive(Clone, Debug, Default, PartialEq, thiserror::Error)]
#[error("{}", message.as_deref().unwrap_or("request failed"))]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

/// Request surface the stores depend on.
///
/// The core session/reference flows only need `get`/`post`; `put` and
/// `delete` exist for the antenna CRUD store.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError>;
    async fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError>;
    async fn put(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError>;
    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport> Transport for std::rc::Rc<T> {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        (**self).get(path).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        (**self).post(path, body).await
    }

    async fn put(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        (**self).delete(path).await
    }
}

/// Join a base URL and a request path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Extract the anti-CSRF token from a raw `document.cookie` string.
///
/// The value is percent-decoded the way the browser encoded it. Returns
/// `None` when the cookie is absent or empty.
pub fn csrf_token_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(XSRF_COOKIE).and_then(|rest| rest.strip_prefix('=')))
        .map(percent_decode)
        .filter(|token| !token.is_empty())
}

/// Decode `%XX` escape sequences. Malformed escapes pass through verbatim.
pub fn percent_decode(input: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| input.to_owned())
}

/// Browser transport over `gloo-net`.
///
/// Construct one per logical client via [`GlooTransport::auth_client`] or
/// [`GlooTransport::api_client`].
#[cfg(feature = "hydrate")]
#[derive(Clone, Debug)]
pub struct GlooTransport {
    base: String,
}

#[cfg(feature = "hydrate")]
impl GlooTransport {
    /// Client for authentication endpoints at the deployment root.
    pub fn auth_client() -> Self {
        Self { base: deployment_root().to_owned() }
    }

    /// Client for versioned resource endpoints.
    pub fn api_client() -> Self {
        Self { base: format!("{}{API_PREFIX}", deployment_root()) }
    }

    fn csrf_token() -> Option<String> {
        use wasm_bindgen::JsCast;

        let doc = web_sys::window()?.document()?;
        let html_doc = doc.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let cookies = html_doc.cookie().ok()?;
        csrf_token_from_cookies(&cookies)
    }

    async fn send(
        &self,
        method: gloo_net::http::Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = join_url(&self.base, path);
        let mut builder = gloo_net::http::RequestBuilder::new(&url)
            .method(method)
            .credentials(web_sys::RequestCredentials::Include)
            .header("X-Requested-With", "XMLHttpRequest");

        if let Some(token) = Self::csrf_token() {
            builder = builder.header(XSRF_HEADER, &token);
        }

        let request = match body {
            Some(json) => builder.json(json),
            None => builder.build(),
        }
        .map_err(|e| {
            log::warn!("failed to build request for {url}: {e}");
            ApiError::default()
        })?;

        let response = request.send().await.map_err(|e| {
            log::warn!("request to {url} failed: {e}");
            ApiError::default()
        })?;

        let status = response.status();
        let data = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        if response.ok() {
            Ok(ApiResponse { status, data })
        } else {
            let message = data
                .get("message")
                .and_then(|m| m.as_str())
                .map(ToOwned::to_owned);
            Err(ApiError { status: Some(status), message })
        }
    }
}

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(gloo_net::http::Method::GET, path, None).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(gloo_net::http::Method::POST, path, body).await
    }

    async fn put(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(gloo_net::http::Method::PUT, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(gloo_net::http::Method::DELETE, path, None).await
    }
}
