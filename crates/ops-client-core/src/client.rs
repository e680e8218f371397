use anyhow::Context as _;
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use ops_shared::{errors::HttpError, log_err_as_warn, uac::Session};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method, StatusCode,
};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

pub mod api;
pub mod session;

/// Pass as the body argument for requests that do not send one
pub const NO_BODY: Option<&()> = None;

/// Owns the connection to the server and the single session of this process.
/// Clones share both
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session: Option<Arc<Session>>,
    status: SessionStatus,
}

/// Lifecycle of the session. There is no terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    /// An identity refresh (or the login preceding one) is in flight
    Resolving,
    Authenticated,
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String) -> Self {
        Self {
            server_address,
            session: None,
            // A silent refresh is always expected at start up
            status: SessionStatus::Resolving,
        }
    }
}

impl Client {
    /// Creates a client that keeps cookies between requests and sends JSON
    /// content type unless a request overrides it
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String, request_timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(default_headers);
        let api_client = with_timeout(builder, request_timeout)
            .build()
            .context("unable to create reqwest client")?;
        Ok(Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
        })
    }

    /// Sends a request and deserializes a successful response body into `U`
    ///
    /// A `204 No Content` response is never parsed, `U` must accept `null`
    /// (for example `()` or `Option<_>`)
    #[tracing::instrument(skip(body, ui_notify))]
    // WARNING: Must skip body as it may contain sensitive info
    pub fn request<T, U, F>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<U, HttpError>>
    where
        T: serde::Serialize + ?Sized,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
        F: UiCallBack,
    {
        self.request_with_headers(method, path, body, HeaderMap::new(), ui_notify)
    }

    /// Same as [`Client::request`] but headers passed take precedence over the
    /// defaults
    #[tracing::instrument(skip(body, headers, ui_notify))]
    pub fn request_with_headers<T, U, F>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        headers: HeaderMap,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<U, HttpError>>
    where
        T: serde::Serialize + ?Sized,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };
        let request = self.build_request(method, path, body).headers(headers);
        reqwest_cross::fetch(request, on_done);
        rx
    }

    fn build_request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> reqwest::RequestBuilder
    where
        T: serde::Serialize + ?Sized,
    {
        let request = self.api_client.request(method, self.path_to_url(path));
        match body {
            Some(body) => request.json(body),
            None => request,
        }
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, method: Method, path: &str, args: Option<&T>, on_done: F)
    where
        T: serde::Serialize + ?Sized,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        reqwest_cross::fetch(self.build_request(method, path, args), on_done)
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(
    builder: reqwest::ClientBuilder,
    timeout: Option<Duration>,
) -> reqwest::ClientBuilder {
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

/// The browser client has no timeout support
#[cfg(target_arch = "wasm32")]
fn with_timeout(
    builder: reqwest::ClientBuilder,
    _timeout: Option<Duration>,
) -> reqwest::ClientBuilder {
    builder
}

/// Accepts any success status and ignores the body
#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> Result<(), HttpError> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> Result<T, HttpError>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    if status == StatusCode::NO_CONTENT {
        // Body is not read, only types that accept `null` succeed
        return serde_json::from_value(serde_json::Value::Null).map_err(|e| {
            HttpError::new(status, format!("no content returned but a value was expected: {e}"))
        });
    }
    response
        .json()
        .await
        .map_err(|e| HttpError::new(status, format!("failed to parse result as json: {e}")))
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> HttpError {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let message = match response.text().await {
        Ok(body) => error_message_from_body(&body),
        Err(e) => {
            info!(?e, "failed to get response body");
            None
        }
    };
    HttpError::new(
        status,
        message.unwrap_or_else(|| status_reason(status)),
    )
}

/// Pulls `message` (or failing that `error`) out of a JSON error body. Empty
/// strings are skipped
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].into_iter().find_map(|key| {
        value
            .get(key)
            .and_then(|x| x.as_str())
            .filter(|x| !x.is_empty())
            .map(str::to_string)
    })
}

fn status_reason(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("request failed with status code: {}", status.as_u16()),
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(reqwest::Response, StatusCode), HttpError> {
    let response =
        response.map_err(|e| HttpError::transport(format!("failed to send request: {e}")))?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_preferred_over_error() {
        let actual = error_message_from_body(r#"{"message":"bad input","error":"ignored"}"#);
        assert_eq!(actual.as_deref(), Some("bad input"));
    }

    #[test]
    fn empty_message_falls_through_to_error() {
        let actual = error_message_from_body(r#"{"message":"","error":"not found"}"#);
        assert_eq!(actual.as_deref(), Some("not found"));
    }

    #[test]
    fn non_json_body_gives_nothing() {
        assert_eq!(error_message_from_body("<html>oops</html>"), None);
        assert_eq!(error_message_from_body(""), None);
        assert_eq!(error_message_from_body(r#"{"detail":"x"}"#), None);
    }

    #[test]
    fn reason_used_as_fallback() {
        assert_eq!(status_reason(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(
            status_reason(StatusCode::from_u16(599).unwrap()),
            "request failed with status code: 599"
        );
    }

    #[test]
    fn new_client_starts_resolving() {
        let client = Client::new("http://localhost:1".to_string(), None).unwrap();
        assert_eq!(client.status(), SessionStatus::Resolving);
        assert!(client.session().is_none());
    }
}
