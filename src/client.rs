use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatRequest, Reply};

/// Where the chat endpoint lives when nothing else is configured.
pub const DEFAULT_CHAT_URL: &str = "http://localhost:5000/chat";

/// Something that answers a [`ChatRequest`] with reply elements.
///
/// [`ChatClient`] is the HTTP implementation. The widget only talks to this
/// trait, so tests and alternative transports can stand in for the network.
#[async_trait::async_trait]
pub trait Endpoint: Send + Sync {
    /// Perform one request/response exchange.
    ///
    /// The body must be a JSON array; its elements are returned undecoded.
    async fn exchange(&self, request: &ChatRequest) -> Result<Vec<Value>>;

    /// Perform one exchange and extract the reply from element 0.
    async fn reply(&self, request: &ChatRequest) -> Result<Reply> {
        let items = self.exchange(request).await?;
        Reply::from_items(items)
    }
}

/// HTTP client for the `/chat` endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    url: Url,
    timeout: Option<Duration>,
}

impl ChatClient {
    /// Create a new client.
    ///
    /// When `url` is `None` the client posts to [`DEFAULT_CHAT_URL`]. Requests
    /// wait for the endpoint indefinitely.
    pub fn new(url: Option<String>) -> Result<Self> {
        Self::with_options(url, None)
    }

    /// Create a new client with an optional request timeout.
    pub fn with_options(url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let url = Url::parse(url.as_deref().unwrap_or(DEFAULT_CHAT_URL))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::url(
                format!("unsupported scheme {:?} in {url}", url.scheme()),
                None,
            ));
        }

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) if body.trim().is_empty() => Error::api(status_code, "(empty body)"),
            Ok(body) => Error::api(status_code, body),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }

    async fn post(&self, request: &ChatRequest) -> Result<Vec<Value>> {
        let response = self
            .client
            .post(self.url.clone())
            .headers(Self::default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        self.timeout.map(|t| t.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Reading response timed out: {}", e),
                    self.timeout.map(|t| t.as_secs_f64()),
                )
            } else {
                Error::http_client(
                    format!("Failed to read response: {}", e),
                    Some(Box::new(e)),
                )
            }
        })?;
        serde_json::from_str::<Vec<Value>>(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl Endpoint for ChatClient {
    async fn exchange(&self, request: &ChatRequest) -> Result<Vec<Value>> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.post(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CLIENT_REQUEST_ERRORS.click();
        }
        result
    }
}
