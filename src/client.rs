//! Connection handle and the shared request/response path.
//!
//! Every operation in the crate funnels through [`DockerClient`]: compose
//! the URL, issue exactly one HTTP request, and either decode the 2xx body
//! or turn a non-2xx response into [`EngineError::Daemon`] carrying the
//! daemon's own error message. There is no retry, no timeout override and
//! no shared state beyond reqwest's default connection pool.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::containers::Containers;
use crate::error::EngineError;
use crate::images::Images;
use crate::models::ErrorMessage;

/// Handle to one Docker daemon.
///
/// Holds the daemon base URL (e.g. `http://localhost:2375` or a versioned
/// prefix like `http://localhost:2375/v1.41`) and the injected HTTP
/// transport. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DockerClient {
    http: Client,
    base_url: String,
}

impl DockerClient {
    /// Create a client for the daemon at `base_url` with a default
    /// transport.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`, e.g. one
    /// configured with custom TLS or proxy settings.
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// Image-side operations.
    pub fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    /// Container-side operations.
    pub fn containers(&self) -> Containers<'_> {
        Containers::new(self)
    }

    /// The daemon base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Issue the request; 2xx responses pass through, anything else becomes
    /// [`EngineError::Daemon`] with the daemon's error body.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, EngineError> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending request to daemon");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::daemon_error(status, response).await)
    }

    async fn daemon_error(status: StatusCode, response: Response) -> EngineError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorMessage>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        debug!(status = status.as_u16(), %message, "daemon reported an error");
        EngineError::Daemon {
            status: status.as_u16(),
            message,
        }
    }

    /// One round trip ending in a decoded JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, EngineError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// One round trip for action endpoints whose contract is
    /// success/failure only; the response body is discarded.
    pub(crate) async fn send_unit(&self, request: RequestBuilder) -> Result<(), EngineError> {
        self.send(request).await?;
        Ok(())
    }

    /// One round trip handing the raw response body to the caller.
    pub(crate) async fn send_stream(
        &self,
        request: RequestBuilder,
    ) -> Result<ByteStream, EngineError> {
        let response = self.send(request).await?;
        Ok(ByteStream::new(response))
    }
}

pin_project_lite::pin_project! {
    /// Raw response bytes from a streaming endpoint (`logs`, `export`).
    ///
    /// The caller owns consumption: the crate neither buffers nor applies a
    /// timeout. Dropping the stream closes the underlying response body,
    /// which aborts the transfer.
    pub struct ByteStream {
        #[pin]
        inner: BoxStream<'static, reqwest::Result<Bytes>>,
    }
}

impl ByteStream {
    fn new(response: Response) -> Self {
        Self {
            inner: response.bytes_stream().boxed(),
        }
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes, EngineError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|item| item.map(|chunk| chunk.map_err(EngineError::from)))
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByteStream")
    }
}
