//! HTTP transport: one POST per attempt.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use tracing::{debug, trace};
use url::Url;

use crate::encoding::{Encoding, RECORDIO_MEDIA_TYPE};
use crate::error::{ClientError, ClientResult};

/// Media type of the records inside a RecordIO response.
pub const MESSAGE_ACCEPT: &str = "Message-Accept";

/// Media type of the records inside a RecordIO request.
pub const MESSAGE_CONTENT_TYPE: &str = "Message-Content-Type";

/// A live response or request body.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// A single exchange with the Operator endpoint.
///
/// Implementations classify the outcome: a status outside 2xx becomes
/// [`ClientError::Http`], a connection failure becomes a retryable error.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Posts an encoded call and returns the full response body.
    async fn round_trip(&self, body: Bytes) -> ClientResult<Bytes>;

    /// Posts an encoded call and returns the RecordIO response body as it
    /// arrives.
    async fn open_stream(&self, body: Bytes) -> ClientResult<ByteStream>;

    /// Posts a RecordIO framed request body and returns the response body.
    async fn send_stream(&self, body: ByteStream) -> ClientResult<Bytes>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
    encoding: Encoding,
    user_agent: String,
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(client: Client, url: Url, encoding: Encoding, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            url,
            encoding,
            user_agent: user_agent.into(),
            request_timeout: None,
        }
    }

    /// Per-request timeout for unary calls. Streams never time out.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn build_request(&self) -> reqwest::RequestBuilder {
        self.client
            .post(self.url.clone())
            .header(USER_AGENT, &self.user_agent)
    }

    /// Turns a non-2xx response into [`ClientError::Http`].
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), message = %message, "Operator API returned error status");
        Err(ClientError::http(status.as_u16(), message))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(&self, body: Bytes) -> ClientResult<Bytes> {
        let media_type = self.encoding.media_type();
        let mut request = self
            .build_request()
            .header(CONTENT_TYPE, media_type)
            .header(ACCEPT, media_type)
            .body(body);
        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }

        trace!(url = %self.url, "Sending call");
        let response = Self::check_status(request.send().await?).await?;
        let body = response.bytes().await?;
        trace!(bytes = body.len(), "Received response");
        Ok(body)
    }

    async fn open_stream(&self, body: Bytes) -> ClientResult<ByteStream> {
        let media_type = self.encoding.media_type();
        let request = self
            .build_request()
            .header(CONTENT_TYPE, media_type)
            .header(ACCEPT, RECORDIO_MEDIA_TYPE)
            .header(MESSAGE_ACCEPT, media_type)
            .body(body);

        debug!(url = %self.url, "Opening stream");
        let response = Self::check_status(request.send().await?).await?;
        Ok(response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .boxed())
    }

    async fn send_stream(&self, body: ByteStream) -> ClientResult<Bytes> {
        let media_type = self.encoding.media_type();
        let request = self
            .build_request()
            .header(CONTENT_TYPE, RECORDIO_MEDIA_TYPE)
            .header(MESSAGE_CONTENT_TYPE, media_type)
            .header(ACCEPT, media_type)
            .body(reqwest::Body::wrap_stream(body));

        debug!(url = %self.url, "Streaming request body");
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.bytes().await?)
    }
}
