//! Client configuration.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::client::Client;
use crate::encoding::Encoding;
use crate::error::{ClientError, ClientResult};
use crate::recordio::DEFAULT_MAX_FRAME_LENGTH;
use crate::transport::{HttpTransport, Transport};

/// Path of the Operator API below the server's base URL.
pub const API_PATH: &str = "api/v1";

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Connect timeout of the default HTTP client.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-request timeout for unary calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Value of the `User-Agent` header.
pub fn default_user_agent() -> String {
    format!("mesops/{}", env!("CARGO_PKG_VERSION"))
}

/// Appends the Operator API path to a server's base URL.
///
/// `http://master:5050` and `http://master:5050/` both become
/// `http://master:5050/api/v1`. A URL that already ends in `api/v1` is kept.
pub fn normalize_url(base: &str) -> ClientResult<Url> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(ClientError::config("server URL is empty"));
    }

    let mut url = Url::parse(trimmed)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::config(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }

    let path = url.path().trim_end_matches('/');
    if !path.ends_with(&format!("/{API_PATH}")) {
        let joined = format!("{path}/{API_PATH}");
        url.set_path(&joined);
    } else if url.path().ends_with('/') {
        let joined = path.to_string();
        url.set_path(&joined);
    }
    Ok(url)
}

/// Frozen settings of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Operator API endpoint, including `/api/v1`.
    pub url: Url,
    pub max_retries: u32,
    pub encoding: Encoding,
    /// Timeout of each unary attempt. Streams are never timed out here.
    pub request_timeout: Option<Duration>,
    pub max_frame_length: usize,
    pub user_agent: String,
}

/// Builder for master and agent clients.
///
/// ```no_run
/// use mesops_client::{ClientBuilder, Encoding, MasterClient};
///
/// # fn demo() -> mesops_client::ClientResult<()> {
/// let master: MasterClient = ClientBuilder::new("http://localhost:5050")
///     .max_retries(3)
///     .encoding(Encoding::Protobuf)
///     .build()?
///     .into();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    http_client: Option<HttpClient>,
    max_retries: u32,
    encoding: Encoding,
    connect_timeout: Duration,
    /// `None` until set; resolved against `http_client` in [`ClientBuilder::config`].
    request_timeout: Option<Option<Duration>>,
    max_frame_length: usize,
    user_agent: String,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: None,
            max_retries: DEFAULT_MAX_RETRIES,
            encoding: Encoding::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
            user_agent: default_user_agent(),
        }
    }

    /// Uses an existing HTTP client and its connection pool.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Ignored when an HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// `None` disables the per-attempt timeout of unary calls.
    ///
    /// Defaults to 15 seconds for the built-in HTTP client and to none when
    /// a client is supplied, so the supplied client's own timeout applies.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.max_frame_length = max_frame_length;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the settings without building a client.
    pub fn config(&self) -> ClientResult<ClientConfig> {
        if self.max_frame_length == 0 {
            return Err(ClientError::config("max frame length must be positive"));
        }

        Ok(ClientConfig {
            url: normalize_url(&self.base_url)?,
            max_retries: self.max_retries,
            encoding: self.encoding,
            request_timeout: self.resolved_request_timeout(),
            max_frame_length: self.max_frame_length,
            user_agent: self.user_agent.clone(),
        })
    }

    fn resolved_request_timeout(&self) -> Option<Duration> {
        match (self.request_timeout, &self.http_client) {
            (Some(timeout), _) => timeout,
            (None, None) => Some(DEFAULT_REQUEST_TIMEOUT),
            (None, Some(_)) => None,
        }
    }

    /// Builds a client over HTTP.
    pub fn build(self) -> ClientResult<Client> {
        let config = self.config()?;
        let http = match self.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .connect_timeout(self.connect_timeout)
                .build()?,
        };

        let transport = HttpTransport::new(
            http,
            config.url.clone(),
            config.encoding,
            config.user_agent.clone(),
        )
        .with_request_timeout(config.request_timeout);
        Ok(Client::new(config, Arc::new(transport)))
    }

    /// Builds a client over a custom transport.
    pub fn build_with_transport(self, transport: Arc<dyn Transport>) -> ClientResult<Client> {
        Ok(Client::new(self.config()?, transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        let cases = [
            ("http://localhost:5050", "http://localhost:5050/api/v1"),
            ("http://localhost:5050/", "http://localhost:5050/api/v1"),
            ("https://mesos.example.com/master", "https://mesos.example.com/master/api/v1"),
            ("https://mesos.example.com/master/", "https://mesos.example.com/master/api/v1"),
            ("http://localhost:5051/api/v1", "http://localhost:5051/api/v1"),
            ("http://localhost:5051/api/v1/", "http://localhost:5051/api/v1"),
            ("  http://10.0.0.1:5050  ", "http://10.0.0.1:5050/api/v1"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_url(input).unwrap().as_str(), expected, "{input}");
        }
    }

    #[test]
    fn test_normalize_url_rejects_bad_input() {
        assert!(matches!(normalize_url(""), Err(ClientError::Config(_))));
        assert!(matches!(normalize_url("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(
            normalize_url("ftp://localhost:5050"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientBuilder::new("http://localhost:5050").config().unwrap();
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.encoding, Encoding::Json);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.max_frame_length, DEFAULT_MAX_FRAME_LENGTH);
        assert!(config.user_agent.starts_with("mesops/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientBuilder::new("http://localhost:5051")
            .max_retries(0)
            .encoding(Encoding::Protobuf)
            .request_timeout(None)
            .max_frame_length(1024)
            .user_agent("custom/1")
            .config()
            .unwrap();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.encoding, Encoding::Protobuf);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.max_frame_length, 1024);
        assert_eq!(config.user_agent, "custom/1");
    }

    #[test]
    fn test_supplied_client_keeps_its_own_timeout() {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();
        let config = ClientBuilder::new("http://localhost:5051")
            .http_client(http)
            .config()
            .unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_supplied_client_with_explicit_timeout() {
        let config = ClientBuilder::new("http://localhost:5051")
            .request_timeout(Some(Duration::from_secs(90)))
            .http_client(HttpClient::new())
            .config()
            .unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_zero_frame_length_rejected() {
        let err = ClientBuilder::new("http://localhost:5050")
            .max_frame_length(0)
            .config()
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
