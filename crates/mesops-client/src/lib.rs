//! Async clients for the Mesos Operator HTTP API.
//!
//! Every call is a `POST` to `<base>/api/v1` carrying a JSON or protobuf
//! body. Transport failures are retried with binary exponential backoff
//! keyed on the first attempt's round trip time; HTTP status errors are
//! returned at once. Event and container I/O streams are RecordIO framed.
//!
//! # Architecture
//!
//! ```text
//! MasterClient / AgentClient ──▶ Client ──▶ retry::run ──▶ Transport (reqwest)
//!        typed calls              encode      backoff,        one POST per
//!                                 decode      cancellation    attempt
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use mesops_client::{CallContext, MasterClient, OperatorApi};
//!
//! # async fn example() -> mesops_client::ClientResult<()> {
//! let master = MasterClient::new("http://localhost:5050")?;
//! let ctx = CallContext::with_timeout(Duration::from_secs(30));
//!
//! let health = master.get_health(&ctx).await?;
//! println!("healthy: {}", health.healthy);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod api;

pub mod agent;
pub mod backoff;
pub mod client;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod master;
pub mod recordio;
pub mod retry;
pub mod transport;

pub use agent::AgentClient;
pub use api::OperatorApi;
pub use client::{Client, FrameStream};
pub use config::{normalize_url, ClientBuilder, ClientConfig};
pub use context::CallContext;
pub use encoding::Encoding;
pub use error::{ClientError, ClientResult};
pub use master::MasterClient;
pub use recordio::{RecordIoCodec, RecordIoError};
pub use transport::{HttpTransport, Transport};

pub use mesops_proto as proto;
pub use tokio_util::sync::CancellationToken;
