//! Call dispatch shared by master and agent clients.

use std::fmt;
use std::sync::Arc;

use async_stream::try_stream;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use mesops_proto::{OperatorUnion, ProtoEnum};
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;
use tracing::debug;

use crate::config::{ClientBuilder, ClientConfig};
use crate::context::CallContext;
use crate::encoding::Encoding;
use crate::error::{ClientError, ClientResult};
use crate::recordio::RecordIoCodec;
use crate::retry;
use crate::transport::{ByteStream, Transport};

/// A typed stream of frames read from a RecordIO response.
pub type FrameStream<T> = BoxStream<'static, ClientResult<T>>;

/// Role-agnostic Operator API client.
///
/// Encodes calls, runs them through the retry orchestrator and decodes the
/// responses. Cheap to clone; clones share the transport and its
/// connection pool.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn encoding(&self) -> Encoding {
        self.config.encoding
    }

    /// Sends `call` with retries and returns the raw response body.
    async fn round_trip<C: OperatorUnion>(&self, ctx: &CallContext, call: C) -> ClientResult<Bytes> {
        let kind = call.kind();
        let body = self.config.encoding.encode(&call.into_wire())?;
        debug!(call = kind.as_str_name(), bytes = body.len(), "Dispatching call");

        let transport = self.transport.clone();
        retry::run(ctx, self.config.max_retries, move || {
            let transport = transport.clone();
            let body = body.clone();
            async move { transport.round_trip(body).await }
        })
        .await
    }

    /// Sends `call` and decodes the response, if the server sent one.
    pub async fn send<C, R>(&self, ctx: &CallContext, call: C) -> ClientResult<Option<R>>
    where
        C: OperatorUnion,
        R: OperatorUnion,
    {
        let body = self.round_trip(ctx, call).await?;
        if body.is_empty() {
            return Ok(None);
        }

        let wire: R::Wire = self.config.encoding.decode(&body)?;
        Ok(Some(R::from_wire(wire)?))
    }

    /// Sends `call` and requires a response of kind `expected`.
    pub async fn request<C, R>(&self, ctx: &CallContext, call: C, expected: R::Kind) -> ClientResult<R>
    where
        C: OperatorUnion,
        R: OperatorUnion,
    {
        match self.send::<C, R>(ctx, call).await? {
            Some(response) => {
                let actual = response.kind();
                if Into::<i32>::into(actual) != Into::<i32>::into(expected) {
                    return Err(ClientError::UnexpectedResponse {
                        expected: expected.as_str_name(),
                        actual: actual.as_str_name(),
                    });
                }
                Ok(response)
            }
            None => Err(ClientError::EmptyResponse(expected.as_str_name())),
        }
    }

    /// Sends a call whose success carries no payload. Any 2xx body is
    /// accepted and discarded.
    pub async fn execute<C: OperatorUnion>(&self, ctx: &CallContext, call: C) -> ClientResult<()> {
        self.round_trip(ctx, call).await.map(|_| ())
    }

    /// Opens a RecordIO stream for `call` and decodes each frame as `U`.
    ///
    /// Opening the stream is retried like any other call. Once the
    /// connection is established, the first error ends the stream. `ctx`
    /// is checked before every frame. A clean close by the server between
    /// frames ends the stream without an error.
    pub async fn stream<C, U>(&self, ctx: &CallContext, call: C) -> ClientResult<FrameStream<U>>
    where
        C: OperatorUnion,
        U: OperatorUnion,
    {
        let kind = call.kind();
        let body = self.config.encoding.encode(&call.into_wire())?;
        debug!(call = kind.as_str_name(), "Opening stream");

        let transport = self.transport.clone();
        let stream = retry::run(ctx, self.config.max_retries, move || {
            let transport = transport.clone();
            let body = body.clone();
            async move { transport.open_stream(body).await }
        })
        .await?;

        Ok(self.decode_frames(ctx.clone(), stream))
    }

    /// Posts a RecordIO body built from `frames`. Attempted once, since the
    /// body cannot be replayed.
    pub async fn send_frames<U>(&self, ctx: &CallContext, frames: BoxStream<'static, U>) -> ClientResult<()>
    where
        U: OperatorUnion,
    {
        ctx.check()?;
        let encoding = self.config.encoding;
        let body: ByteStream = frames
            .map(move |frame| {
                encoding
                    .encode(&frame.into_wire())
                    .map(|record| crate::recordio::encode_frame(&record))
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })
            .boxed();

        tokio::select! {
            biased;
            err = ctx.done() => Err(err),
            result = self.transport.send_stream(body) => result.map(|_| ()),
        }
    }

    /// Decodes a RecordIO byte stream into typed frames.
    pub fn decode_frames<U: OperatorUnion>(&self, ctx: CallContext, body: ByteStream) -> FrameStream<U> {
        let encoding = self.config.encoding;
        let codec = RecordIoCodec::with_max_frame_length(self.config.max_frame_length);

        Box::pin(try_stream! {
            let mut frames = FramedRead::new(StreamReader::new(body), codec);
            loop {
                let next = tokio::select! {
                    biased;
                    err = ctx.done() => Some(Err(err)),
                    frame = frames.next() => frame.map(|f| f.map_err(ClientError::from)),
                };
                let Some(frame) = next else {
                    debug!(stream = U::NAME, "Stream ended");
                    break;
                };

                let wire: U::Wire = encoding.decode(&frame?)?;
                yield U::from_wire(wire)?;
            }
        })
    }
}
