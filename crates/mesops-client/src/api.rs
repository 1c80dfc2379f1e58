//! Calls every Operator API endpoint answers, master or agent.

use std::time::Duration;

use async_trait::async_trait;
use mesops_proto::response::{GetFlags, GetHealth, GetLoggingLevel, GetMetrics, GetVersion, ListFiles, ReadFile};

use crate::context::CallContext;
use crate::error::ClientResult;

/// Sends a call and unwraps one variant of the role's response.
///
/// `dispatch!(client, ctx, call => Response / ResponseType :: Variant)`
macro_rules! dispatch {
    ($client:expr, $ctx:expr, $call:expr => $response:ident / $kind:ident :: $variant:ident) => {{
        match $client
            .request::<_, $response>($ctx, $call, $kind::$variant)
            .await?
        {
            $response::$variant(payload) => Ok(payload),
            other => Err($crate::error::ClientError::UnexpectedResponse {
                expected: ::mesops_proto::ProtoEnum::as_str_name(&$kind::$variant),
                actual: ::mesops_proto::ProtoEnum::as_str_name(
                    &::mesops_proto::OperatorUnion::kind(&other),
                ),
            }),
        }
    }};
}

/// Implements [`OperatorApi`] for a role client with an `inner: Client`
/// field, given the role's `Call`, `Response` and `ResponseType` in scope.
macro_rules! impl_operator_api {
    ($client:ty) => {
        #[::async_trait::async_trait]
        impl $crate::api::OperatorApi for $client {
            async fn get_health(
                &self,
                ctx: &$crate::context::CallContext,
            ) -> $crate::error::ClientResult<::mesops_proto::response::GetHealth> {
                dispatch!(self.inner, ctx, Call::GetHealth => Response / ResponseType::GetHealth)
            }

            async fn get_flags(
                &self,
                ctx: &$crate::context::CallContext,
            ) -> $crate::error::ClientResult<::mesops_proto::response::GetFlags> {
                dispatch!(self.inner, ctx, Call::GetFlags => Response / ResponseType::GetFlags)
            }

            async fn get_version(
                &self,
                ctx: &$crate::context::CallContext,
            ) -> $crate::error::ClientResult<::mesops_proto::response::GetVersion> {
                dispatch!(self.inner, ctx, Call::GetVersion => Response / ResponseType::GetVersion)
            }

            async fn get_metrics(
                &self,
                ctx: &$crate::context::CallContext,
                timeout: Option<::std::time::Duration>,
            ) -> $crate::error::ClientResult<::mesops_proto::response::GetMetrics> {
                let call = Call::GetMetrics(::mesops_proto::call::GetMetrics {
                    timeout: timeout.map(Into::into),
                });
                dispatch!(self.inner, ctx, call => Response / ResponseType::GetMetrics)
            }

            async fn get_logging_level(
                &self,
                ctx: &$crate::context::CallContext,
            ) -> $crate::error::ClientResult<::mesops_proto::response::GetLoggingLevel> {
                dispatch!(self.inner, ctx, Call::GetLoggingLevel => Response / ResponseType::GetLoggingLevel)
            }

            async fn set_logging_level(
                &self,
                ctx: &$crate::context::CallContext,
                level: u32,
                duration: ::std::time::Duration,
            ) -> $crate::error::ClientResult<()> {
                let call = Call::SetLoggingLevel(::mesops_proto::call::SetLoggingLevel {
                    level,
                    duration: Some(duration.into()),
                });
                self.inner.execute(ctx, call).await
            }

            async fn list_files(
                &self,
                ctx: &$crate::context::CallContext,
                path: &str,
            ) -> $crate::error::ClientResult<::mesops_proto::response::ListFiles> {
                let call = Call::ListFiles(::mesops_proto::call::ListFiles {
                    path: path.to_string(),
                });
                dispatch!(self.inner, ctx, call => Response / ResponseType::ListFiles)
            }

            async fn read_file(
                &self,
                ctx: &$crate::context::CallContext,
                path: &str,
                offset: u64,
                length: Option<u64>,
            ) -> $crate::error::ClientResult<::mesops_proto::response::ReadFile> {
                let call = Call::ReadFile(::mesops_proto::call::ReadFile {
                    path: path.to_string(),
                    offset,
                    length,
                });
                dispatch!(self.inner, ctx, call => Response / ResponseType::ReadFile)
            }
        }
    };
}

/// Calls shared by masters and agents.
///
/// Every method runs through the retry orchestrator and honours `ctx`.
#[async_trait]
pub trait OperatorApi: Send + Sync {
    async fn get_health(&self, ctx: &CallContext) -> ClientResult<GetHealth>;

    /// Command line flags the server was started with.
    async fn get_flags(&self, ctx: &CallContext) -> ClientResult<GetFlags>;

    async fn get_version(&self, ctx: &CallContext) -> ClientResult<GetVersion>;

    /// Metrics snapshot. `timeout` bounds how long the server may spend
    /// collecting it.
    async fn get_metrics(&self, ctx: &CallContext, timeout: Option<Duration>) -> ClientResult<GetMetrics>;

    async fn get_logging_level(&self, ctx: &CallContext) -> ClientResult<GetLoggingLevel>;

    /// Raises the logging level to `level` for `duration`.
    async fn set_logging_level(&self, ctx: &CallContext, level: u32, duration: Duration) -> ClientResult<()>;

    async fn list_files(&self, ctx: &CallContext, path: &str) -> ClientResult<ListFiles>;

    /// Reads from a virtual file path, e.g. `/master/log`.
    async fn read_file(
        &self,
        ctx: &CallContext,
        path: &str,
        offset: u64,
        length: Option<u64>,
    ) -> ClientResult<ReadFile>;
}
