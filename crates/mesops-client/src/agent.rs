//! Client for a Mesos agent.

use futures::{stream, Stream, StreamExt};
use mesops_proto::agent::{call, response, Call, ProcessIo, Response, ResponseType};
use mesops_proto::mesos::{ContainerId, Image};

use crate::client::{Client, FrameStream};
use crate::config::ClientBuilder;
use crate::context::CallContext;
use crate::error::ClientResult;

/// Typed client for an agent's Operator API.
///
/// Shared calls live on [`crate::OperatorApi`].
#[derive(Debug, Clone)]
pub struct AgentClient {
    inner: Client,
}

impl From<Client> for AgentClient {
    fn from(inner: Client) -> Self {
        Self { inner }
    }
}

impl_operator_api!(AgentClient);

impl AgentClient {
    /// A client with default settings for the agent at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(ClientBuilder::new(base_url).build()?.into())
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    pub async fn get_state(&self, ctx: &CallContext) -> ClientResult<response::GetState> {
        dispatch!(self.inner, ctx, Call::GetState => Response / ResponseType::GetState)
    }

    /// Containers on the agent. Nested and standalone containers are only
    /// listed when asked for.
    pub async fn get_containers(
        &self,
        ctx: &CallContext,
        show_nested: bool,
        show_standalone: bool,
    ) -> ClientResult<response::GetContainers> {
        let call = Call::GetContainers(call::GetContainers {
            show_nested: Some(show_nested),
            show_standalone: Some(show_standalone),
        });
        dispatch!(self.inner, ctx, call => Response / ResponseType::GetContainers)
    }

    pub async fn get_frameworks(&self, ctx: &CallContext) -> ClientResult<response::GetFrameworks> {
        dispatch!(self.inner, ctx, Call::GetFrameworks => Response / ResponseType::GetFrameworks)
    }

    pub async fn get_executors(&self, ctx: &CallContext) -> ClientResult<response::GetExecutors> {
        dispatch!(self.inner, ctx, Call::GetExecutors => Response / ResponseType::GetExecutors)
    }

    pub async fn get_tasks(&self, ctx: &CallContext) -> ClientResult<response::GetTasks> {
        dispatch!(self.inner, ctx, Call::GetTasks => Response / ResponseType::GetTasks)
    }

    pub async fn get_agent(&self, ctx: &CallContext) -> ClientResult<response::GetAgent> {
        dispatch!(self.inner, ctx, Call::GetAgent => Response / ResponseType::GetAgent)
    }

    pub async fn launch_nested_container(
        &self,
        ctx: &CallContext,
        launch: call::LaunchNestedContainer,
    ) -> ClientResult<()> {
        self.inner
            .execute(ctx, Call::LaunchNestedContainer(launch))
            .await
    }

    /// Blocks until the nested container exits.
    ///
    /// This can take arbitrarily long; give `ctx` a deadline and raise the
    /// client's request timeout accordingly.
    pub async fn wait_nested_container(
        &self,
        ctx: &CallContext,
        container_id: ContainerId,
    ) -> ClientResult<response::WaitNestedContainer> {
        let call = Call::WaitNestedContainer(call::WaitNestedContainer {
            container_id: Some(container_id),
        });
        dispatch!(self.inner, ctx, call => Response / ResponseType::WaitNestedContainer)
    }

    /// Sends `signal` to a nested container, SIGKILL when `None`.
    pub async fn kill_nested_container(
        &self,
        ctx: &CallContext,
        container_id: ContainerId,
        signal: Option<i32>,
    ) -> ClientResult<()> {
        let call = Call::KillNestedContainer(call::KillNestedContainer {
            container_id: Some(container_id),
            signal,
        });
        self.inner.execute(ctx, call).await
    }

    pub async fn remove_nested_container(&self, ctx: &CallContext, container_id: ContainerId) -> ClientResult<()> {
        let call = Call::RemoveNestedContainer(call::RemoveNestedContainer {
            container_id: Some(container_id),
        });
        self.inner.execute(ctx, call).await
    }

    pub async fn launch_container(&self, ctx: &CallContext, launch: call::LaunchContainer) -> ClientResult<()> {
        self.inner.execute(ctx, Call::LaunchContainer(launch)).await
    }

    /// Launches a nested container and streams its output.
    ///
    /// The container is destroyed when the stream is dropped.
    pub async fn launch_nested_container_session(
        &self,
        ctx: &CallContext,
        launch: call::LaunchNestedContainerSession,
    ) -> ClientResult<FrameStream<ProcessIo>> {
        self.inner
            .stream(ctx, Call::LaunchNestedContainerSession(launch))
            .await
    }

    /// Streams a running container's stdout and stderr.
    pub async fn attach_container_output(
        &self,
        ctx: &CallContext,
        container_id: ContainerId,
    ) -> ClientResult<FrameStream<ProcessIo>> {
        let call = Call::AttachContainerOutput(call::AttachContainerOutput {
            container_id: Some(container_id),
        });
        self.inner.stream(ctx, call).await
    }

    /// Streams `input` to a container's stdin.
    ///
    /// The first frame names the container; every item of `input` follows
    /// as its own frame. Returns once the agent answers, which it does after
    /// `input` ends. Never retried.
    pub async fn attach_container_input<S>(
        &self,
        ctx: &CallContext,
        container_id: ContainerId,
        input: S,
    ) -> ClientResult<()>
    where
        S: Stream<Item = ProcessIo> + Send + 'static,
    {
        let first = Call::AttachContainerInput(call::AttachContainerInput::for_container(container_id));
        let frames = stream::once(async move { first })
            .chain(input.map(|process_io| {
                Call::AttachContainerInput(call::AttachContainerInput::with_process_io(process_io))
            }))
            .boxed();
        self.inner.send_frames(ctx, frames).await
    }

    pub async fn add_resource_provider_config(
        &self,
        ctx: &CallContext,
        add: call::AddResourceProviderConfig,
    ) -> ClientResult<()> {
        self.inner
            .execute(ctx, Call::AddResourceProviderConfig(add))
            .await
    }

    pub async fn update_resource_provider_config(
        &self,
        ctx: &CallContext,
        update: call::UpdateResourceProviderConfig,
    ) -> ClientResult<()> {
        self.inner
            .execute(ctx, Call::UpdateResourceProviderConfig(update))
            .await
    }

    pub async fn remove_resource_provider_config(
        &self,
        ctx: &CallContext,
        provider_type: &str,
        name: &str,
    ) -> ClientResult<()> {
        let call = Call::RemoveResourceProviderConfig(call::RemoveResourceProviderConfig {
            r#type: provider_type.to_string(),
            name: name.to_string(),
        });
        self.inner.execute(ctx, call).await
    }

    /// Removes unused container images, keeping `excluded_images`.
    pub async fn prune_images(&self, ctx: &CallContext, excluded_images: Vec<Image>) -> ClientResult<()> {
        let call = Call::PruneImages(call::PruneImages { excluded_images });
        self.inner.execute(ctx, call).await
    }
}
