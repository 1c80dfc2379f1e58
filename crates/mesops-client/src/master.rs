//! Client for a Mesos master.

use mesops_proto::maintenance::MachineId;
use mesops_proto::master::{call, response, Call, Event, Response, ResponseType};
use mesops_proto::mesos::{AgentId, FrameworkId};

use crate::client::{Client, FrameStream};
use crate::config::ClientBuilder;
use crate::context::CallContext;
use crate::error::ClientResult;

/// Typed client for the master's Operator API.
///
/// Shared calls live on [`crate::OperatorApi`].
#[derive(Debug, Clone)]
pub struct MasterClient {
    inner: Client,
}

impl From<Client> for MasterClient {
    fn from(inner: Client) -> Self {
        Self { inner }
    }
}

impl_operator_api!(MasterClient);

impl MasterClient {
    /// A client with default settings for the master at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(ClientBuilder::new(base_url).build()?.into())
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Full cluster state: agents, frameworks, executors and tasks.
    pub async fn get_state(&self, ctx: &CallContext) -> ClientResult<response::GetState> {
        dispatch!(self.inner, ctx, Call::GetState => Response / ResponseType::GetState)
    }

    pub async fn get_agents(&self, ctx: &CallContext) -> ClientResult<response::GetAgents> {
        dispatch!(self.inner, ctx, Call::GetAgents => Response / ResponseType::GetAgents)
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

    pub async fn get_roles(&self, ctx: &CallContext) -> ClientResult<response::GetRoles> {
        dispatch!(self.inner, ctx, Call::GetRoles => Response / ResponseType::GetRoles)
    }

    pub async fn get_weights(&self, ctx: &CallContext) -> ClientResult<response::GetWeights> {
        dispatch!(self.inner, ctx, Call::GetWeights => Response / ResponseType::GetWeights)
    }

    pub async fn update_weights(&self, ctx: &CallContext, update: call::UpdateWeights) -> ClientResult<()> {
        self.inner.execute(ctx, Call::UpdateWeights(update)).await
    }

    /// Information about the leading master.
    pub async fn get_master(&self, ctx: &CallContext) -> ClientResult<response::GetMaster> {
        dispatch!(self.inner, ctx, Call::GetMaster => Response / ResponseType::GetMaster)
    }

    pub async fn get_maintenance_status(
        &self,
        ctx: &CallContext,
    ) -> ClientResult<response::GetMaintenanceStatus> {
        dispatch!(self.inner, ctx, Call::GetMaintenanceStatus => Response / ResponseType::GetMaintenanceStatus)
    }

    pub async fn get_maintenance_schedule(
        &self,
        ctx: &CallContext,
    ) -> ClientResult<response::GetMaintenanceSchedule> {
        dispatch!(self.inner, ctx, Call::GetMaintenanceSchedule => Response / ResponseType::GetMaintenanceSchedule)
    }

    /// Replaces the whole maintenance schedule.
    pub async fn update_maintenance_schedule(
        &self,
        ctx: &CallContext,
        update: call::UpdateMaintenanceSchedule,
    ) -> ClientResult<()> {
        self.inner
            .execute(ctx, Call::UpdateMaintenanceSchedule(update))
            .await
    }

    pub async fn start_maintenance(&self, ctx: &CallContext, machines: Vec<MachineId>) -> ClientResult<()> {
        let call = Call::StartMaintenance(call::StartMaintenance { machines });
        self.inner.execute(ctx, call).await
    }

    pub async fn stop_maintenance(&self, ctx: &CallContext, machines: Vec<MachineId>) -> ClientResult<()> {
        let call = Call::StopMaintenance(call::StopMaintenance { machines });
        self.inner.execute(ctx, call).await
    }

    pub async fn get_quota(&self, ctx: &CallContext) -> ClientResult<response::GetQuota> {
        dispatch!(self.inner, ctx, Call::GetQuota => Response / ResponseType::GetQuota)
    }

    pub async fn set_quota(&self, ctx: &CallContext, quota: call::SetQuota) -> ClientResult<()> {
        self.inner.execute(ctx, Call::SetQuota(quota)).await
    }

    pub async fn remove_quota(&self, ctx: &CallContext, role: &str) -> ClientResult<()> {
        let call = Call::RemoveQuota(call::RemoveQuota {
            role: role.to_string(),
        });
        self.inner.execute(ctx, call).await
    }

    /// Marks an unreachable agent as permanently gone.
    pub async fn mark_agent_gone(&self, ctx: &CallContext, agent_id: AgentId) -> ClientResult<()> {
        let call = Call::MarkAgentGone(call::MarkAgentGone {
            agent_id: Some(agent_id),
        });
        self.inner.execute(ctx, call).await
    }

    pub async fn reserve_resources(
        &self,
        ctx: &CallContext,
        reserve: call::ReserveResources,
    ) -> ClientResult<()> {
        self.inner.execute(ctx, Call::ReserveResources(reserve)).await
    }

    pub async fn unreserve_resources(
        &self,
        ctx: &CallContext,
        unreserve: call::UnreserveResources,
    ) -> ClientResult<()> {
        self.inner
            .execute(ctx, Call::UnreserveResources(unreserve))
            .await
    }

    pub async fn create_volumes(&self, ctx: &CallContext, create: call::CreateVolumes) -> ClientResult<()> {
        self.inner.execute(ctx, Call::CreateVolumes(create)).await
    }

    pub async fn destroy_volumes(&self, ctx: &CallContext, destroy: call::DestroyVolumes) -> ClientResult<()> {
        self.inner.execute(ctx, Call::DestroyVolumes(destroy)).await
    }

    /// Tears down a framework and kills all of its tasks.
    pub async fn teardown(&self, ctx: &CallContext, framework_id: FrameworkId) -> ClientResult<()> {
        let call = Call::Teardown(call::Teardown {
            framework_id: Some(framework_id),
        });
        self.inner.execute(ctx, call).await
    }

    /// Subscribes to cluster events.
    ///
    /// The first event is [`Event::Subscribed`] with a state snapshot;
    /// heartbeats follow at the interval it announces. The stream ends on
    /// the first error, or when `ctx` is cancelled or times out.
    ///
    /// When the master closes the connection between events the stream
    /// simply returns `None`; callers that need to stay subscribed must
    /// resubscribe. A close inside an event is an error.
    pub async fn subscribe(&self, ctx: &CallContext) -> ClientResult<FrameStream<Event>> {
        self.inner.stream(ctx, Call::Subscribe).await
    }
}
