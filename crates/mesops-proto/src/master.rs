//! Master Operator API: calls, responses and subscription events.

use crate::{call as common_call, response as common_response};

/// Call payloads only the master accepts.
pub mod call {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use crate::maintenance::{MachineId, QuotaRequest, Schedule};
    use crate::mesos::{AgentId, FrameworkId, Resource, WeightInfo};

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UpdateWeights {
        #[prost(message, repeated, tag = "1")]
        pub weight_infos: Vec<WeightInfo>,
    }

    /// Dynamically reserves resources on an agent.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ReserveResources {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
        #[prost(message, repeated, tag = "2")]
        pub resources: Vec<Resource>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UnreserveResources {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
        #[prost(message, repeated, tag = "2")]
        pub resources: Vec<Resource>,
    }

    /// Creates persistent volumes on reserved disk resources.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CreateVolumes {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
        #[prost(message, repeated, tag = "2")]
        pub volumes: Vec<Resource>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DestroyVolumes {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
        #[prost(message, repeated, tag = "2")]
        pub volumes: Vec<Resource>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UpdateMaintenanceSchedule {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schedule: Option<Schedule>,
    }

    /// Moves machines into the DOWN mode.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct StartMaintenance {
        #[prost(message, repeated, tag = "1")]
        pub machines: Vec<MachineId>,
    }

    /// Brings machines back UP.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct StopMaintenance {
        #[prost(message, repeated, tag = "1")]
        pub machines: Vec<MachineId>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SetQuota {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub quota_request: Option<QuotaRequest>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct RemoveQuota {
        #[prost(string, required, tag = "1")]
        pub role: String,
    }

    /// Tears down a running framework, killing all of its tasks.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Teardown {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_id: Option<FrameworkId>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct MarkAgentGone {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
    }
}

/// Response payloads only the master returns.
pub mod response {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use crate::maintenance::{ClusterStatus, QuotaStatus, Schedule};
    use crate::mesos::{
        AgentId, AgentInfo, ExecutorInfo, FrameworkInfo, MasterInfo, Resource, Role, Task,
        TimeInfo, WeightInfo,
    };

    /// Full cluster state: tasks, executors, frameworks and agents.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetState {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get_tasks: Option<GetTasks>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get_executors: Option<GetExecutors>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get_frameworks: Option<GetFrameworks>,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get_agents: Option<GetAgents>,
    }

    /// An agent registered with the master.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Agent {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_info: Option<AgentInfo>,
        #[prost(bool, required, tag = "2")]
        pub active: bool,
        #[prost(string, required, tag = "3")]
        pub version: String,
        #[prost(string, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub pid: Option<String>,
        #[prost(message, optional, tag = "5")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub registered_time: Option<TimeInfo>,
        #[prost(message, optional, tag = "6")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reregistered_time: Option<TimeInfo>,
        #[prost(message, repeated, tag = "7")]
        pub total_resources: Vec<Resource>,
        #[prost(message, repeated, tag = "8")]
        pub allocated_resources: Vec<Resource>,
        #[prost(message, repeated, tag = "9")]
        pub offered_resources: Vec<Resource>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetAgents {
        #[prost(message, repeated, tag = "1")]
        pub agents: Vec<Agent>,
        #[prost(message, repeated, tag = "2")]
        pub recovered_agents: Vec<AgentInfo>,
    }

    /// A framework known to the master.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Framework {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_info: Option<FrameworkInfo>,
        #[prost(bool, required, tag = "2")]
        pub active: bool,
        #[prost(bool, required, tag = "3")]
        pub connected: bool,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub registered_time: Option<TimeInfo>,
        #[prost(message, optional, tag = "5")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reregistered_time: Option<TimeInfo>,
        #[prost(message, optional, tag = "6")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub unregistered_time: Option<TimeInfo>,
        #[prost(message, repeated, tag = "9")]
        pub allocated_resources: Vec<Resource>,
        #[prost(message, repeated, tag = "10")]
        pub offered_resources: Vec<Resource>,
        #[prost(bool, optional, tag = "11")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub recovered: Option<bool>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetFrameworks {
        #[prost(message, repeated, tag = "1")]
        pub frameworks: Vec<Framework>,
        #[prost(message, repeated, tag = "2")]
        pub completed_frameworks: Vec<Framework>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Executor {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub executor_info: Option<ExecutorInfo>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetExecutors {
        #[prost(message, repeated, tag = "1")]
        pub executors: Vec<Executor>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetTasks {
        #[prost(message, repeated, tag = "1")]
        pub pending_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "2")]
        pub tasks: Vec<Task>,
        #[prost(message, repeated, tag = "3")]
        pub completed_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "4")]
        pub orphan_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "5")]
        pub unreachable_tasks: Vec<Task>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetRoles {
        #[prost(message, repeated, tag = "1")]
        pub roles: Vec<Role>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetWeights {
        #[prost(message, repeated, tag = "1")]
        pub weight_infos: Vec<WeightInfo>,
    }

    /// The leading master and when it started and was elected.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetMaster {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub master_info: Option<MasterInfo>,
        #[prost(double, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub start_time: Option<f64>,
        #[prost(double, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub elected_time: Option<f64>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetMaintenanceStatus {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<ClusterStatus>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetMaintenanceSchedule {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schedule: Option<Schedule>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetQuota {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<QuotaStatus>,
    }
}

/// Event payloads delivered on a subscription.
pub mod event {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use super::response::{Agent, Framework, GetState};
    use crate::mesos::{
        task_state, AgentId, FrameworkId, FrameworkInfo, Task, TaskState, TaskStatus,
    };

    /// First event of a subscription: a snapshot of the cluster.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Subscribed {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get_state: Option<GetState>,
        #[prost(double, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub heartbeat_interval_seconds: Option<f64>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TaskAdded {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub task: Option<Task>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TaskUpdated {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_id: Option<FrameworkId>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<TaskStatus>,
        /// Latest state of the task, which may differ from `status.state`.
        #[prost(enumeration = "TaskState", required, tag = "3")]
        #[serde(with = "task_state")]
        pub state: i32,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AgentAdded {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent: Option<Agent>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AgentRemoved {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_id: Option<AgentId>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FrameworkAdded {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework: Option<Framework>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FrameworkUpdated {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework: Option<Framework>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FrameworkRemoved {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_info: Option<FrameworkInfo>,
    }
}

tagged_union! {
    /// A call to the master.
    pub enum Call { kind: CallType, wire: WireCall }
    GetHealth = 1 => "GET_HEALTH";
    GetFlags = 2 => "GET_FLAGS";
    GetVersion = 3 => "GET_VERSION";
    GetMetrics = 4 => "GET_METRICS" { get_metrics: common_call::GetMetrics = "2" };
    GetLoggingLevel = 5 => "GET_LOGGING_LEVEL";
    SetLoggingLevel = 6 => "SET_LOGGING_LEVEL" { set_logging_level: common_call::SetLoggingLevel = "3" };
    ListFiles = 7 => "LIST_FILES" { list_files: common_call::ListFiles = "4" };
    ReadFile = 8 => "READ_FILE" { read_file: common_call::ReadFile = "5" };
    GetState = 9 => "GET_STATE";
    GetAgents = 10 => "GET_AGENTS";
    GetFrameworks = 11 => "GET_FRAMEWORKS";
    GetExecutors = 12 => "GET_EXECUTORS";
    GetTasks = 13 => "GET_TASKS";
    GetRoles = 14 => "GET_ROLES";
    GetWeights = 15 => "GET_WEIGHTS";
    UpdateWeights = 16 => "UPDATE_WEIGHTS" { update_weights: call::UpdateWeights = "6" };
    GetMaster = 17 => "GET_MASTER";
    Subscribe = 18 => "SUBSCRIBE";
    ReserveResources = 19 => "RESERVE_RESOURCES" { reserve_resources: call::ReserveResources = "7" };
    UnreserveResources = 20 => "UNRESERVE_RESOURCES" { unreserve_resources: call::UnreserveResources = "8" };
    CreateVolumes = 21 => "CREATE_VOLUMES" { create_volumes: call::CreateVolumes = "9" };
    DestroyVolumes = 22 => "DESTROY_VOLUMES" { destroy_volumes: call::DestroyVolumes = "10" };
    GetMaintenanceStatus = 23 => "GET_MAINTENANCE_STATUS";
    GetMaintenanceSchedule = 24 => "GET_MAINTENANCE_SCHEDULE";
    UpdateMaintenanceSchedule = 25 => "UPDATE_MAINTENANCE_SCHEDULE" {
        update_maintenance_schedule: call::UpdateMaintenanceSchedule = "11"
    };
    StartMaintenance = 26 => "START_MAINTENANCE" { start_maintenance: call::StartMaintenance = "12" };
    StopMaintenance = 27 => "STOP_MAINTENANCE" { stop_maintenance: call::StopMaintenance = "13" };
    GetQuota = 28 => "GET_QUOTA";
    SetQuota = 29 => "SET_QUOTA" { set_quota: call::SetQuota = "14" };
    RemoveQuota = 30 => "REMOVE_QUOTA" { remove_quota: call::RemoveQuota = "15" };
    Teardown = 31 => "TEARDOWN" { teardown: call::Teardown = "16" };
    MarkAgentGone = 32 => "MARK_AGENT_GONE" { mark_agent_gone: call::MarkAgentGone = "17" };
}

tagged_union! {
    /// A response from the master.
    pub enum Response { kind: ResponseType, wire: WireResponse }
    GetHealth = 1 => "GET_HEALTH" { get_health: common_response::GetHealth = "2" };
    GetFlags = 2 => "GET_FLAGS" { get_flags: common_response::GetFlags = "3" };
    GetVersion = 3 => "GET_VERSION" { get_version: common_response::GetVersion = "4" };
    GetMetrics = 4 => "GET_METRICS" { get_metrics: common_response::GetMetrics = "5" };
    GetLoggingLevel = 5 => "GET_LOGGING_LEVEL" { get_logging_level: common_response::GetLoggingLevel = "6" };
    ListFiles = 6 => "LIST_FILES" { list_files: common_response::ListFiles = "7" };
    ReadFile = 7 => "READ_FILE" { read_file: common_response::ReadFile = "8" };
    GetState = 8 => "GET_STATE" { get_state: response::GetState = "9" };
    GetAgents = 9 => "GET_AGENTS" { get_agents: response::GetAgents = "10" };
    GetFrameworks = 10 => "GET_FRAMEWORKS" { get_frameworks: response::GetFrameworks = "11" };
    GetExecutors = 11 => "GET_EXECUTORS" { get_executors: response::GetExecutors = "12" };
    GetTasks = 12 => "GET_TASKS" { get_tasks: response::GetTasks = "13" };
    GetRoles = 13 => "GET_ROLES" { get_roles: response::GetRoles = "14" };
    GetWeights = 14 => "GET_WEIGHTS" { get_weights: response::GetWeights = "15" };
    GetMaster = 15 => "GET_MASTER" { get_master: response::GetMaster = "16" };
    GetMaintenanceStatus = 16 => "GET_MAINTENANCE_STATUS" {
        get_maintenance_status: response::GetMaintenanceStatus = "17"
    };
    GetMaintenanceSchedule = 17 => "GET_MAINTENANCE_SCHEDULE" {
        get_maintenance_schedule: response::GetMaintenanceSchedule = "18"
    };
    GetQuota = 18 => "GET_QUOTA" { get_quota: response::GetQuota = "19" };
}

tagged_union! {
    /// An event on a master subscription.
    pub enum Event { kind: EventType, wire: WireEvent }
    Subscribed = 1 => "SUBSCRIBED" { subscribed: event::Subscribed = "2" };
    TaskAdded = 2 => "TASK_ADDED" { task_added: event::TaskAdded = "3" };
    TaskUpdated = 3 => "TASK_UPDATED" { task_updated: event::TaskUpdated = "4" };
    AgentAdded = 4 => "AGENT_ADDED" { agent_added: event::AgentAdded = "5" };
    AgentRemoved = 5 => "AGENT_REMOVED" { agent_removed: event::AgentRemoved = "6" };
    FrameworkAdded = 6 => "FRAMEWORK_ADDED" { framework_added: event::FrameworkAdded = "7" };
    FrameworkUpdated = 7 => "FRAMEWORK_UPDATED" { framework_updated: event::FrameworkUpdated = "8" };
    FrameworkRemoved = 8 => "FRAMEWORK_REMOVED" { framework_removed: event::FrameworkRemoved = "9" };
    Heartbeat = 9 => "HEARTBEAT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnionError;
    use crate::mesos::{AgentId, DurationInfo, TaskState};
    use crate::union::OperatorUnion;
    use prost::Message;

    #[test]
    fn test_get_health_call_json() {
        let json = serde_json::to_string(&Call::GetHealth.into_wire()).unwrap();
        assert_eq!(json, r#"{"type":"GET_HEALTH"}"#);
    }

    #[test]
    fn test_set_logging_level_call_json() {
        let call = Call::SetLoggingLevel(common_call::SetLoggingLevel {
            level: 0,
            duration: Some(DurationInfo {
                nanoseconds: 60_000_000_000,
            }),
        });
        let json = serde_json::to_value(call.into_wire()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "SET_LOGGING_LEVEL",
                "set_logging_level": {"level": 0, "duration": {"nanoseconds": 60_000_000_000i64}}
            })
        );
    }

    #[test]
    fn test_mark_agent_gone_protobuf() {
        let call = Call::MarkAgentGone(call::MarkAgentGone {
            agent_id: Some(AgentId::new("a")),
        });
        let bytes = call.clone().into_wire().encode_to_vec();
        let decoded = Call::from_wire(WireCall::decode(bytes.as_slice()).unwrap()).unwrap();
        assert_eq!(decoded, call);
        assert_eq!(decoded.kind(), CallType::MarkAgentGone);
    }

    #[test]
    fn test_health_response_decodes() {
        let wire: WireResponse =
            serde_json::from_str(r#"{"type":"GET_HEALTH","get_health":{"healthy":true}}"#).unwrap();
        let response = Response::from_wire(wire).unwrap();
        assert_eq!(
            response,
            Response::GetHealth(common_response::GetHealth { healthy: true })
        );
    }

    #[test]
    fn test_response_with_wrong_payload_rejected() {
        let wire: WireResponse = serde_json::from_str(
            r#"{"type":"GET_HEALTH","get_health":{"healthy":true},"get_flags":{"flags":[]}}"#,
        )
        .unwrap();
        assert_eq!(
            Response::from_wire(wire),
            Err(UnionError::UnexpectedPayload {
                union: "Response",
                kind: "GET_HEALTH"
            })
        );
    }

    #[test]
    fn test_response_missing_payload_rejected() {
        let wire: WireResponse = serde_json::from_str(r#"{"type":"GET_STATE"}"#).unwrap();
        assert!(matches!(
            Response::from_wire(wire),
            Err(UnionError::MissingPayload { kind: "GET_STATE", .. })
        ));
    }

    #[test]
    fn test_task_updated_event() {
        let wire: WireEvent = serde_json::from_str(
            r#"{
                "type": "TASK_UPDATED",
                "task_updated": {
                    "framework_id": {"value": "fw-1"},
                    "status": {"task_id": {"value": "t-1"}, "state": "TASK_FAILED"},
                    "state": "TASK_FAILED"
                }
            }"#,
        )
        .unwrap();
        match Event::from_wire(wire).unwrap() {
            Event::TaskUpdated(update) => {
                assert_eq!(update.state(), TaskState::Failed);
                assert_eq!(update.framework_id.unwrap().value, "fw-1");
            }
            other => panic!("unexpected event {:?}", other.kind()),
        }
    }

    #[test]
    fn test_heartbeat_event() {
        let wire: WireEvent = serde_json::from_str(r#"{"type":"HEARTBEAT"}"#).unwrap();
        assert_eq!(Event::from_wire(wire).unwrap(), Event::Heartbeat);
    }

    #[test]
    fn test_newer_event_type_is_unknown() {
        let wire: WireEvent =
            serde_json::from_str(r#"{"type":"OPERATION_UPDATED","operation_updated":{}}"#).unwrap();
        assert!(matches!(
            Event::from_wire(wire),
            Err(UnionError::UnknownType { value: 0, .. })
        ));
    }
}
