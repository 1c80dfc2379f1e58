//! Agent Operator API: calls, responses and container I/O.

use crate::{call as common_call, response as common_response};

/// Call payloads only agents accept.
pub mod call {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use super::{ProcessIo, WireProcessIo};
    use crate::mesos::{CommandInfo, ContainerId, ContainerInfo, Image, Resource, ResourceProviderInfo};
    use crate::union::OperatorUnion;

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetContainers {
        #[prost(bool, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub show_nested: Option<bool>,
        #[prost(bool, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub show_standalone: Option<bool>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LaunchNestedContainer {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub command: Option<CommandInfo>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container: Option<ContainerInfo>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct WaitNestedContainer {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct KillNestedContainer {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        /// Defaults to SIGKILL on the agent.
        #[prost(int32, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub signal: Option<i32>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct RemoveNestedContainer {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
    }

    /// Launches a nested container whose lifetime is tied to the connection.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LaunchNestedContainerSession {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub command: Option<CommandInfo>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container: Option<ContainerInfo>,
    }

    proto_enum! {
        pub enum AttachContainerInputType (attach_container_input_type) {
            Unknown = 0 => "UNKNOWN",
            ContainerId = 1 => "CONTAINER_ID",
            ProcessIo = 2 => "PROCESS_IO",
        }
    }

    /// One frame of an input attach stream.
    ///
    /// The first frame names the container; every later frame carries
    /// process I/O.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AttachContainerInput {
        #[prost(enumeration = "AttachContainerInputType", required, tag = "1")]
        #[serde(rename = "type", with = "attach_container_input_type")]
        pub r#type: i32,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub process_io: Option<WireProcessIo>,
    }

    impl AttachContainerInput {
        pub fn for_container(container_id: ContainerId) -> Self {
            Self {
                r#type: AttachContainerInputType::ContainerId as i32,
                container_id: Some(container_id),
                process_io: None,
            }
        }

        pub fn with_process_io(process_io: ProcessIo) -> Self {
            Self {
                r#type: AttachContainerInputType::ProcessIo as i32,
                container_id: None,
                process_io: Some(process_io.into_wire()),
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AttachContainerOutput {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
    }

    /// Launches a standalone or nested container.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LaunchContainer {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub command: Option<CommandInfo>,
        #[prost(message, repeated, tag = "3")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub resources: Vec<Resource>,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container: Option<ContainerInfo>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AddResourceProviderConfig {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub info: Option<ResourceProviderInfo>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UpdateResourceProviderConfig {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub info: Option<ResourceProviderInfo>,
    }

    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct RemoveResourceProviderConfig {
        #[prost(string, required, tag = "1")]
        #[serde(rename = "type")]
        pub r#type: String,
        #[prost(string, required, tag = "2")]
        pub name: String,
    }

    /// Garbage-collects container images, keeping `excluded_images`.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PruneImages {
        #[prost(message, repeated, tag = "1")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub excluded_images: Vec<Image>,
    }
}

/// Response payloads only agents return.
pub mod response {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use crate::mesos::{
        task_state, AgentInfo, ContainerId, ContainerStatus, ExecutorId, ExecutorInfo,
        FrameworkId, FrameworkInfo, ResourceStatistics, Task, TaskState,
    };

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
    }

    /// A container running on the agent.
    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Container {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_id: Option<FrameworkId>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub executor_id: Option<ExecutorId>,
        #[prost(string, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub executor_name: Option<String>,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_id: Option<ContainerId>,
        #[prost(message, optional, tag = "5")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub container_status: Option<ContainerStatus>,
        #[prost(message, optional, tag = "6")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub resource_statistics: Option<ResourceStatistics>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetContainers {
        #[prost(message, repeated, tag = "1")]
        pub containers: Vec<Container>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Framework {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub framework_info: Option<FrameworkInfo>,
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
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetExecutors {
        #[prost(message, repeated, tag = "1")]
        pub executors: Vec<Executor>,
        #[prost(message, repeated, tag = "2")]
        pub completed_executors: Vec<Executor>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetTasks {
        #[prost(message, repeated, tag = "1")]
        pub pending_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "2")]
        pub queued_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "3")]
        pub launched_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "4")]
        pub terminated_tasks: Vec<Task>,
        #[prost(message, repeated, tag = "5")]
        pub completed_tasks: Vec<Task>,
    }

    #[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GetAgent {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub agent_info: Option<AgentInfo>,
    }

    /// Exit information of a nested container.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct WaitNestedContainer {
        /// Raw wait(2) status.
        #[prost(int32, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub exit_status: Option<i32>,
        #[prost(enumeration = "TaskState", optional, tag = "2")]
        #[serde(
            skip_serializing_if = "Option::is_none",
            with = "optional_task_state"
        )]
        pub state: Option<i32>,
        #[prost(string, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
    }

    mod optional_task_state {
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::mesos::TaskState;
        use crate::serde_helpers::EnumRepr;

        pub fn serialize<S: Serializer>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::task_state::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
            Ok(Option::<EnumRepr>::deserialize(deserializer)?.map(|raw| raw.resolve::<TaskState>()))
        }
    }
}

/// Payloads of a [`ProcessIo`] frame.
pub mod process_io {
    use prost::Message;
    use serde::{Deserialize, Serialize};

    use crate::mesos::{DurationInfo, TtyInfo};
    use crate::serde_helpers::base64_bytes;

    proto_enum! {
        pub enum DataType (data_type) {
            Unknown = 0 => "UNKNOWN",
            Stdin = 1 => "STDIN",
            Stdout = 2 => "STDOUT",
            Stderr = 3 => "STDERR",
        }
    }

    /// Bytes read from or written to one of the standard streams.
    #[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Data {
        #[prost(enumeration = "DataType", required, tag = "1")]
        #[serde(rename = "type", with = "data_type")]
        pub r#type: i32,
        #[prost(bytes = "vec", required, tag = "2")]
        #[serde(with = "base64_bytes")]
        pub data: Vec<u8>,
    }

    impl Data {
        pub fn new(stream: DataType, data: impl Into<Vec<u8>>) -> Self {
            Self {
                r#type: stream as i32,
                data: data.into(),
            }
        }
    }

    proto_enum! {
        pub enum ControlType (control_type) {
            Unknown = 0 => "UNKNOWN",
            TtyInfo = 1 => "TTY_INFO",
            Heartbeat = 2 => "HEARTBEAT",
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Heartbeat {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub interval: Option<DurationInfo>,
    }

    /// Terminal resizes and keep-alives.
    #[derive(Clone, Copy, PartialEq, Eq, Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Control {
        #[prost(enumeration = "ControlType", required, tag = "1")]
        #[serde(rename = "type", with = "control_type")]
        pub r#type: i32,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tty_info: Option<TtyInfo>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub heartbeat: Option<Heartbeat>,
    }

    impl Control {
        pub fn heartbeat(interval: std::time::Duration) -> Self {
            Self {
                r#type: ControlType::Heartbeat as i32,
                tty_info: None,
                heartbeat: Some(Heartbeat {
                    interval: Some(interval.into()),
                }),
            }
        }
    }
}

tagged_union! {
    /// A frame of container I/O.
    pub enum ProcessIo { kind: ProcessIoType, wire: WireProcessIo }
    Data = 1 => "DATA" { data: process_io::Data = "2" };
    Control = 2 => "CONTROL" { control: process_io::Control = "3" };
}

impl ProcessIo {
    /// Bytes for the container's standard input.
    pub fn stdin(data: impl Into<Vec<u8>>) -> Self {
        ProcessIo::Data(process_io::Data::new(process_io::DataType::Stdin, data))
    }
}

tagged_union! {
    /// A call to an agent.
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
    GetContainers = 10 => "GET_CONTAINERS" { get_containers: call::GetContainers = "20" };
    GetFrameworks = 11 => "GET_FRAMEWORKS";
    GetExecutors = 12 => "GET_EXECUTORS";
    GetTasks = 13 => "GET_TASKS";
    LaunchNestedContainer = 14 => "LAUNCH_NESTED_CONTAINER" {
        launch_nested_container: call::LaunchNestedContainer = "6"
    };
    WaitNestedContainer = 15 => "WAIT_NESTED_CONTAINER" {
        wait_nested_container: call::WaitNestedContainer = "7"
    };
    KillNestedContainer = 16 => "KILL_NESTED_CONTAINER" {
        kill_nested_container: call::KillNestedContainer = "8"
    };
    LaunchNestedContainerSession = 17 => "LAUNCH_NESTED_CONTAINER_SESSION" {
        launch_nested_container_session: call::LaunchNestedContainerSession = "9"
    };
    AttachContainerInput = 18 => "ATTACH_CONTAINER_INPUT" {
        attach_container_input: call::AttachContainerInput = "10"
    };
    AttachContainerOutput = 19 => "ATTACH_CONTAINER_OUTPUT" {
        attach_container_output: call::AttachContainerOutput = "11"
    };
    GetAgent = 20 => "GET_AGENT";
    RemoveNestedContainer = 21 => "REMOVE_NESTED_CONTAINER" {
        remove_nested_container: call::RemoveNestedContainer = "12"
    };
    LaunchContainer = 22 => "LAUNCH_CONTAINER" { launch_container: call::LaunchContainer = "13" };
    AddResourceProviderConfig = 27 => "ADD_RESOURCE_PROVIDER_CONFIG" {
        add_resource_provider_config: call::AddResourceProviderConfig = "17"
    };
    UpdateResourceProviderConfig = 28 => "UPDATE_RESOURCE_PROVIDER_CONFIG" {
        update_resource_provider_config: call::UpdateResourceProviderConfig = "18"
    };
    RemoveResourceProviderConfig = 29 => "REMOVE_RESOURCE_PROVIDER_CONFIG" {
        remove_resource_provider_config: call::RemoveResourceProviderConfig = "19"
    };
    PruneImages = 30 => "PRUNE_IMAGES" { prune_images: call::PruneImages = "21" };
}

tagged_union! {
    /// A response from an agent.
    pub enum Response { kind: ResponseType, wire: WireResponse }
    GetHealth = 1 => "GET_HEALTH" { get_health: common_response::GetHealth = "2" };
    GetFlags = 2 => "GET_FLAGS" { get_flags: common_response::GetFlags = "3" };
    GetVersion = 3 => "GET_VERSION" { get_version: common_response::GetVersion = "4" };
    GetMetrics = 4 => "GET_METRICS" { get_metrics: common_response::GetMetrics = "5" };
    GetLoggingLevel = 5 => "GET_LOGGING_LEVEL" { get_logging_level: common_response::GetLoggingLevel = "6" };
    ListFiles = 6 => "LIST_FILES" { list_files: common_response::ListFiles = "7" };
    ReadFile = 7 => "READ_FILE" { read_file: common_response::ReadFile = "8" };
    GetState = 8 => "GET_STATE" { get_state: response::GetState = "9" };
    GetContainers = 9 => "GET_CONTAINERS" { get_containers: response::GetContainers = "10" };
    GetFrameworks = 10 => "GET_FRAMEWORKS" { get_frameworks: response::GetFrameworks = "11" };
    GetExecutors = 11 => "GET_EXECUTORS" { get_executors: response::GetExecutors = "12" };
    GetTasks = 12 => "GET_TASKS" { get_tasks: response::GetTasks = "13" };
    WaitNestedContainer = 13 => "WAIT_NESTED_CONTAINER" {
        wait_nested_container: response::WaitNestedContainer = "14"
    };
    GetAgent = 14 => "GET_AGENT" { get_agent: response::GetAgent = "15" };
}
