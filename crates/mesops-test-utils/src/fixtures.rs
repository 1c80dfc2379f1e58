//! Pre-built Operator API messages.

use mesops_proto::master::{event, response as master_response, Event, Response};
use mesops_proto::mesos::{AgentId, Flag, FrameworkId, Task, TaskId, TaskState, VersionInfo};
use mesops_proto::response;

/// `GET_HEALTH` response.
pub fn health(healthy: bool) -> Response {
    Response::GetHealth(response::GetHealth { healthy })
}

/// `GET_VERSION` response.
pub fn version(version: &str) -> Response {
    Response::GetVersion(response::GetVersion {
        version_info: Some(VersionInfo {
            version: version.to_string(),
            git_sha: Some("0123456789abcdef".to_string()),
            ..Default::default()
        }),
    })
}

/// `GET_FLAGS` response with the given name/value pairs.
pub fn flags(flags: &[(&str, &str)]) -> Response {
    Response::GetFlags(response::GetFlags {
        flags: flags
            .iter()
            .map(|(name, value)| Flag {
                name: name.to_string(),
                value: Some(value.to_string()),
            })
            .collect(),
    })
}

/// A running task on agent `agent-1` of framework `framework-1`.
pub fn task(id: &str, state: TaskState) -> Task {
    Task {
        name: format!("task {id}"),
        task_id: Some(TaskId::new(id)),
        framework_id: Some(FrameworkId::new("framework-1")),
        agent_id: Some(AgentId::new("agent-1")),
        state: state as i32,
        ..Default::default()
    }
}

/// `GET_TASKS` response listing `tasks` as active.
pub fn tasks(tasks: Vec<Task>) -> Response {
    Response::GetTasks(master_response::GetTasks {
        tasks,
        ..Default::default()
    })
}

/// First event of a subscription, with an empty state.
pub fn subscribed(heartbeat_interval_seconds: f64) -> Event {
    Event::Subscribed(event::Subscribed {
        get_state: Some(master_response::GetState::default()),
        heartbeat_interval_seconds: Some(heartbeat_interval_seconds),
    })
}

/// `TASK_ADDED` event for a staging task.
pub fn task_added(id: &str) -> Event {
    Event::TaskAdded(event::TaskAdded {
        task: Some(task(id, TaskState::Staging)),
    })
}

/// A subscription's usual opening: subscribed, one task, one heartbeat.
pub fn event_sequence() -> Vec<Event> {
    vec![subscribed(15.0), task_added("task-1"), Event::Heartbeat]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesops_proto::OperatorUnion;

    #[test]
    fn test_fixtures_are_valid_unions() {
        for message in [health(true), version("1.11.0"), flags(&[("port", "5050")])] {
            let kind = message.kind();
            let back = Response::from_wire(message.into_wire()).unwrap();
            assert_eq!(back.kind(), kind);
        }
        for event in event_sequence() {
            let kind = event.kind();
            assert_eq!(Event::from_wire(event.into_wire()).unwrap().kind(), kind);
        }
    }
}
