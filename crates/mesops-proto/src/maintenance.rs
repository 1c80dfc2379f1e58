//! Maintenance schedules and quota.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::mesos::{DurationInfo, Resource, TimeInfo};

/// A machine, identified by hostname, IP or both.
#[derive(Clone, PartialEq, Eq, Hash, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineId {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl MachineId {
    pub fn new(hostname: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ip: Some(ip.into()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Unavailability {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeInfo>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationInfo>,
}

/// A set of machines and the period they will be unavailable.
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    #[prost(message, repeated, tag = "1")]
    pub machine_ids: Vec<MachineId>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailability: Option<Unavailability>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    #[prost(message, repeated, tag = "1")]
    pub windows: Vec<Window>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainingMachine {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MachineId>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStatus {
    #[prost(message, repeated, tag = "1")]
    pub draining_machines: Vec<DrainingMachine>,
    #[prost(message, repeated, tag = "2")]
    pub down_machines: Vec<MachineId>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaRequest {
    #[prost(bool, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub guarantee: Vec<Resource>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaInfo {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub guarantee: Vec<Resource>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaStatus {
    #[prost(message, repeated, tag = "1")]
    pub infos: Vec<QuotaInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_json() {
        let schedule = Schedule {
            windows: vec![Window {
                machine_ids: vec![MachineId::new("agent-1", "10.0.0.1")],
                unavailability: Some(Unavailability {
                    start: Some(TimeInfo { nanoseconds: 1 }),
                    duration: None,
                }),
            }],
        };
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"windows": [{
                "machine_ids": [{"hostname": "agent-1", "ip": "10.0.0.1"}],
                "unavailability": {"start": {"nanoseconds": 1}}
            }]})
        );
    }
}
