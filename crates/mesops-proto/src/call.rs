//! Call payloads accepted by both masters and agents.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::mesos::DurationInfo;

/// Snapshot of the metrics endpoint.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetMetrics {
    /// How long the server may spend collecting metrics.
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<DurationInfo>,
}

/// Raises the glog verbosity for a limited time.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SetLoggingLevel {
    #[prost(uint32, required, tag = "1")]
    pub level: u32,
    /// The level reverts once this has elapsed.
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationInfo>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFiles {
    #[prost(string, required, tag = "1")]
    pub path: String,
}

/// Reads `length` bytes of a file from `offset`, or to the end when unset.
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadFile {
    #[prost(string, required, tag = "1")]
    pub path: String,
    #[prost(uint64, required, tag = "2")]
    pub offset: u64,
    #[prost(uint64, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}
