//! Response payloads returned by both masters and agents.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::mesos::{FileInfo, Flag, Metric, VersionInfo};
use crate::serde_helpers::base64_bytes;

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetHealth {
    #[prost(bool, required, tag = "1")]
    pub healthy: bool,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFlags {
    #[prost(message, repeated, tag = "1")]
    pub flags: Vec<Flag>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetVersion {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_info: Option<VersionInfo>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetMetrics {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetLoggingLevel {
    #[prost(uint32, required, tag = "1")]
    pub level: u32,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFiles {
    #[prost(message, repeated, tag = "1")]
    pub file_infos: Vec<FileInfo>,
}

/// A chunk of a sandbox file and the file's total size.
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadFile {
    #[prost(uint64, required, tag = "1")]
    pub size: u64,
    #[prost(bytes = "vec", required, tag = "2")]
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_data_is_base64() {
        let chunk: ReadFile = serde_json::from_str(r#"{"size":5,"data":"aGVsbG8="}"#).unwrap();
        assert_eq!(chunk.size, 5);
        assert_eq!(chunk.data, b"hello");
    }

    #[test]
    fn test_flags_tolerate_missing_list() {
        let flags: GetFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.flags.is_empty());
    }
}
