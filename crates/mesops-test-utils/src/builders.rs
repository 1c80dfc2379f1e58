//! Body builders for mocked Operator API responses.

use mesops_proto::OperatorUnion;
use prost::Message;

/// Frames one record as RecordIO.
pub fn frame(record: &[u8]) -> Vec<u8> {
    let mut framed = format!("{}\n", record.len()).into_bytes();
    framed.extend_from_slice(record);
    framed
}

/// Concatenates RecordIO frames for each record.
pub fn recordio_body<I, R>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    records
        .into_iter()
        .flat_map(|record| frame(record.as_ref()))
        .collect()
}

/// JSON body for a message.
pub fn json_body<U: OperatorUnion>(message: U) -> Vec<u8> {
    serde_json::to_vec(&message.into_wire()).unwrap_or_default()
}

/// Protobuf body for a message.
pub fn protobuf_body<U: OperatorUnion>(message: U) -> Vec<u8> {
    message.into_wire().encode_to_vec()
}

/// RecordIO stream of JSON encoded messages.
pub fn json_stream<U: OperatorUnion>(messages: impl IntoIterator<Item = U>) -> Vec<u8> {
    recordio_body(messages.into_iter().map(json_body))
}

/// RecordIO stream of protobuf encoded messages.
pub fn protobuf_stream<U: OperatorUnion>(messages: impl IntoIterator<Item = U>) -> Vec<u8> {
    recordio_body(messages.into_iter().map(protobuf_body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesops_proto::master::Event;

    #[test]
    fn test_recordio_body() {
        let body = recordio_body(["short", "medium"]);
        assert_eq!(body, b"5\nshort6\nmedium");
    }

    #[test]
    fn test_json_stream() {
        let body = json_stream(vec![Event::Heartbeat]);
        assert_eq!(body, b"20\n{\"type\":\"HEARTBEAT\"}");
    }

    #[test]
    fn test_protobuf_body() {
        assert_eq!(protobuf_body(Event::Heartbeat), vec![0x08, 0x09]);
    }
}
