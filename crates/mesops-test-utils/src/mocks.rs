//! A mock Operator API endpoint on top of `wiremock`.

use std::time::Duration;

use mesops_proto::{OperatorUnion, ProtoEnum};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use crate::builders::{json_body, json_stream, protobuf_body, protobuf_stream};

/// Path every call is posted to.
pub const API_PATH: &str = "/api/v1";

/// Matches calls of one type, JSON or protobuf encoded.
///
/// JSON bodies match on their `type` field, protobuf bodies on field 1.
#[derive(Debug, Clone)]
pub struct CallMatcher {
    name: &'static str,
    value: i32,
}

impl CallMatcher {
    pub fn new<K: ProtoEnum>(kind: K) -> Self {
        Self {
            name: kind.as_str_name(),
            value: kind.into(),
        }
    }
}

impl Match for CallMatcher {
    fn matches(&self, request: &Request) -> bool {
        if let Ok(json) = serde_json::from_slice::<serde_json::Value>(&request.body) {
            return match json.get("type") {
                Some(serde_json::Value::String(name)) => name == self.name,
                Some(serde_json::Value::Number(n)) => n.as_i64() == Some(i64::from(self.value)),
                _ => false,
            };
        }
        protobuf_type(&request.body) == Some(self.value)
    }
}

/// Reads the leading `type` varint of a protobuf call.
fn protobuf_type(body: &[u8]) -> Option<i32> {
    let (&key, rest) = body.split_first()?;
    // Field 1, wire type varint.
    if key != 0x08 {
        return None;
    }

    let mut value: u64 = 0;
    for (i, byte) in rest.iter().take(10).enumerate() {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return i32::try_from(value).ok();
        }
    }
    None
}

/// Value of a request header, matched case-insensitively.
pub fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .iter()
        .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
        .map(|(_, values)| values.last().as_str().to_string())
}

/// URL of a local port nothing listens on.
///
/// Dropped `MockServer`s go back to a pool and keep listening, so they
/// cannot stand in for an unreachable server.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// A mock master or agent.
///
/// # Example
///
/// ```rust,no_run
/// use mesops_proto::master::CallType;
/// use mesops_test_utils::{fixtures, MockOperator};
///
/// # async fn demo() {
/// let operator = MockOperator::start().await;
/// operator.respond_json(CallType::GetHealth, fixtures::health(true)).await;
/// // Point a client at operator.uri() ...
/// # }
/// ```
pub struct MockOperator {
    server: MockServer,
}

impl MockOperator {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL, without the API path.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    fn call<K: ProtoEnum>(&self, kind: K) -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(CallMatcher::new(kind))
    }

    async fn mount(&self, mock: Mock) {
        mock.mount(&self.server).await;
    }

    /// Answers calls of `kind` with `response` as JSON.
    pub async fn respond_json<K: ProtoEnum, R: OperatorUnion>(&self, kind: K, response: R) {
        let template = ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_bytes(json_body(response));
        self.mount(self.call(kind).respond_with(template)).await;
    }

    /// Answers calls of `kind` with `response` as protobuf.
    pub async fn respond_protobuf<K: ProtoEnum, R: OperatorUnion>(&self, kind: K, response: R) {
        let template = ResponseTemplate::new(200)
            .insert_header("content-type", "application/x-protobuf")
            .set_body_bytes(protobuf_body(response));
        self.mount(self.call(kind).respond_with(template)).await;
    }

    /// Answers calls of `kind` with `200 OK` and no body, exactly `times` times.
    pub async fn accept<K: ProtoEnum>(&self, kind: K, times: u64) {
        self.mount(
            self.call(kind)
                .respond_with(ResponseTemplate::new(200))
                .expect(times),
        )
        .await;
    }

    /// Answers calls of `kind` with `status`, exactly `times` times.
    pub async fn fail<K: ProtoEnum>(&self, kind: K, status: u16, message: &str, times: u64) {
        self.mount(
            self.call(kind)
                .respond_with(ResponseTemplate::new(status).set_body_string(message))
                .expect(times),
        )
        .await;
    }

    /// Answers calls of `kind` with `response` after `delay`.
    pub async fn respond_json_delayed<K: ProtoEnum, R: OperatorUnion>(
        &self,
        kind: K,
        response: R,
        delay: Duration,
    ) {
        let template = ResponseTemplate::new(200)
            .set_body_bytes(json_body(response))
            .set_delay(delay);
        self.mount(self.call(kind).respond_with(template)).await;
    }

    /// Answers calls of `kind` with a RecordIO stream of JSON messages.
    pub async fn stream_json<K: ProtoEnum, U: OperatorUnion>(&self, kind: K, messages: Vec<U>) {
        let template = ResponseTemplate::new(200)
            .insert_header("content-type", "application/recordio")
            .set_body_bytes(json_stream(messages));
        self.mount(self.call(kind).respond_with(template)).await;
    }

    /// Answers calls of `kind` with a RecordIO stream of protobuf messages.
    pub async fn stream_protobuf<K: ProtoEnum, U: OperatorUnion>(&self, kind: K, messages: Vec<U>) {
        let template = ResponseTemplate::new(200)
            .insert_header("content-type", "application/recordio")
            .set_body_bytes(protobuf_stream(messages));
        self.mount(self.call(kind).respond_with(template)).await;
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Panics unless every mock with an `expect` saw its call count.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protobuf_type() {
        assert_eq!(protobuf_type(&[0x08, 0x01]), Some(1));
        assert_eq!(protobuf_type(&[0x08, 0x96, 0x01]), Some(150));
        assert_eq!(protobuf_type(&[0x12, 0x00]), None);
        assert_eq!(protobuf_type(&[]), None);
        assert_eq!(protobuf_type(&[0x08, 0x80]), None);
    }
}
