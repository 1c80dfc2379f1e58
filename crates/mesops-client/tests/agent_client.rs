//! Agent client against a mock Operator API endpoint.

use futures::{stream, TryStreamExt};
use mesops_client::proto::agent::process_io::{Data, DataType};
use mesops_client::proto::agent::{response, CallType, ProcessIo, Response};
use mesops_client::proto::mesos::{ContainerId, TaskState};
use mesops_client::recordio::decode_all;
use mesops_client::{AgentClient, CallContext, ClientBuilder, OperatorApi};
use mesops_test_utils::{fixtures, header_value, MockOperator};
use wiremock::matchers::{header, method};
use wiremock::{Mock, ResponseTemplate};

fn agent(operator: &MockOperator) -> AgentClient {
    ClientBuilder::new(operator.uri())
        .max_retries(1)
        .build()
        .unwrap()
        .into()
}

#[tokio::test]
async fn test_get_health() {
    let operator = MockOperator::start().await;
    let response = Response::GetHealth(mesops_client::proto::response::GetHealth { healthy: true });
    operator.respond_json(CallType::GetHealth, response).await;

    assert!(agent(&operator).get_health(&CallContext::new()).await.unwrap().healthy);
}

#[tokio::test]
async fn test_get_flags_shared_payload() {
    let operator = MockOperator::start().await;
    // Shared payloads encode the same for masters and agents.
    let flags = fixtures::flags(&[("work_dir", "/var/lib/mesos")]);
    operator.respond_json(CallType::GetFlags, flags).await;

    let flags = agent(&operator).get_flags(&CallContext::new()).await.unwrap();
    assert_eq!(flags.flags[0].name, "work_dir");
    assert_eq!(flags.flags[0].value.as_deref(), Some("/var/lib/mesos"));
}

#[tokio::test]
async fn test_get_containers_sends_filters() {
    let operator = MockOperator::start().await;
    let response = Response::GetContainers(response::GetContainers {
        containers: vec![response::Container {
            container_id: Some(ContainerId::new("c-1")),
            executor_name: Some("command executor".to_string()),
            ..Default::default()
        }],
    });
    operator.respond_json(CallType::GetContainers, response).await;

    let containers = agent(&operator)
        .get_containers(&CallContext::new(), true, false)
        .await
        .unwrap();
    assert_eq!(containers.containers.len(), 1);
    assert_eq!(
        containers.containers[0].container_id.as_ref().unwrap().value,
        "c-1"
    );

    let requests = operator.requests().await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "type": "GET_CONTAINERS",
            "get_containers": {"show_nested": true, "show_standalone": false}
        })
    );
}

#[tokio::test]
async fn test_wait_nested_container() {
    let operator = MockOperator::start().await;
    let response = Response::WaitNestedContainer(response::WaitNestedContainer {
        exit_status: Some(0),
        state: Some(TaskState::Finished as i32),
        message: None,
    });
    operator
        .respond_json(CallType::WaitNestedContainer, response)
        .await;

    let exit = agent(&operator)
        .wait_nested_container(&CallContext::new(), ContainerId::nested("child", ContainerId::new("parent")))
        .await
        .unwrap();
    assert_eq!(exit.exit_status, Some(0));
    assert_eq!(exit.state(), TaskState::Finished);
}

#[tokio::test]
async fn test_attach_container_output_stream() {
    let operator = MockOperator::start().await;
    let frames = vec![
        ProcessIo::Data(Data::new(DataType::Stdout, "hello\n")),
        ProcessIo::Data(Data::new(DataType::Stderr, "warning\n")),
    ];
    operator
        .stream_json(CallType::AttachContainerOutput, frames.clone())
        .await;

    let received: Vec<ProcessIo> = agent(&operator)
        .attach_container_output(&CallContext::new(), ContainerId::new("c-1"))
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(received, frames);
}

#[tokio::test]
async fn test_attach_container_input_frames() {
    let operator = MockOperator::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/recordio"))
        .and(header("message-content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(operator.server())
        .await;

    let input = stream::iter(vec![ProcessIo::stdin("ls\n"), ProcessIo::stdin("exit\n")]);
    agent(&operator)
        .attach_container_input(&CallContext::new(), ContainerId::new("c-1"), input)
        .await
        .unwrap();

    let requests = operator.requests().await;
    assert_eq!(
        header_value(&requests[0], "accept").unwrap(),
        "application/json"
    );

    let records = decode_all(&requests[0].body).unwrap();
    let records: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::from_slice(r).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0],
        serde_json::json!({
            "type": "ATTACH_CONTAINER_INPUT",
            "attach_container_input": {"type": "CONTAINER_ID", "container_id": {"value": "c-1"}}
        })
    );
    assert_eq!(
        records[1]["attach_container_input"]["process_io"],
        serde_json::json!({"type": "DATA", "data": {"type": "STDIN", "data": "bHMK"}})
    );
    assert_eq!(
        records[2]["attach_container_input"]["process_io"]["data"]["data"],
        "ZXhpdAo="
    );
    operator.verify().await;
}

#[tokio::test]
async fn test_attach_container_input_not_retried() {
    let operator = MockOperator::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("attach failed"))
        .expect(1)
        .mount(operator.server())
        .await;

    let client: AgentClient = ClientBuilder::new(operator.uri())
        .max_retries(5)
        .build()
        .unwrap()
        .into();
    let err = client
        .attach_container_input(
            &CallContext::new(),
            ContainerId::new("c-1"),
            stream::iter(vec![ProcessIo::stdin("ls\n")]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    operator.verify().await;
}

#[tokio::test]
async fn test_remove_resource_provider_config() {
    let operator = MockOperator::start().await;
    operator
        .accept(CallType::RemoveResourceProviderConfig, 1)
        .await;

    agent(&operator)
        .remove_resource_provider_config(&CallContext::new(), "org.apache.mesos.rp.local.storage", "lvm")
        .await
        .unwrap();

    let requests = operator.requests().await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["remove_resource_provider_config"],
        serde_json::json!({"type": "org.apache.mesos.rp.local.storage", "name": "lvm"})
    );
    operator.verify().await;
}
