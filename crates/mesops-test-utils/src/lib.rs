//! Testing utilities, fixtures, and mocks for mesops.
//!
//! - **Fixtures**: Pre-built calls, responses and events
//! - **Mocks**: A `wiremock` backed master/agent that matches on call type
//! - **Builders**: JSON, protobuf and RecordIO response bodies
//! - **IO**: Readers for partial-read testing
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use mesops_proto::master::CallType;
//! use mesops_test_utils::{fixtures, MockOperator};
//!
//! #[tokio::test]
//! async fn test_health() {
//!     let operator = MockOperator::start().await;
//!     operator.respond_json(CallType::GetHealth, fixtures::health(true)).await;
//!
//!     let master = MasterClient::new(operator.uri()).unwrap();
//!     assert!(master.get_health(&CallContext::new()).await.unwrap().healthy);
//! }
//! ```

pub mod builders;
pub mod fixtures;
pub mod io;
pub mod mocks;

pub use io::TrickleReader;
pub use mocks::{closed_port_url, header_value, CallMatcher, MockOperator};
