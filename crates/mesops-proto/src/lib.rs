//! Messages of the Mesos Operator API.
//!
//! Each role has a `Call` and a `Response` union; masters additionally stream
//! [`master::Event`]s and agents stream [`agent::ProcessIo`] frames. Unions
//! are plain Rust enums and convert to and from their wire structs through
//! [`OperatorUnion`]. Wire structs encode as protobuf (`prost`) and as the
//! JSON dialect the servers speak (`serde`).

#[macro_use]
mod union;

pub mod agent;
pub mod call;
pub mod error;
pub mod maintenance;
pub mod master;
pub mod mesos;
pub mod response;
pub mod serde_helpers;

pub use error::{UnionError, UnionResult};
pub use union::{OperatorUnion, ProtoEnum};
