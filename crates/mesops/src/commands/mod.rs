//! Subcommand implementations.

mod files;
mod query;
mod subscribe;

pub use files::{list_files, read_file};
pub use query::{agents, containers, flags, frameworks, health, metrics, state, tasks, version};
pub use subscribe::subscribe;

use anyhow::bail;
use mesops_client::{AgentClient, MasterClient, OperatorApi};
use serde::Serialize;

use crate::config::{CliConfig, Role};

/// A master or agent client, chosen by `--role`.
pub enum Operator {
    Master(MasterClient),
    Agent(AgentClient),
}

impl Operator {
    pub fn connect(config: &CliConfig) -> anyhow::Result<Self> {
        let client = config.client_builder().build()?;
        tracing::debug!(
            url = %client.config().url,
            role = %config.role(),
            encoding = %client.encoding(),
            "Connecting"
        );

        Ok(match config.role() {
            Role::Master => Operator::Master(client.into()),
            Role::Agent => Operator::Agent(client.into()),
        })
    }

    /// Calls available on both roles.
    pub fn api(&self) -> &dyn OperatorApi {
        match self {
            Operator::Master(master) => master,
            Operator::Agent(agent) => agent,
        }
    }

    pub fn master(&self, command: &str) -> anyhow::Result<&MasterClient> {
        match self {
            Operator::Master(master) => Ok(master),
            Operator::Agent(_) => bail!("`{command}` is only available with --role master"),
        }
    }

    pub fn agent(&self, command: &str) -> anyhow::Result<&AgentClient> {
        match self {
            Operator::Agent(agent) => Ok(agent),
            Operator::Master(_) => bail!("`{command}` is only available with --role agent"),
        }
    }
}

/// Print a response as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
