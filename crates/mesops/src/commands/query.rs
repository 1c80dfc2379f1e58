//! Read-only queries.

use std::time::Duration;

use mesops_client::CallContext;

use super::{print_json, Operator};

pub async fn health(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    let health = operator.api().get_health(ctx).await?;
    if health.healthy {
        println!("healthy");
        Ok(())
    } else {
        anyhow::bail!("unhealthy")
    }
}

pub async fn version(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    let version = operator.api().get_version(ctx).await?;
    print_json(&version.version_info)
}

/// Prints flags as `name=value` lines.
pub async fn flags(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    let response = operator.api().get_flags(ctx).await?;
    for flag in response.flags {
        match flag.value {
            Some(value) => println!("{}={}", flag.name, value),
            None => println!("{}", flag.name),
        }
    }
    Ok(())
}

/// Prints metrics as `name value` lines.
pub async fn metrics(
    operator: &Operator,
    ctx: &CallContext,
    snapshot_timeout: Option<Duration>,
) -> anyhow::Result<()> {
    let response = operator.api().get_metrics(ctx, snapshot_timeout).await?;
    for metric in response.metrics {
        match metric.value {
            Some(value) => println!("{} {}", metric.name, value),
            None => println!("{}", metric.name),
        }
    }
    Ok(())
}

pub async fn state(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    match operator {
        Operator::Master(master) => print_json(&master.get_state(ctx).await?),
        Operator::Agent(agent) => print_json(&agent.get_state(ctx).await?),
    }
}

pub async fn tasks(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    match operator {
        Operator::Master(master) => print_json(&master.get_tasks(ctx).await?),
        Operator::Agent(agent) => print_json(&agent.get_tasks(ctx).await?),
    }
}

pub async fn frameworks(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    match operator {
        Operator::Master(master) => print_json(&master.get_frameworks(ctx).await?),
        Operator::Agent(agent) => print_json(&agent.get_frameworks(ctx).await?),
    }
}

pub async fn agents(operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    let master = operator.master("agents")?;
    print_json(&master.get_agents(ctx).await?)
}

pub async fn containers(
    operator: &Operator,
    ctx: &CallContext,
    show_nested: bool,
    show_standalone: bool,
) -> anyhow::Result<()> {
    let agent = operator.agent("containers")?;
    let response = agent
        .get_containers(ctx, show_nested, show_standalone)
        .await?;
    print_json(&response)
}
