//! Master event subscription.

use futures::StreamExt;
use mesops_client::{CallContext, ClientError};
use mesops_proto::OperatorUnion;

use super::Operator;

/// Prints events as JSON lines until interrupted, timed out, or `limit`
/// events have been printed.
pub async fn subscribe(
    operator: &Operator,
    ctx: &CallContext,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let master = operator.master("subscribe")?;

    let interrupt = ctx.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let result = print_events(master, ctx, limit).await;
    watcher.abort();
    result
}

async fn print_events(
    master: &mesops_client::MasterClient,
    ctx: &CallContext,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut events = master.subscribe(ctx).await?;
    let mut printed = 0usize;

    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                tracing::debug!(kind = ?event.kind(), "Received event");
                println!("{}", serde_json::to_string(&event.into_wire())?);
                printed += 1;
                if limit.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            Err(ClientError::Cancelled) | Err(ClientError::TimedOut(_)) => {
                tracing::info!(events = printed, "Subscription ended");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
