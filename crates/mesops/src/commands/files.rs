//! Sandbox file browsing.

use std::io::Write;

use mesops_client::CallContext;

use super::Operator;

/// Prints one `size path` line per entry.
pub async fn list_files(operator: &Operator, ctx: &CallContext, path: &str) -> anyhow::Result<()> {
    let response = operator.api().list_files(ctx, path).await?;
    for file in response.file_infos {
        println!("{:>12} {}", file.size.unwrap_or_default(), file.path);
    }
    Ok(())
}

/// Writes the requested chunk of a file to stdout as raw bytes.
pub async fn read_file(
    operator: &Operator,
    ctx: &CallContext,
    path: &str,
    offset: u64,
    length: Option<u64>,
) -> anyhow::Result<()> {
    let response = operator.api().read_file(ctx, path, offset, length).await?;
    tracing::debug!(
        path,
        size = response.size,
        read = response.data.len(),
        "Read file chunk"
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&response.data)?;
    stdout.flush()?;
    Ok(())
}
