//! mesops - command line client for the Mesos Operator HTTP API.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mesops_client::{CallContext, Encoding};

mod commands;
mod config;
mod logging;

use commands::Operator;
use config::{CliConfig, Role};
use logging::init_logging;

#[derive(Parser)]
#[command(name = "mesops")]
#[command(author, version, about = "Query Mesos masters and agents over the Operator API", long_about = None)]
struct Cli {
    /// Master or agent URL, e.g. http://127.0.0.1:5050
    #[arg(long, global = true)]
    url: Option<String>,

    /// Whether the URL points at a master or an agent
    #[arg(long, global = true, value_enum)]
    role: Option<Role>,

    /// Maximum retries after transport failures
    #[arg(long, global = true)]
    retries: Option<u32>,

    /// Wire encoding (json or protobuf)
    #[arg(long, global = true, value_parser = parse_encoding)]
    encoding: Option<Encoding>,

    /// Deadline for the whole command, in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the server is healthy
    Health,
    /// Show the server's version
    Version,
    /// List the server's flags
    Flags,
    /// Show a metrics snapshot
    Metrics {
        /// How long the server may spend collecting metrics, in seconds
        #[arg(long)]
        snapshot_timeout: Option<u64>,
    },
    /// Dump the full state
    State,
    /// List agents (master only)
    Agents,
    /// List containers (agent only)
    Containers {
        /// Include nested containers
        #[arg(long)]
        nested: bool,
        /// Include standalone containers
        #[arg(long)]
        standalone: bool,
    },
    /// List tasks
    Tasks,
    /// List frameworks
    Frameworks,
    /// Print master events as JSON lines until interrupted (master only)
    Subscribe {
        /// Stop after this many events
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List a sandbox directory
    ListFiles {
        /// Virtual path of the directory
        path: String,
    },
    /// Print a chunk of a sandbox file
    ReadFile {
        /// Virtual path of the file
        path: String,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: u64,
        /// Maximum number of bytes to read
        #[arg(long)]
        length: Option<u64>,
    },
    /// Show the effective configuration and where it was loaded from
    Config,
}

fn parse_encoding(value: &str) -> Result<Encoding, String> {
    value.parse().map_err(|e: mesops_client::ClientError| e.to_string())
}

impl Cli {
    /// Flags set on the command line, as a config layer.
    fn overrides(&self) -> CliConfig {
        CliConfig {
            url: self.url.clone(),
            role: self.role,
            max_retries: self.retries,
            encoding: self.encoding,
            timeout: self.timeout,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let (file_config, sources) = CliConfig::load(Some(&cwd))?;
    let config = file_config.merge(cli.overrides());

    if let Commands::Config = cli.command {
        return show_config(&config, &sources);
    }

    let operator = Operator::connect(&config)?;
    let ctx = match config.deadline() {
        Some(deadline) => CallContext::with_timeout(deadline),
        None => CallContext::new(),
    };

    run(cli.command, &operator, &ctx).await
}

async fn run(command: Commands, operator: &Operator, ctx: &CallContext) -> anyhow::Result<()> {
    match command {
        Commands::Health => commands::health(operator, ctx).await,
        Commands::Version => commands::version(operator, ctx).await,
        Commands::Flags => commands::flags(operator, ctx).await,
        Commands::Metrics { snapshot_timeout } => {
            commands::metrics(operator, ctx, snapshot_timeout.map(Duration::from_secs)).await
        }
        Commands::State => commands::state(operator, ctx).await,
        Commands::Agents => commands::agents(operator, ctx).await,
        Commands::Containers { nested, standalone } => {
            commands::containers(operator, ctx, nested, standalone).await
        }
        Commands::Tasks => commands::tasks(operator, ctx).await,
        Commands::Frameworks => commands::frameworks(operator, ctx).await,
        Commands::Subscribe { limit } => commands::subscribe(operator, ctx, limit).await,
        Commands::ListFiles { path } => commands::list_files(operator, ctx, &path).await,
        Commands::ReadFile {
            path,
            offset,
            length,
        } => commands::read_file(operator, ctx, &path, offset, length).await,
        Commands::Config => Ok(()),
    }
}

fn show_config(config: &CliConfig, sources: &[PathBuf]) -> anyhow::Result<()> {
    println!("Configuration sources:");
    if sources.is_empty() {
        println!("  (none)");
    } else {
        for source in sources {
            println!("  {}", source.display());
        }
    }
    println!();

    println!("Current configuration:");
    println!("{}", serde_json::to_string_pretty(config)?);
    println!();

    let client = config.client_builder().config()?;
    println!("Endpoint: {} ({})", client.url, config.role());
    println!("Encoding: {}", client.encoding);
    println!("Max retries: {}", client.max_retries);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_file_config() {
        let cli = Cli::parse_from([
            "mesops",
            "--url",
            "http://agent-3:5051",
            "--role",
            "agent",
            "--encoding",
            "protobuf",
            "--retries",
            "2",
            "containers",
            "--nested",
        ]);
        let file = CliConfig {
            url: Some("http://leader:5050".to_string()),
            timeout: Some(30),
            ..Default::default()
        };

        let config = file.merge(cli.overrides());
        assert_eq!(config.url(), "http://agent-3:5051");
        assert_eq!(config.role(), Role::Agent);
        assert_eq!(config.encoding, Some(Encoding::Protobuf));
        assert_eq!(config.max_retries, Some(2));
        assert_eq!(config.timeout, Some(30));
        assert!(matches!(
            cli.command,
            Commands::Containers {
                nested: true,
                standalone: false
            }
        ));
    }

    #[test]
    fn test_invalid_encoding_rejected() {
        assert!(Cli::try_parse_from(["mesops", "--encoding", "xml", "health"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mesops", "read-file", "/var/log/syslog", "--offset", "10", "--timeout", "5"]);
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(
            cli.command,
            Commands::ReadFile { offset: 10, length: None, .. }
        ));
    }
}
