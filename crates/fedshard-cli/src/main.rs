use anyhow::Context;
use clap::{Parser, Subcommand};
use fedshard_azure::SqlAzureShardManager;
use fedshard_core::{Connection, ConnectionParams, DataValue, MemoryConnection};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Prints the federation control statements a shard switch would issue.
#[derive(Debug, Parser)]
#[command(name = "fedshard", version)]
struct Cli {
    /// TOML file holding the connection parameters and `[sharding]` block.
    #[arg(long, default_value = "fedshard.example.toml")]
    config: String,
    /// Force `FILTERING = ON` regardless of the config.
    #[arg(long)]
    filtering: bool,
    /// Pretend the connection is inside a transaction.
    #[arg(long)]
    in_transaction: bool,
    #[arg(long, short)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Switch to the federation root.
    Global,
    /// Switch to the member holding VALUE.
    Shard { value: String },
    /// Split the member holding VALUE at VALUE.
    Split { value: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let params = ConnectionParams::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config))?;
    for statement in run(&cli, params)? {
        println!("{statement}");
    }
    Ok(())
}

fn run(cli: &Cli, params: ConnectionParams) -> anyhow::Result<Vec<String>> {
    let mut conn = MemoryConnection::new(params);
    conn.set_transaction_active(cli.in_transaction);

    let mut manager = SqlAzureShardManager::new(&mut conn)?;
    if cli.filtering {
        manager.set_filtering_enabled(true);
    }
    info!(
        database = manager.connection().params().dbname.as_deref().unwrap_or("-"),
        federation = manager.federation_name(),
        command = ?cli.command,
        "dry run"
    );
    match &cli.command {
        Command::Global => manager.select_global()?,
        Command::Shard { value } => manager.select_shard(DataValue::String(value.clone()))?,
        Command::Split { value } => manager.split_federation(DataValue::String(value.clone()))?,
    }
    drop(manager);
    Ok(conn.executed().to_vec())
}
