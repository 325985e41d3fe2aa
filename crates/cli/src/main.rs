//! `kpu` -- command-line harness for the KPU utility nodes.
//!
//! Lists the registered nodes, prints their host schemas (including
//! schemas that depend on other inputs), and runs a node on JSON inputs.
//!
//! # Environment variables
//!
//! | Variable          | Required | Default    | Description                         |
//! |-------------------|----------|------------|-------------------------------------|
//! | `KPU_OUTPUT_DIR`  | no       | `.`        | Where native image outputs are saved |
//! | `KPU_PRETTY_JSON` | no       | `true`     | Pretty-print JSON on stdout         |
//! | `RUST_LOG`        | no       | `kpu=info` | Tracing filter                      |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kpu_cli::commands;
use kpu_cli::config::CliConfig;
use kpu_cli::convert::read_inputs_arg;
use kpu_nodes::NodeRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kpu", version, about = "Inspect and run KPU utility nodes")]
struct Cli {
    /// Directory for native image outputs (overrides `KPU_OUTPUT_DIR`).
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Emit compact JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered nodes.
    List,
    /// Print a node's input/output schema.
    Schema {
        node: String,
        /// Inputs used to compute a dynamic schema (JSON or `@file`).
        #[arg(long)]
        inputs: Option<String>,
    },
    /// Run a node.
    Run {
        node: String,
        /// Input values (JSON or `@file`).
        #[arg(long, default_value = "{}")]
        inputs: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kpu=info,kpu_cli=info,kpu_nodes=info,kpu_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env();
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.compact {
        config.pretty = false;
    }

    let registry = NodeRegistry::register_nodes();
    tracing::debug!(nodes = registry.len(), "Nodes registered");

    let base_dir = std::env::current_dir().context("Cannot determine working directory")?;

    let output = match cli.command {
        Command::List => commands::list(&registry),
        Command::Schema { node, inputs } => {
            let inputs = inputs.as_deref().map(read_inputs_arg).transpose()?;
            commands::schema(&registry, &node, inputs.as_ref(), &base_dir)?
        }
        Command::Run { node, inputs } => {
            let inputs = read_inputs_arg(&inputs)?;
            commands::run(&registry, &config, &node, &inputs, &base_dir)?
        }
    };

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
