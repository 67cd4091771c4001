use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use markup::cli::compute::parse_edit;
use markup::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for markup::AppCommand {
    fn from(cmd: Commands) -> markup::AppCommand {
        match cmd {
            Commands::Compute { price, set, json } => markup::AppCommand::Compute {
                purchase_price: price,
                edits: set,
                json,
            },
            Commands::Solve { input } => markup::AppCommand::Solve { input },
            Commands::Defaults => markup::AppCommand::Defaults,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Compute cost and sale breakdowns for a purchase price
    Compute {
        /// Purchase price of the product
        #[arg(short, long)]
        price: f64,

        /// Override a row's percentage, e.g. --set ICMS=18
        #[arg(short, long, value_name = "NAME=PERCENTAGE", value_parser = parse_edit)]
        set: Vec<(String, f64)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve a JSON pricing request
    Solve {
        /// Request file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Display the default percentage table
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => markup::cli::setup::setup(),
        Some(cmd) => markup::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
