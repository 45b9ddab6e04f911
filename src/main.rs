use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use fxroute::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the best conversion rate for one or all currencies
    Rates {
        /// Only resolve this currency
        #[arg(long)]
        currency: Option<String>,
        /// Amount of base currency to convert
        #[arg(short, long)]
        amount: Option<f64>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
        /// Read exchange rates from a JSON file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Export the best rates for all currencies as delimited text
    Export {
        /// Amount of base currency to convert
        #[arg(short, long)]
        amount: Option<f64>,
        /// File or directory to write to; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Column delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
        /// Read exchange rates from a JSON file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl From<Commands> for fxroute::AppCommand {
    fn from(cmd: Commands) -> fxroute::AppCommand {
        match cmd {
            Commands::Rates {
                currency,
                amount,
                json,
                file,
            } => fxroute::AppCommand::Rates {
                currency,
                amount,
                json,
                file,
            },
            Commands::Export {
                amount,
                output,
                delimiter,
                file,
            } => fxroute::AppCommand::Export {
                amount,
                output,
                delimiter,
                file,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxroute::cli::setup::setup(),
        Some(cmd) => fxroute::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
