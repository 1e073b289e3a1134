use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use printfee::core::log::init_logging;

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

impl From<Commands> for printfee::AppCommand {
    fn from(cmd: Commands) -> printfee::AppCommand {
        match cmd {
            Commands::Orders => printfee::AppCommand::Orders,
            Commands::Funds => printfee::AppCommand::Funds,
            Commands::Report => printfee::AppCommand::Report,
            Commands::Totals => printfee::AppCommand::Totals,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the fees charged for each order
    Orders,
    /// Display fund distributions per order and in total
    Funds,
    /// Display order fees followed by fund distributions
    Report,
    /// Display total fund distributions as a table
    Totals,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => printfee::run_command(cmd.into(), cli.config_path.as_deref()),
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

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = printfee::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Directory holding fees.json and orders.json
data_path: "data"

# Optional explicit file locations
# fees_file: "data/fees.json"
# orders_file: "data/orders.json"

currency_symbol: "$"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
