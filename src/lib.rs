pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{FeeEngine, FeeLedger, ScheduleSource};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Orders,
    Funds,
    Report,
    Totals,
}

/// Loads the schedule and orders, then prices every order.
pub fn build_ledger(source: &dyn ScheduleSource) -> Result<FeeLedger> {
    let schedule = source.fee_schedule()?;
    let orders = source.orders()?;

    let engine = FeeEngine::new(&schedule);
    info!(
        "Pricing {} orders against {} fee rules",
        orders.len(),
        engine.fee_index().len()
    );

    let pb = cli::ui::new_progress_bar(orders.len() as u64, true);
    pb.set_message("Pricing orders...");
    let mut ledger = FeeLedger::new(engine);
    ledger.process_orders(&orders, &|| pb.inc(1));
    pb.finish_and_clear();

    Ok(ledger)
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fee calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = providers::JsonFileSource::from_config(&config);
    let ledger = build_ledger(&source)?;
    let symbol = config.currency_symbol.as_str();

    match command {
        AppCommand::Orders => cli::orders::run(&ledger, symbol),
        AppCommand::Funds => cli::funds::run(&ledger, symbol),
        AppCommand::Report => {
            cli::orders::run(&ledger, symbol);
            cli::funds::run(&ledger, symbol);
        }
        AppCommand::Totals => cli::totals::run(&ledger, symbol),
    }

    Ok(())
}
