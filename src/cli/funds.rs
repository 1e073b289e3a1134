use super::ui;
use crate::core::engine::TypeTotals;
use crate::core::{FeeLedger, FundBreakdown, GlobalTotals, OrderFunds, OrderSummary};
use tracing::debug;

fn fund_line(name: &str, amount: &str) -> String {
    format!("\tFund - {}: {amount}", ui::fund_label(name))
}

fn breakdown_lines(breakdown: &FundBreakdown, symbol: &str) -> Vec<String> {
    let mut lines: Vec<String> = breakdown
        .funds
        .iter()
        .map(|(name, amount)| fund_line(name, &ui::format_money(symbol, amount)))
        .collect();
    lines.push(fund_line(
        ui::OTHER_FUND,
        &ui::format_optional_money(symbol, breakdown.other),
    ));
    lines
}

/// Fund lines for every item type of one order. The fund total is not shown.
pub fn order_fund_lines(funds: &OrderFunds, symbol: &str) -> Vec<String> {
    funds
        .iter()
        .flat_map(|(_, breakdown)| breakdown_lines(breakdown, symbol))
        .collect()
}

fn type_total_lines(totals: &TypeTotals, symbol: &str) -> Vec<String> {
    let mut lines: Vec<String> = totals
        .funds
        .iter()
        .map(|(name, amount)| fund_line(name, &ui::format_money(symbol, amount)))
        .collect();
    if let Some(other) = totals.other {
        lines.push(fund_line(ui::OTHER_FUND, &ui::format_money(symbol, other)));
    }
    lines
}

/// Fund lines accumulated over every order, type by type.
pub fn global_total_lines(totals: &GlobalTotals, symbol: &str) -> Vec<String> {
    totals
        .iter()
        .flat_map(|(_, type_totals)| type_total_lines(type_totals, symbol))
        .collect()
}

/// The full funds section: per-order details followed by the totals.
pub fn funds_report(
    summaries: &[OrderSummary],
    totals: &GlobalTotals,
    symbol: &str,
) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "*** Funds Details ***".to_string(),
        String::new(),
    ];
    for summary in summaries {
        lines.push(format!("Order ID: {}", summary.order_id));
        lines.extend(order_fund_lines(&summary.order_funds_details, symbol));
    }

    lines.extend([
        String::new(),
        "*** Totals ***".to_string(),
        String::new(),
        "Total distributions: ".to_string(),
    ]);
    lines.extend(global_total_lines(totals, symbol));
    lines
}

pub fn run(ledger: &FeeLedger, symbol: &str) {
    let totals = ledger.global_totals();
    debug!("Distributed {:?} across all funds", totals.grand_total());

    for line in funds_report(ledger.summaries(), &totals, symbol) {
        println!("{line}");
    }
}
