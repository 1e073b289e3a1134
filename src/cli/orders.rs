use super::ui;
use crate::core::{FeeDetailEntry, FeeLedger, OrderSummary};

/// Report lines for one order: the id, then one indented line per charge and
/// the order total last.
pub fn order_lines(summary: &OrderSummary, symbol: &str) -> Vec<String> {
    let mut lines = vec![format!("Order ID: {}", summary.order_id)];
    lines.extend(summary.order_details.iter().map(|entry| match entry {
        FeeDetailEntry::Item { item_type, charge } => {
            format!("\t{item_type}: {}", ui::format_money(symbol, *charge))
        }
        FeeDetailEntry::GrandTotal(total) => {
            format!("\tOrder Total: {}", ui::format_money(symbol, *total))
        }
    }));
    lines
}

pub fn run(ledger: &FeeLedger, symbol: &str) {
    if ledger.summaries().is_empty() {
        println!("No orders to display.");
        return;
    }

    for summary in ledger.summaries() {
        for line in order_lines(summary, symbol) {
            println!("{line}");
        }
    }
}
