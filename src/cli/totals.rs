use super::ui;
use crate::core::{FeeLedger, GlobalTotals};
use comfy_table::{Attribute, Cell};

impl GlobalTotals {
    pub fn display_as_table(&self, symbol: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Item Type"),
            ui::header_cell("Fund"),
            ui::header_cell("Amount"),
        ]);

        for (item_type, totals) in self.iter() {
            let mut type_cell = Cell::new(item_type);
            for (name, amount) in totals.funds.iter() {
                table.add_row(vec![
                    type_cell,
                    Cell::new(ui::fund_label(name)),
                    ui::money_cell(symbol, Some(amount)),
                ]);
                type_cell = Cell::new("");
            }
            table.add_row(vec![
                type_cell,
                Cell::new(ui::style_text(
                    ui::fund_label(ui::OTHER_FUND),
                    ui::StyleType::Subtle,
                )),
                ui::money_cell(symbol, totals.other),
            ]);
        }

        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(""),
            ui::total_cell(symbol, self.grand_total()),
        ]);

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Total distributions", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output
    }
}

pub fn run(ledger: &FeeLedger, symbol: &str) {
    let totals = ledger.global_totals();
    if totals.is_empty() {
        println!("No fund distributions to display.");
        return;
    }

    println!("{}", totals.display_as_table(symbol));
    println!(
        "\n{} {}",
        ui::style_text("Orders processed:", ui::StyleType::TotalLabel),
        ui::style_text(
            &ledger.summaries().len().to_string(),
            ui::StyleType::TotalValue
        )
    );
}
