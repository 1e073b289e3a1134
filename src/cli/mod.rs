pub mod funds;
pub mod orders;
pub mod totals;
pub mod ui;
