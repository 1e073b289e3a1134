//! Runs pricing and fund allocation over a batch of orders and accumulates
//! the cross-order fund totals.
use crate::core::distribution::{DistributionIndex, FundShares, OrderFunds, allocate_funds};
use crate::core::fees::{FeeDetailEntry, FeeIndex, find_grand_total, price_order};
use crate::core::ordered::OrderedMap;
use crate::core::schedule::{FeeScheduleEntry, Order, OrderNumber};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Read-only lookups built once from the fee schedule.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    fee_index: FeeIndex,
    distribution_index: DistributionIndex,
}

impl FeeEngine {
    pub fn new(schedule: &[FeeScheduleEntry]) -> Self {
        Self {
            fee_index: FeeIndex::build(schedule),
            distribution_index: DistributionIndex::build(schedule),
        }
    }

    pub fn fee_index(&self) -> &FeeIndex {
        &self.fee_index
    }

    /// Prices a single order and allocates its total across funds.
    pub fn summarize(&self, order: &Order) -> OrderSummary {
        let order_details = price_order(&order.order_items, &self.fee_index);
        let order_funds_details =
            allocate_funds(&order.order_items, &order_details, &self.distribution_index);
        debug!(
            "Order {}: {} fee lines, {} fund breakdowns",
            order.order_number,
            order_details.len(),
            order_funds_details.len()
        );
        OrderSummary {
            order_id: order.order_number.clone(),
            order_details,
            order_funds_details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderNumber,
    pub order_details: Vec<FeeDetailEntry>,
    pub order_funds_details: OrderFunds,
}

impl OrderSummary {
    pub fn grand_total(&self) -> Option<Decimal> {
        find_grand_total(&self.order_details)
    }
}

/// Accumulated fund amounts for one item type across all orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub funds: FundShares,
    /// Sum of the per-order residuals; orders without a residual add nothing.
    pub other: Option<Decimal>,
}

impl TypeTotals {
    fn add_other(&mut self, item_type: &str, amount: Decimal) {
        let current = self.other.unwrap_or_default();
        match current.checked_add(amount) {
            Some(sum) => self.other = Some(sum),
            None => warn!("Residual total for {item_type} overflowed, keeping {current}"),
        }
    }

    /// Funds plus residual, or `None` if the sum overflows.
    pub fn total(&self) -> Option<Decimal> {
        self.funds.total()?.checked_add(self.other.unwrap_or_default())
    }
}

/// Fund totals per item type, in first-seen type order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalTotals {
    types: OrderedMap<TypeTotals>,
}

impl GlobalTotals {
    pub fn get(&self, item_type: &str) -> Option<&TypeTotals> {
        self.types.get(item_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeTotals)> {
        self.types.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn grand_total(&self) -> Option<Decimal> {
        self.types
            .values()
            .try_fold(Decimal::ZERO, |acc, totals| acc.checked_add(totals.total()?))
    }
}

/// Owns the engine and every order summary produced during a run.
#[derive(Debug, Clone)]
pub struct FeeLedger {
    engine: FeeEngine,
    summaries: Vec<OrderSummary>,
}

impl FeeLedger {
    pub fn new(engine: FeeEngine) -> Self {
        Self {
            engine,
            summaries: Vec::new(),
        }
    }

    /// Summarizes orders sequentially in input order. Progress updates can be
    /// reported via the `update_callback`.
    pub fn process_orders(&mut self, orders: &[Order], update_callback: &(dyn Fn())) {
        for order in orders {
            let summary = self.engine.summarize(order);
            self.summaries.push(summary);
            update_callback();
        }
        debug!("Ledger holds {} order summaries", self.summaries.len());
    }

    pub fn summaries(&self) -> &[OrderSummary] {
        &self.summaries
    }

    /// Walks every stored summary and adds each fund amount, residual
    /// included, into the per-type totals.
    pub fn global_totals(&self) -> GlobalTotals {
        let mut totals = GlobalTotals::default();
        for summary in &self.summaries {
            for (item_type, breakdown) in summary.order_funds_details.iter() {
                let type_totals = totals
                    .types
                    .get_or_insert_with(item_type, TypeTotals::default);
                type_totals.funds.add_all(&breakdown.funds);
                if let Some(other) = breakdown.other {
                    type_totals.add_other(item_type, other);
                }
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::{DistributionEntry, FeeEntry, FeeKind, OrderItem};
    use rust_decimal_macros::dec;

    fn schedule() -> Vec<FeeScheduleEntry> {
        vec![
            FeeScheduleEntry {
                order_item_type: "book".to_string(),
                fees: vec![
                    FeeEntry {
                        kind: FeeKind::Flat,
                        amount: dec!(5),
                    },
                    FeeEntry {
                        kind: FeeKind::PerPage,
                        amount: dec!(0.10),
                    },
                ],
                distributions: vec![
                    DistributionEntry {
                        name: "author".to_string(),
                        amount: dec!(3),
                    },
                    DistributionEntry {
                        name: "printer".to_string(),
                        amount: dec!(2),
                    },
                ],
            },
            FeeScheduleEntry {
                order_item_type: "poster".to_string(),
                fees: vec![FeeEntry {
                    kind: FeeKind::Flat,
                    amount: dec!(8),
                }],
                distributions: vec![DistributionEntry {
                    name: "artist".to_string(),
                    amount: dec!(6),
                }],
            },
        ]
    }

    fn order(number: u64, items: &[(&str, u32)]) -> Order {
        Order {
            order_number: number.into(),
            order_items: items
                .iter()
                .map(|(item_type, pages)| OrderItem {
                    item_type: item_type.to_string(),
                    pages: *pages,
                })
                .collect(),
        }
    }

    fn two_orders() -> Vec<Order> {
        vec![
            order(1, &[("book", 3)]),
            order(2, &[("poster", 1), ("book", 1)]),
        ]
    }

    #[test]
    fn test_summarize_round_trip_example() {
        let engine = FeeEngine::new(&schedule());
        let summary = engine.summarize(&order(7, &[("book", 3)]));

        assert_eq!(summary.order_id, OrderNumber::from(7));
        assert_eq!(
            summary.order_details,
            vec![
                FeeDetailEntry::Item {
                    item_type: "book".to_string(),
                    charge: dec!(5.20)
                },
                FeeDetailEntry::GrandTotal(dec!(5.20)),
            ]
        );
        let book = summary.order_funds_details.get("book").unwrap();
        assert_eq!(book.funds.get("author"), Some(dec!(3)));
        assert_eq!(book.funds.get("printer"), Some(dec!(2)));
        assert_eq!(book.fund_grand_total, dec!(5));
        assert_eq!(book.other, Some(dec!(0.20)));
    }

    #[test]
    fn test_global_totals() {
        let mut ledger = FeeLedger::new(FeeEngine::new(&schedule()));
        ledger.process_orders(&two_orders(), &|| {});
        assert_eq!(ledger.summaries().len(), 2);
        assert_eq!(ledger.summaries()[1].grand_total(), Some(dec!(13)));

        let totals = ledger.global_totals();
        let types: Vec<&str> = totals.iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec!["book", "poster"]);

        let book = totals.get("book").unwrap();
        assert_eq!(book.funds.get("author"), Some(dec!(6)));
        assert_eq!(book.funds.get("printer"), Some(dec!(4)));
        // 0.20 from the first order plus 13 - 5 from the second.
        assert_eq!(book.other, Some(dec!(8.20)));

        let poster = totals.get("poster").unwrap();
        assert_eq!(poster.funds.get("artist"), Some(dec!(6)));
        assert_eq!(poster.other, Some(dec!(7)));
        assert_eq!(totals.grand_total(), Some(dec!(31.20)));
    }

    #[test]
    fn test_processing_twice_doubles_totals() {
        let mut ledger = FeeLedger::new(FeeEngine::new(&schedule()));
        ledger.process_orders(&two_orders(), &|| {});
        let once = ledger.global_totals();
        ledger.process_orders(&two_orders(), &|| {});
        let twice = ledger.global_totals();

        for (item_type, totals) in once.iter() {
            let doubled = twice.get(item_type).unwrap();
            for (fund, amount) in totals.funds.iter() {
                assert_eq!(doubled.funds.get(fund), Some(amount * dec!(2)));
            }
            assert_eq!(doubled.other, totals.other.map(|o| o * dec!(2)));
        }
    }

    #[test]
    fn test_process_orders_reports_progress() {
        let mut ledger = FeeLedger::new(FeeEngine::new(&schedule()));
        let count = std::cell::Cell::new(0);
        ledger.process_orders(&two_orders(), &|| count.set(count.get() + 1));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_unknown_types_do_not_reach_totals() {
        let mut ledger = FeeLedger::new(FeeEngine::new(&schedule()));
        ledger.process_orders(&[order(3, &[("mystery", 4)])], &|| {});
        assert_eq!(
            ledger.summaries()[0].order_details,
            vec![FeeDetailEntry::GrandTotal(Decimal::ZERO)]
        );
        assert!(ledger.global_totals().is_empty());
    }

    #[test]
    fn test_global_totals_overflow_keeps_last_value() {
        let vault = |name: &str| FeeScheduleEntry {
            order_item_type: name.to_string(),
            fees: vec![FeeEntry {
                kind: FeeKind::Flat,
                amount: Decimal::MAX,
            }],
            distributions: vec![DistributionEntry {
                name: "reserve".to_string(),
                amount: Decimal::ZERO,
            }],
        };
        let mut ledger = FeeLedger::new(FeeEngine::new(&[vault("vault"), vault("safe")]));
        ledger.process_orders(
            &[
                order(1, &[("vault", 1)]),
                order(2, &[("vault", 1)]),
                order(3, &[("safe", 1)]),
            ],
            &|| {},
        );

        let totals = ledger.global_totals();
        assert_eq!(totals.get("vault").unwrap().other, Some(Decimal::MAX));
        assert_eq!(totals.get("safe").unwrap().total(), Some(Decimal::MAX));
        assert_eq!(totals.grand_total(), None);
    }
}
