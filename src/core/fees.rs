//! Fee lookup and per-order pricing.
use crate::core::schedule::{FeeKind, FeeScheduleEntry, OrderItem};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Flat and per-page charges for a single item type. Missing charges are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeRule {
    pub flat: Decimal,
    pub per_page: Decimal,
}

impl FeeRule {
    /// The flat fee covers the first page; every page after it costs `per_page`.
    /// Returns `None` if the charge does not fit in a `Decimal`.
    pub fn charge(&self, pages: u32) -> Option<Decimal> {
        if pages > 1 {
            Decimal::from(pages - 1)
                .checked_mul(self.per_page)?
                .checked_add(self.flat)
        } else {
            Some(self.flat)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeeIndex {
    rules: HashMap<String, FeeRule>,
}

impl FeeIndex {
    /// Builds the lookup from the raw schedule. When a type or a fee kind is
    /// repeated, the later entry overwrites the earlier one.
    pub fn build(schedule: &[FeeScheduleEntry]) -> Self {
        let mut rules = HashMap::new();
        for entry in schedule {
            let mut rule = FeeRule::default();
            for fee in &entry.fees {
                match fee.kind {
                    FeeKind::Flat => rule.flat = fee.amount,
                    FeeKind::PerPage => rule.per_page = fee.amount,
                }
            }
            rules.insert(entry.order_item_type.clone(), rule);
        }
        debug!("Built fee index with {} item types", rules.len());
        Self { rules }
    }

    pub fn get(&self, item_type: &str) -> Option<&FeeRule> {
        self.rules.get(item_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeDetailEntry {
    Item { item_type: String, charge: Decimal },
    GrandTotal(Decimal),
}

/// Prices each item and appends the order total as the final entry.
///
/// Items whose type has no fee rule are dropped entirely, as are items whose
/// charge would overflow the order total. Repeated types are kept as separate
/// entries in input order.
pub fn price_order(items: &[OrderItem], fee_index: &FeeIndex) -> Vec<FeeDetailEntry> {
    let mut detail = Vec::with_capacity(items.len() + 1);
    let mut grand_total = Decimal::ZERO;

    for item in items {
        let Some(rule) = fee_index.get(&item.item_type) else {
            debug!("No fee rule for item type {}, skipping", item.item_type);
            continue;
        };
        let Some((charge, total)) = rule
            .charge(item.pages)
            .and_then(|charge| Some((charge, grand_total.checked_add(charge)?)))
        else {
            warn!(
                "Charge for {} with {} pages overflowed, skipping",
                item.item_type, item.pages
            );
            continue;
        };
        grand_total = total;
        detail.push(FeeDetailEntry::Item {
            item_type: item.item_type.clone(),
            charge,
        });
    }

    detail.push(FeeDetailEntry::GrandTotal(grand_total));
    detail
}

/// Returns the grand total if it is the last entry of the detail.
pub fn find_grand_total(detail: &[FeeDetailEntry]) -> Option<Decimal> {
    match detail.last() {
        Some(FeeDetailEntry::GrandTotal(total)) => Some(*total),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::{DistributionEntry, FeeEntry};
    use rust_decimal_macros::dec;

    fn entry(item_type: &str, fees: &[(FeeKind, Decimal)]) -> FeeScheduleEntry {
        FeeScheduleEntry {
            order_item_type: item_type.to_string(),
            fees: fees
                .iter()
                .map(|(kind, amount)| FeeEntry {
                    kind: *kind,
                    amount: *amount,
                })
                .collect(),
            distributions: Vec::<DistributionEntry>::new(),
        }
    }

    fn item(item_type: &str, pages: u32) -> OrderItem {
        OrderItem {
            item_type: item_type.to_string(),
            pages,
        }
    }

    fn index() -> FeeIndex {
        FeeIndex::build(&[
            entry(
                "book",
                &[(FeeKind::Flat, dec!(5)), (FeeKind::PerPage, dec!(0.10))],
            ),
            entry("poster", &[(FeeKind::Flat, dec!(12.50))]),
            entry("leaflet", &[(FeeKind::PerPage, dec!(0.25))]),
        ])
    }

    #[test]
    fn test_build_defaults_missing_fees_to_zero() {
        let index = index();
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.get("poster"),
            Some(&FeeRule {
                flat: dec!(12.50),
                per_page: Decimal::ZERO
            })
        );
        assert_eq!(index.get("leaflet").unwrap().flat, Decimal::ZERO);
        assert!(index.get("unknown").is_none());
    }

    #[test]
    fn test_build_last_entry_wins() {
        let index = FeeIndex::build(&[
            entry(
                "book",
                &[(FeeKind::Flat, dec!(1)), (FeeKind::Flat, dec!(2))],
            ),
            entry("card", &[(FeeKind::Flat, dec!(3))]),
            entry("card", &[(FeeKind::PerPage, dec!(4))]),
        ]);
        assert_eq!(index.get("book").unwrap().flat, dec!(2));
        // A repeated type replaces the whole rule.
        assert_eq!(
            index.get("card"),
            Some(&FeeRule {
                flat: Decimal::ZERO,
                per_page: dec!(4)
            })
        );
    }

    #[test]
    fn test_charge() {
        let rule = FeeRule {
            flat: dec!(5),
            per_page: dec!(0.10),
        };
        assert_eq!(rule.charge(0), Some(dec!(5)));
        assert_eq!(rule.charge(1), Some(dec!(5)));
        assert_eq!(rule.charge(3), Some(dec!(5.20)));
        assert_eq!(rule.charge(11), Some(dec!(6.00)));
    }

    #[test]
    fn test_charge_overflow() {
        let rule = FeeRule {
            flat: dec!(1),
            per_page: Decimal::MAX,
        };
        assert_eq!(rule.charge(1), Some(dec!(1)));
        assert_eq!(rule.charge(2), None);
        assert_eq!(rule.charge(3), None);
    }

    #[test]
    fn test_price_order_skips_overflowing_items() {
        let index = FeeIndex::build(&[
            entry("huge", &[(FeeKind::PerPage, Decimal::MAX)]),
            entry("vault", &[(FeeKind::Flat, Decimal::MAX)]),
            entry("poster", &[(FeeKind::Flat, dec!(12.50))]),
        ]);

        let detail = price_order(&[item("huge", 3), item("poster", 1)], &index);
        assert_eq!(
            detail,
            vec![
                FeeDetailEntry::Item {
                    item_type: "poster".to_string(),
                    charge: dec!(12.50)
                },
                FeeDetailEntry::GrandTotal(dec!(12.50)),
            ]
        );

        // The second vault alone fits, but not on top of the first.
        let detail = price_order(&[item("vault", 1), item("vault", 1)], &index);
        assert_eq!(detail.len(), 2);
        assert_eq!(find_grand_total(&detail), Some(Decimal::MAX));
    }

    #[test]
    fn test_price_order() {
        let detail = price_order(
            &[item("book", 3), item("poster", 4), item("book", 1)],
            &index(),
        );
        assert_eq!(
            detail,
            vec![
                FeeDetailEntry::Item {
                    item_type: "book".to_string(),
                    charge: dec!(5.20)
                },
                FeeDetailEntry::Item {
                    item_type: "poster".to_string(),
                    charge: dec!(12.50)
                },
                FeeDetailEntry::Item {
                    item_type: "book".to_string(),
                    charge: dec!(5)
                },
                FeeDetailEntry::GrandTotal(dec!(22.70)),
            ]
        );
    }

    #[test]
    fn test_price_order_skips_unknown_types() {
        let detail = price_order(&[item("mystery", 10), item("leaflet", 5)], &index());
        assert_eq!(detail.len(), 2);
        assert_eq!(
            detail[0],
            FeeDetailEntry::Item {
                item_type: "leaflet".to_string(),
                charge: dec!(1.00)
            }
        );
        assert_eq!(find_grand_total(&detail), Some(dec!(1.00)));
    }

    #[test]
    fn test_price_empty_order() {
        let detail = price_order(&[], &index());
        assert_eq!(detail, vec![FeeDetailEntry::GrandTotal(Decimal::ZERO)]);
    }

    #[test]
    fn test_grand_total_is_sum_of_charges() {
        let items = [
            item("book", 7),
            item("leaflet", 2),
            item("poster", 1),
            item("book", 2),
        ];
        let detail = price_order(&items, &index());
        let sum: Decimal = detail
            .iter()
            .filter_map(|e| match e {
                FeeDetailEntry::Item { charge, .. } => Some(*charge),
                FeeDetailEntry::GrandTotal(_) => None,
            })
            .sum();
        assert!(matches!(detail.last(), Some(FeeDetailEntry::GrandTotal(_))));
        assert_eq!(find_grand_total(&detail), Some(sum));
    }

    #[test]
    fn test_find_grand_total_missing() {
        assert_eq!(find_grand_total(&[]), None);
        let detail = vec![FeeDetailEntry::Item {
            item_type: "book".to_string(),
            charge: dec!(1),
        }];
        assert_eq!(find_grand_total(&detail), None);
    }
}
