//! Fund distribution rules and per-order fund allocation.
use crate::core::fees::{FeeDetailEntry, find_grand_total};
use crate::core::ordered::OrderedMap;
use crate::core::schedule::{FeeScheduleEntry, OrderItem};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fund key holding the unallocated residual of an order.
pub const OTHER_FUND: &str = "other";
/// Fund key holding the sum of every configured share.
pub const FUND_GRAND_TOTAL: &str = "fund_grand_total";

/// Names of the derived slots; a distribution may not use them as a fund.
fn is_reserved(name: &str) -> bool {
    name == OTHER_FUND || name == FUND_GRAND_TOTAL
}

/// Named fund amounts kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundShares {
    amounts: OrderedMap<Decimal>,
}

impl FundShares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, amount: Decimal) {
        self.amounts.insert(name, amount);
    }

    /// Adds `amount` to `name`, starting from zero if it is not present yet.
    /// An addition that would overflow leaves the fund unchanged.
    pub fn add(&mut self, name: &str, amount: Decimal) {
        let value = self.amounts.get_or_insert_with(name, || Decimal::ZERO);
        match value.checked_add(amount) {
            Some(sum) => *value = sum,
            None => warn!("Fund {name} overflowed adding {amount}, keeping {value}"),
        }
    }

    pub fn add_all(&mut self, other: &FundShares) {
        for (name, amount) in other.iter() {
            self.add(name, amount);
        }
    }

    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.amounts.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(name, amount)| (name, *amount))
    }

    /// Sum of every fund, or `None` if it does not fit in a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        self.amounts
            .values()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Configured fund shares for one item type.
///
/// `fund_grand_total` is fixed when the rule is built; the rule is never
/// mutated afterwards, so the two always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRule {
    shares: FundShares,
    fund_grand_total: Decimal,
}

impl DistributionRule {
    pub fn shares(&self) -> &FundShares {
        &self.shares
    }

    pub fn fund_grand_total(&self) -> Decimal {
        self.fund_grand_total
    }
}

#[derive(Debug, Clone, Default)]
pub struct DistributionIndex {
    rules: HashMap<String, DistributionRule>,
}

impl DistributionIndex {
    /// Builds one rule per item type. A repeated type replaces the earlier
    /// rule entirely and repeated fund names keep the last amount. The fund
    /// total sums every listed amount, duplicates included.
    ///
    /// Distributions named `other` or `fund_grand_total` count towards the
    /// fund total but are not kept as funds, since both slots are derived.
    pub fn build(schedule: &[FeeScheduleEntry]) -> Self {
        let mut rules = HashMap::new();
        for entry in schedule {
            let item_type = &entry.order_item_type;
            let mut shares = FundShares::new();
            let mut fund_grand_total = Decimal::ZERO;
            for distribution in &entry.distributions {
                let Some(total) = fund_grand_total.checked_add(distribution.amount) else {
                    warn!(
                        "Fund total for {item_type} overflowed at {}, skipping it",
                        distribution.name
                    );
                    continue;
                };
                fund_grand_total = total;

                if is_reserved(&distribution.name) {
                    warn!(
                        "Distribution {} for {item_type} uses a reserved fund name, not kept as a fund",
                        distribution.name
                    );
                    continue;
                }
                shares.insert(&distribution.name, distribution.amount);
            }
            rules.insert(
                item_type.clone(),
                DistributionRule {
                    shares,
                    fund_grand_total,
                },
            );
        }
        debug!("Built distribution index with {} item types", rules.len());
        Self { rules }
    }

    pub fn get(&self, item_type: &str) -> Option<&DistributionRule> {
        self.rules.get(item_type)
    }
}

/// Money flowing to each fund for one item type within one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundBreakdown {
    pub funds: FundShares,
    pub fund_grand_total: Decimal,
    /// Order total minus `fund_grand_total`; `None` when the order had no
    /// grand total to subtract from.
    pub other: Option<Decimal>,
}

/// Per-type fund breakdowns for one order, in first-seen type order.
pub type OrderFunds = OrderedMap<FundBreakdown>;

/// Allocates an order across funds, one breakdown per distinct item type.
///
/// Each occurrence of a type adds its configured shares again, so named funds
/// scale with the number of line items. `fund_grand_total` stays at the
/// single-item value and `other` is recomputed from it on every occurrence.
pub fn allocate_funds(
    items: &[OrderItem],
    fee_detail: &[FeeDetailEntry],
    distribution_index: &DistributionIndex,
) -> OrderFunds {
    let order_grand_total = find_grand_total(fee_detail);
    if order_grand_total.is_none() {
        warn!("No grand total in fee detail, fund residuals will be unavailable");
    }

    let mut order_funds = OrderFunds::new();
    for item in items {
        let Some(rule) = distribution_index.get(&item.item_type) else {
            debug!(
                "No distribution rule for item type {}, skipping",
                item.item_type
            );
            continue;
        };

        let mut seeded = false;
        let breakdown = order_funds.get_or_insert_with(&item.item_type, || {
            seeded = true;
            FundBreakdown {
                funds: rule.shares().clone(),
                fund_grand_total: rule.fund_grand_total(),
                other: None,
            }
        });
        if !seeded {
            breakdown.funds.add_all(rule.shares());
        }
        breakdown.other = order_grand_total.and_then(|total| {
            let other = total.checked_sub(breakdown.fund_grand_total);
            if other.is_none() {
                warn!("Residual for {} overflowed", item.item_type);
            }
            other
        });
    }

    order_funds
}
