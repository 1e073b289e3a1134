//! Core business logic

pub mod config;
pub mod distribution;
pub mod engine;
pub mod fees;
pub mod log;
pub mod ordered;
pub mod schedule;
pub mod source;

// Re-export main types for cleaner imports
pub use distribution::{
    DistributionIndex, FUND_GRAND_TOTAL, FundBreakdown, FundShares, OTHER_FUND, OrderFunds,
};
pub use engine::{FeeEngine, FeeLedger, GlobalTotals, OrderSummary};
pub use fees::{FeeDetailEntry, FeeIndex, FeeRule};
pub use ordered::OrderedMap;
pub use source::ScheduleSource;
