//! Data source abstraction for the fee schedule and the orders to price.

use crate::core::schedule::{FeeScheduleEntry, Order};
use anyhow::Result;

pub trait ScheduleSource {
    fn fee_schedule(&self) -> Result<Vec<FeeScheduleEntry>>;
    fn orders(&self) -> Result<Vec<Order>>;
}
