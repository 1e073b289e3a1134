//! Input records for the fee schedule and the order book.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    Flat,
    PerPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEntry {
    #[serde(rename = "type")]
    pub kind: FeeKind,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub amount: Decimal,
}

/// One line of the fee schedule: how an item type is charged and where the
/// money goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeScheduleEntry {
    pub order_item_type: String,
    #[serde(default)]
    pub fees: Vec<FeeEntry>,
    #[serde(default)]
    pub distributions: Vec<DistributionEntry>,
}

/// Order identifier as given in the input; numbers of any JSON form are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderNumber {
    Number(serde_json::Number),
    Text(String),
}

impl From<u64> for OrderNumber {
    fn from(n: u64) -> Self {
        OrderNumber::Number(n.into())
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderNumber::Number(n) => write!(f, "{n}"),
            OrderNumber::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_number: OrderNumber,
    pub order_items: Vec<OrderItem>,
}
