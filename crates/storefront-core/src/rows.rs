//! Typed row sets returned by the read queries.

use serde::{Deserialize, Serialize};

use crate::types::{CardNumber, CountryCode, CustomerId, PlayerName};

/// One distinct country code and how many customers hold it.
///
/// `country_code` is `None` for the group of customers without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country_code: Option<CountryCode>,
    pub customers: i64,
}

/// Customer joined with their credit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCard {
    pub fullname: String,
    pub address: Option<String>,
    pub number: CardNumber,
}

/// Customer id with the number of orders they placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrderCount {
    pub customer_id: CustomerId,
    pub orders: i64,
}

/// Highest score submitted by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScore {
    pub player: PlayerName,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}
