use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::TableCount;

use crate::errors::SeedError;
use crate::faker::LocaleKey;

/// How each seeded order picks its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductPolicy {
    /// The product with the highest id currently stored.
    #[default]
    Latest,
    /// Uniformly random among the products inserted by this run.
    Uniform,
}

impl ProductPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Uniform => "uniform",
        }
    }
}

impl fmt::Display for ProductPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductPolicy {
    type Err = SeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "latest" => Ok(Self::Latest),
            "uniform" => Ok(Self::Uniform),
            other => Err(SeedError::InvalidProfile(format!(
                "unknown product policy '{other}' (expected latest or uniform)"
            ))),
        }
    }
}

/// Parameters of a seeding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedProfile {
    pub products: u32,
    pub customers: u32,
    /// Inclusive lower bound of orders per customer.
    pub min_orders: u32,
    /// Inclusive upper bound of orders per customer.
    pub max_orders: u32,
    pub policy: ProductPolicy,
    pub seed: u64,
    pub locales: Vec<LocaleKey>,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self {
            products: 10,
            customers: 100,
            min_orders: 1,
            max_orders: 5,
            policy: ProductPolicy::Latest,
            seed: 42,
            locales: LocaleKey::ALL.to_vec(),
        }
    }
}

impl SeedProfile {
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.min_orders > self.max_orders {
            return Err(SeedError::InvalidProfile(format!(
                "min_orders ({}) exceeds max_orders ({})",
                self.min_orders, self.max_orders
            )));
        }
        if self.products == 0 && self.customers > 0 && self.max_orders > 0 {
            return Err(SeedError::InvalidProfile(
                "orders need at least one product".to_string(),
            ));
        }
        if self.locales.is_empty() {
            return Err(SeedError::InvalidProfile(
                "at least one locale is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of a finished seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub policy: ProductPolicy,
    pub seed: u64,
    pub tables: Vec<TableCount>,
    pub duration_ms: u64,
}

impl SeedReport {
    pub fn rows(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|count| count.table == table)
            .map(|count| count.rows)
    }
}
