//! Entity records and their insert payloads.
//!
//! Stored records carry their system-assigned id. Insert payloads (`New*`)
//! carry every required column; child payloads take their parent ids as
//! constructor arguments, so a card or order cannot be built without them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{
    CardNumber, CountryCode, CreditCardId, CustomerId, OrderId, PlayerName, PlayerScoreId, Price,
    ProductId, Quantity,
};

/// Maximum length of a product category.
pub const MAX_CATEGORY_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub fullname: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub country_code: Option<CountryCode>,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Customer {} {}>", self.id, self.fullname)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    pub number: CardNumber,
    pub customer_id: CustomerId,
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CreditCard {} {}>", self.id, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
    pub category: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Product {} {}>", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Option<Quantity>,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Order {} {} {}>",
            self.id, self.customer_id, self.product_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: PlayerScoreId,
    pub player: PlayerName,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub fullname: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub country_code: Option<CountryCode>,
}

impl NewCustomer {
    pub fn new(fullname: impl Into<String>) -> Self {
        Self {
            fullname: fullname.into(),
            email: None,
            address: None,
            country_code: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_country_code(mut self, country_code: CountryCode) -> Self {
        self.country_code = Some(country_code);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCreditCard {
    pub customer_id: CustomerId,
    pub number: CardNumber,
}

impl NewCreditCard {
    pub fn new(customer_id: CustomerId, number: CardNumber) -> Self {
        Self {
            customer_id,
            number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
    pub category: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Price, category: impl Into<String>) -> Result<Self> {
        let category = category.into();
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(Error::MalformedInput(format!(
                "category must be at most {MAX_CATEGORY_LEN} characters"
            )));
        }
        Ok(Self {
            name: name.into(),
            price,
            description: None,
            category,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Option<Quantity>,
}

impl NewOrder {
    pub fn new(customer_id: CustomerId, product_id: ProductId) -> Self {
        Self {
            customer_id,
            product_id,
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayerScore {
    pub player: PlayerName,
    pub score: i64,
}

impl NewPlayerScore {
    pub fn new(player: PlayerName, score: i64) -> Self {
        Self { player, score }
    }

    /// Build a submission from raw form fields.
    ///
    /// Missing or blank `player`, and missing or non-integer `score`, are
    /// rejected as `MalformedInput`.
    pub fn from_form(player: Option<&str>, score: Option<&str>) -> Result<Self> {
        let player = player
            .ok_or_else(|| Error::MalformedInput("missing field 'player'".to_string()))?;
        let player = PlayerName::new(player)?;
        let score = score
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MalformedInput("missing field 'score'".to_string()))?;
        let score = score.parse::<i64>().map_err(|_| {
            Error::MalformedInput(format!("score must be an integer, got '{score}'"))
        })?;
        Ok(Self { player, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_record_shape() {
        let customer = Customer {
            id: CustomerId(4),
            fullname: "John Doe".to_string(),
            email: None,
            address: None,
            country_code: None,
        };
        assert_eq!(customer.to_string(), "<Customer 4 John Doe>");

        let order = Order {
            id: OrderId(9),
            customer_id: CustomerId(4),
            product_id: ProductId(2),
            quantity: None,
        };
        assert_eq!(order.to_string(), "<Order 9 4 2>");
    }

    #[test]
    fn product_category_is_bounded() {
        let price = Price::new(1.0).unwrap();
        assert!(NewProduct::new("Widget", price, "x".repeat(MAX_CATEGORY_LEN)).is_ok());
        assert!(NewProduct::new("Widget", price, "x".repeat(MAX_CATEGORY_LEN + 1)).is_err());
    }

    #[test]
    fn score_form_requires_both_fields() {
        let ok = NewPlayerScore::from_form(Some("Alice"), Some(" 20 ")).unwrap();
        assert_eq!(ok.player.as_str(), "Alice");
        assert_eq!(ok.score, 20);

        assert!(NewPlayerScore::from_form(None, Some("1")).unwrap_err().is_malformed_input());
        assert!(NewPlayerScore::from_form(Some(""), Some("1")).is_err());
        assert!(NewPlayerScore::from_form(Some("Bob"), None).is_err());
        assert!(NewPlayerScore::from_form(Some("Bob"), Some("")).is_err());
        assert!(NewPlayerScore::from_form(Some("Bob"), Some("ten")).is_err());
        assert_eq!(
            NewPlayerScore::from_form(Some("Bob"), Some("-5")).unwrap().score,
            -5
        );
    }
}
