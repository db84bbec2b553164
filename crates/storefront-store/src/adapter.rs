use async_trait::async_trait;

use storefront_core::{
    CountryCode, CountryCount, CreditCard, Customer, CustomerCard, CustomerId,
    CustomerOrderCount, Order, Product, ProductId, Result,
};

/// Row order requested for the customer listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerSort {
    /// Whatever order the engine returns.
    #[default]
    Unspecified,
    ById,
}

/// Read-only queries over the commerce tables.
///
/// Relationship joins use inner-join semantics: rows without the related
/// record are dropped, never padded.
#[async_trait]
pub trait QueryLayer {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    async fn all_customers(&self, sort: CustomerSort) -> Result<Vec<Customer>>;

    async fn customers_by_country(&self, country_code: &CountryCode) -> Result<Vec<Customer>>;

    /// Distinct country codes (including the absent one) with customer counts.
    async fn country_counts(&self) -> Result<Vec<CountryCount>>;

    /// Name, address and card number of every customer that has a card.
    async fn customer_cards(&self) -> Result<Vec<CustomerCard>>;

    /// Order count per customer with at least one order, highest first.
    /// Equal counts are ordered by ascending customer id.
    async fn customer_order_counts(&self) -> Result<Vec<CustomerOrderCount>>;

    async fn customer_of_order(&self, order: &Order) -> Result<Option<Customer>>;

    async fn product_of_order(&self, order: &Order) -> Result<Option<Product>>;

    async fn customer_of_card(&self, card: &CreditCard) -> Result<Option<Customer>>;

    async fn orders_of_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    async fn credit_card_of_customer(&self, customer_id: CustomerId) -> Result<Option<CreditCard>>;

    async fn orders_of_product(&self, product_id: ProductId) -> Result<Vec<Order>>;
}
