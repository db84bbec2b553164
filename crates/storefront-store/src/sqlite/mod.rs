use sqlx::{Executor, Sqlite, SqlitePool};

use storefront_core::{
    CountryCode, CountryCount, CreditCard, Customer, CustomerCard, CustomerId,
    CustomerOrderCount, Order, Product, ProductId, Result, TopScore,
};

use crate::adapter::{CustomerSort, QueryLayer};

mod ddl;
mod insert;
mod mapper;
mod queries;
mod schema;

pub use ddl::{create_table_sql, drop_table_sql};
pub use insert::{
    insert_credit_card, insert_customer, insert_order, insert_player_score, insert_product,
};
pub use schema::{ensure_schema, reset_schema, table_counts};

/// Query layer over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteAdapter {
    pool: SqlitePool,
}

impl SqliteAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl QueryLayer for SqliteAdapter {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn all_customers(&self, sort: CustomerSort) -> Result<Vec<Customer>> {
        all_customers(&self.pool, sort).await
    }

    async fn customers_by_country(&self, country_code: &CountryCode) -> Result<Vec<Customer>> {
        customers_by_country(&self.pool, country_code).await
    }

    async fn country_counts(&self) -> Result<Vec<CountryCount>> {
        country_counts(&self.pool).await
    }

    async fn customer_cards(&self) -> Result<Vec<CustomerCard>> {
        customer_cards(&self.pool).await
    }

    async fn customer_order_counts(&self) -> Result<Vec<CustomerOrderCount>> {
        customer_order_counts(&self.pool).await
    }

    async fn customer_of_order(&self, order: &Order) -> Result<Option<Customer>> {
        customer_of_order(&self.pool, order).await
    }

    async fn product_of_order(&self, order: &Order) -> Result<Option<Product>> {
        product_of_order(&self.pool, order).await
    }

    async fn customer_of_card(&self, card: &CreditCard) -> Result<Option<Customer>> {
        customer_of_card(&self.pool, card).await
    }

    async fn orders_of_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        orders_of_customer(&self.pool, customer_id).await
    }

    async fn credit_card_of_customer(&self, customer_id: CustomerId) -> Result<Option<CreditCard>> {
        credit_card_of_customer(&self.pool, customer_id).await
    }

    async fn orders_of_product(&self, product_id: ProductId) -> Result<Vec<Order>> {
        orders_of_product(&self.pool, product_id).await
    }
}

pub async fn all_customers<'e, E>(executor: E, sort: CustomerSort) -> Result<Vec<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sorted = sort == CustomerSort::ById;
    mapper::map_customers(queries::list_customers(executor, sorted).await?)
}

/// Exact, case-sensitive match on `country_code`.
pub async fn customers_by_country<'e, E>(
    executor: E,
    country_code: &CountryCode,
) -> Result<Vec<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let raw = queries::list_customers_by_country(executor, country_code.as_str()).await?;
    mapper::map_customers(raw)
}

/// Counts use `count(*)` so they always sum to the number of customers.
pub async fn country_counts<'e, E>(executor: E) -> Result<Vec<CountryCount>>
where
    E: Executor<'e, Database = Sqlite>,
{
    mapper::map_country_counts(queries::list_country_counts(executor).await?)
}

pub async fn customer_cards<'e, E>(executor: E) -> Result<Vec<CustomerCard>>
where
    E: Executor<'e, Database = Sqlite>,
{
    mapper::map_customer_cards(queries::list_customer_cards(executor).await?)
}

pub async fn customer_order_counts<'e, E>(executor: E) -> Result<Vec<CustomerOrderCount>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let raw = queries::list_customer_order_counts(executor).await?;
    Ok(mapper::map_customer_order_counts(raw))
}

/// Highest score per player, lowest first.
pub async fn top_scores<'e, E>(executor: E) -> Result<Vec<TopScore>>
where
    E: Executor<'e, Database = Sqlite>,
{
    mapper::map_top_scores(queries::list_top_scores(executor).await?)
}

pub async fn customer_by_id<'e, E>(executor: E, id: CustomerId) -> Result<Option<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    queries::get_customer(executor, id.get())
        .await?
        .map(mapper::map_customer)
        .transpose()
}

pub async fn product_by_id<'e, E>(executor: E, id: ProductId) -> Result<Option<Product>>
where
    E: Executor<'e, Database = Sqlite>,
{
    queries::get_product(executor, id.get())
        .await?
        .map(mapper::map_product)
        .transpose()
}

/// Product with the highest id, i.e. the one inserted last.
pub async fn latest_product_id<'e, E>(executor: E) -> Result<Option<ProductId>>
where
    E: Executor<'e, Database = Sqlite>,
{
    Ok(queries::latest_product_id(executor).await?.map(ProductId))
}

pub async fn customer_of_order<'e, E>(executor: E, order: &Order) -> Result<Option<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    customer_by_id(executor, order.customer_id).await
}

pub async fn product_of_order<'e, E>(executor: E, order: &Order) -> Result<Option<Product>>
where
    E: Executor<'e, Database = Sqlite>,
{
    product_by_id(executor, order.product_id).await
}

pub async fn customer_of_card<'e, E>(executor: E, card: &CreditCard) -> Result<Option<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    customer_by_id(executor, card.customer_id).await
}

pub async fn orders_of_customer<'e, E>(executor: E, customer_id: CustomerId) -> Result<Vec<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    mapper::map_orders(queries::list_orders_by_customer(executor, customer_id.get()).await?)
}

pub async fn credit_card_of_customer<'e, E>(
    executor: E,
    customer_id: CustomerId,
) -> Result<Option<CreditCard>>
where
    E: Executor<'e, Database = Sqlite>,
{
    queries::get_credit_card_by_customer(executor, customer_id.get())
        .await?
        .map(mapper::map_credit_card)
        .transpose()
}

pub async fn orders_of_product<'e, E>(executor: E, product_id: ProductId) -> Result<Vec<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    mapper::map_orders(queries::list_orders_by_product(executor, product_id.get()).await?)
}
