#![allow(dead_code)]

use anyhow::Result;
use storefront_core::{
    CardNumber, CountryCode, CustomerId, NewCreditCard, NewCustomer, NewOrder, NewProduct, Price,
    ProductId, Quantity, commerce_model,
};
use storefront_store::{
    SqlitePool, UnitOfWork, connect_in_memory, insert_credit_card, insert_customer, insert_order,
    insert_product, reset_schema,
};

pub const JOHN_ADDRESS: &str = "1 Main Street\nSpringfield, IL 62701";
pub const JOHN_CARD: &str = "4111111111111111";

pub async fn commerce_store() -> Result<SqlitePool> {
    let pool = connect_in_memory().await?;
    reset_schema(&pool, &commerce_model()).await?;
    Ok(pool)
}

pub async fn add_product(pool: &SqlitePool, name: &str, price: f64) -> Result<ProductId> {
    let mut unit = UnitOfWork::begin(pool).await?;
    let product = NewProduct::new(name, Price::new(price)?, "category")?;
    let id = insert_product(unit.conn(), &product).await?;
    unit.commit().await?;
    Ok(id)
}

/// Insert a customer, optionally with a card, plus `orders` orders of `product`.
pub async fn add_customer(
    pool: &SqlitePool,
    fullname: &str,
    country: Option<&str>,
    card: Option<&str>,
    product: ProductId,
    orders: usize,
) -> Result<CustomerId> {
    let mut unit = UnitOfWork::begin(pool).await?;
    let mut customer = NewCustomer::new(fullname)
        .with_email(format!("{}@example.com", fullname.to_lowercase().replace(' ', ".")))
        .with_address(JOHN_ADDRESS);
    if let Some(country) = country {
        customer = customer.with_country_code(CountryCode::new(country)?);
    }
    let customer_id = insert_customer(unit.conn(), &customer).await?;

    if let Some(number) = card {
        let card = NewCreditCard::new(customer_id, CardNumber::new(number)?);
        insert_credit_card(unit.conn(), &card).await?;
    }
    for _ in 0..orders {
        let order = NewOrder::new(customer_id, product).with_quantity(Quantity::new(1)?);
        insert_order(unit.conn(), &order).await?;
    }

    unit.commit().await?;
    Ok(customer_id)
}
