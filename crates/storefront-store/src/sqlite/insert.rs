//! Insert statements. Each takes the connection of an open unit of work and
//! returns the id the engine assigned.

use sqlx::SqliteConnection;

use storefront_core::{
    CountryCode, CreditCardId, CustomerId, NewCreditCard, NewCustomer, NewOrder, NewPlayerScore,
    NewProduct, OrderId, PlayerScoreId, ProductId, Result,
};

use crate::errors::map_db_error;

const INSERT_CUSTOMER: &str =
    "insert into customer (fullname, email, address, country_code) values (?, ?, ?, ?)";
const INSERT_CREDIT_CARD: &str = "insert into credit_card (number, customer_id) values (?, ?)";
const INSERT_PRODUCT: &str =
    "insert into product (name, price, description, category) values (?, ?, ?, ?)";
const INSERT_ORDER: &str =
    r#"insert into "order" (customer_id, product_id, quantity) values (?, ?, ?)"#;
const INSERT_PLAYER_SCORE: &str = "insert into player_score (player, score) values (?, ?)";

pub async fn insert_customer(
    conn: &mut SqliteConnection,
    customer: &NewCustomer,
) -> Result<CustomerId> {
    let result = sqlx::query(INSERT_CUSTOMER)
        .bind(customer.fullname.as_str())
        .bind(customer.email.as_deref())
        .bind(customer.address.as_deref())
        .bind(customer.country_code.as_ref().map(CountryCode::as_str))
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(CustomerId(result.last_insert_rowid()))
}

pub async fn insert_credit_card(
    conn: &mut SqliteConnection,
    card: &NewCreditCard,
) -> Result<CreditCardId> {
    let result = sqlx::query(INSERT_CREDIT_CARD)
        .bind(card.number.as_str())
        .bind(card.customer_id.get())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(CreditCardId(result.last_insert_rowid()))
}

pub async fn insert_product(
    conn: &mut SqliteConnection,
    product: &NewProduct,
) -> Result<ProductId> {
    let result = sqlx::query(INSERT_PRODUCT)
        .bind(product.name.as_str())
        .bind(product.price.get())
        .bind(product.description.as_deref())
        .bind(product.category.as_str())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(ProductId(result.last_insert_rowid()))
}

pub async fn insert_order(conn: &mut SqliteConnection, order: &NewOrder) -> Result<OrderId> {
    let result = sqlx::query(INSERT_ORDER)
        .bind(order.customer_id.get())
        .bind(order.product_id.get())
        .bind(order.quantity.map(|quantity| i64::from(quantity.get())))
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(OrderId(result.last_insert_rowid()))
}

pub async fn insert_player_score(
    conn: &mut SqliteConnection,
    score: &NewPlayerScore,
) -> Result<PlayerScoreId> {
    let result = sqlx::query(INSERT_PLAYER_SCORE)
        .bind(score.player.as_str())
        .bind(score.score)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(PlayerScoreId(result.last_insert_rowid()))
}
