use sqlx::{Executor, FromRow, Sqlite};

use storefront_core::Result;

use crate::errors::map_db_error;

const CUSTOMER_COLUMNS: &str = "select id, fullname, email, address, country_code from customer";
const ORDER_COLUMNS: &str = r#"select id, customer_id, product_id, quantity from "order""#;
const PRODUCT_COLUMNS: &str =
    "select id, name, price, description, category from product";

const COUNTRY_COUNTS: &str = r#"
select country_code, count(*) as customers
from customer
group by country_code
order by country_code
"#;

const CUSTOMER_CARDS: &str = r#"
select c.fullname, c.address, cc.number
from customer c
inner join credit_card cc on cc.customer_id = c.id
order by c.id
"#;

const CUSTOMER_ORDER_COUNTS: &str = r#"
select c.id as customer_id, count(o.id) as order_count
from customer c
inner join "order" o on o.customer_id = c.id
group by c.id
order by order_count desc, c.id asc
"#;

const TOP_SCORES: &str = r#"
select player, max(score) as top_score
from player_score
group by player
order by top_score asc, player asc
"#;

#[derive(Debug, FromRow)]
pub struct RawCustomer {
    pub id: i64,
    pub fullname: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct RawCreditCard {
    pub id: i64,
    pub number: String,
    pub customer_id: i64,
}

#[derive(Debug, FromRow)]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
}

#[derive(Debug, FromRow)]
pub struct RawOrder {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: Option<i64>,
}

#[derive(Debug, FromRow)]
pub struct RawCountryCount {
    pub country_code: Option<String>,
    pub customers: i64,
}

#[derive(Debug, FromRow)]
pub struct RawCustomerCard {
    pub fullname: String,
    pub address: Option<String>,
    pub number: String,
}

#[derive(Debug, FromRow)]
pub struct RawCustomerOrderCount {
    pub customer_id: i64,
    pub order_count: i64,
}

#[derive(Debug, FromRow)]
pub struct RawTopScore {
    pub player: String,
    pub top_score: i64,
}

pub async fn list_customers<'e, E>(executor: E, sorted: bool) -> Result<Vec<RawCustomer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = if sorted {
        format!("{CUSTOMER_COLUMNS} order by id")
    } else {
        CUSTOMER_COLUMNS.to_string()
    };
    sqlx::query_as::<_, RawCustomer>(&sql)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_customers_by_country<'e, E>(
    executor: E,
    country_code: &str,
) -> Result<Vec<RawCustomer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{CUSTOMER_COLUMNS} where country_code = ? order by id");
    sqlx::query_as::<_, RawCustomer>(&sql)
        .bind(country_code)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn get_customer<'e, E>(executor: E, id: i64) -> Result<Option<RawCustomer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{CUSTOMER_COLUMNS} where id = ?");
    sqlx::query_as::<_, RawCustomer>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)
}

pub async fn get_product<'e, E>(executor: E, id: i64) -> Result<Option<RawProduct>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{PRODUCT_COLUMNS} where id = ?");
    sqlx::query_as::<_, RawProduct>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)
}

pub async fn latest_product_id<'e, E>(executor: E) -> Result<Option<i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("select id from product order by id desc limit 1")
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)
}

pub async fn get_credit_card_by_customer<'e, E>(
    executor: E,
    customer_id: i64,
) -> Result<Option<RawCreditCard>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RawCreditCard>(
        "select id, number, customer_id from credit_card where customer_id = ?",
    )
    .bind(customer_id)
    .fetch_optional(executor)
    .await
    .map_err(map_db_error)
}

pub async fn list_orders_by_customer<'e, E>(executor: E, customer_id: i64) -> Result<Vec<RawOrder>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{ORDER_COLUMNS} where customer_id = ? order by id");
    sqlx::query_as::<_, RawOrder>(&sql)
        .bind(customer_id)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_orders_by_product<'e, E>(executor: E, product_id: i64) -> Result<Vec<RawOrder>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{ORDER_COLUMNS} where product_id = ? order by id");
    sqlx::query_as::<_, RawOrder>(&sql)
        .bind(product_id)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_country_counts<'e, E>(executor: E) -> Result<Vec<RawCountryCount>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RawCountryCount>(COUNTRY_COUNTS)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_customer_cards<'e, E>(executor: E) -> Result<Vec<RawCustomerCard>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RawCustomerCard>(CUSTOMER_CARDS)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_customer_order_counts<'e, E>(executor: E) -> Result<Vec<RawCustomerOrderCount>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RawCustomerOrderCount>(CUSTOMER_ORDER_COUNTS)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn list_top_scores<'e, E>(executor: E) -> Result<Vec<RawTopScore>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, RawTopScore>(TOP_SCORES)
        .fetch_all(executor)
        .await
        .map_err(map_db_error)
}

pub async fn count_rows<'e, E>(executor: E, quoted_table: &str) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("select count(*) from {quoted_table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
}
