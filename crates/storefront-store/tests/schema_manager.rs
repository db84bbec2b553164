mod common;

use anyhow::Result;
use common::{JOHN_CARD, add_customer, add_product, commerce_store};
use storefront_core::{
    CardNumber, CustomerId, NewCreditCard, NewCustomer, NewOrder, NewPlayerScore, PlayerName,
    ProductId, TableCount, commerce_model, scoring_model,
};
use storefront_store::{
    ScoreService, SqlitePool, UnitOfWork, ensure_schema, insert_credit_card, insert_customer,
    insert_order, reset_schema, table_counts,
};

async fn counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    Ok(table_counts(pool, &commerce_model())
        .await?
        .into_iter()
        .map(|TableCount { table, rows }| (table, rows))
        .collect())
}

fn empty_counts() -> Vec<(String, i64)> {
    ["customer", "product", "credit_card", "order"]
        .into_iter()
        .map(|table| (table.to_string(), 0))
        .collect()
}

#[tokio::test]
async fn reset_leaves_every_table_empty() -> Result<()> {
    let pool = commerce_store().await?;
    let product = add_product(&pool, "Widget", 10.0).await?;
    add_customer(&pool, "John Doe", Some("US"), Some(JOHN_CARD), product, 2).await?;
    assert_eq!(
        counts(&pool).await?,
        vec![
            ("customer".to_string(), 1),
            ("product".to_string(), 1),
            ("credit_card".to_string(), 1),
            ("order".to_string(), 2),
        ]
    );

    reset_schema(&pool, &commerce_model()).await?;
    assert_eq!(counts(&pool).await?, empty_counts());
    Ok(())
}

#[tokio::test]
async fn ids_restart_after_reset() -> Result<()> {
    let pool = commerce_store().await?;
    let first = add_product(&pool, "Widget", 10.0).await?;
    add_product(&pool, "Gadget", 11.0).await?;
    reset_schema(&pool, &commerce_model()).await?;
    let again = add_product(&pool, "Widget", 10.0).await?;
    assert_eq!(first, again);
    Ok(())
}

#[tokio::test]
async fn commerce_reset_keeps_scores() -> Result<()> {
    let pool = commerce_store().await?;
    let scores = ScoreService::new(pool.clone());
    scores.ensure_schema().await?;
    scores
        .submit(&NewPlayerScore::new(PlayerName::new("Alice")?, 10))
        .await?;

    reset_schema(&pool, &commerce_model()).await?;
    ensure_schema(&pool, &scoring_model()).await?;

    let rows = table_counts(&pool, &scoring_model()).await?;
    assert_eq!(rows[0].rows, 1);
    Ok(())
}

#[tokio::test]
async fn orphan_order_is_rejected_without_a_partial_row() -> Result<()> {
    let pool = commerce_store().await?;
    let product = add_product(&pool, "Widget", 10.0).await?;

    let mut unit = UnitOfWork::begin(&pool).await?;
    let err = insert_order(unit.conn(), &NewOrder::new(CustomerId(999), product))
        .await
        .expect_err("customer 999 does not exist");
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    drop(unit);

    let orders = counts(&pool).await?;
    assert_eq!(orders[3], ("order".to_string(), 0));
    Ok(())
}

#[tokio::test]
async fn orphan_card_is_rejected() -> Result<()> {
    let pool = commerce_store().await?;

    let mut unit = UnitOfWork::begin(&pool).await?;
    let card = NewCreditCard::new(CustomerId(42), CardNumber::new(JOHN_CARD)?);
    let err = insert_credit_card(unit.conn(), &card)
        .await
        .expect_err("customer 42 does not exist");
    assert!(err.is_constraint_violation());
    unit.rollback().await?;

    assert_eq!(counts(&pool).await?, empty_counts());
    Ok(())
}

#[tokio::test]
async fn second_card_for_a_customer_is_rejected() -> Result<()> {
    let pool = commerce_store().await?;
    let product = add_product(&pool, "Widget", 10.0).await?;
    let john = add_customer(&pool, "John Doe", Some("US"), Some(JOHN_CARD), product, 0).await?;

    let mut unit = UnitOfWork::begin(&pool).await?;
    let card = NewCreditCard::new(john, CardNumber::new("5500000000000004")?);
    let err = insert_credit_card(unit.conn(), &card)
        .await
        .expect_err("one card per customer");
    assert!(err.is_constraint_violation());
    unit.rollback().await?;

    assert_eq!(counts(&pool).await?[2], ("credit_card".to_string(), 1));
    Ok(())
}

#[tokio::test]
async fn failed_insert_discards_the_whole_unit() -> Result<()> {
    let pool = commerce_store().await?;

    let mut unit = UnitOfWork::begin(&pool).await?;
    let customer = insert_customer(unit.conn(), &NewCustomer::new("Jane Roe")).await?;
    let err = insert_order(unit.conn(), &NewOrder::new(customer, ProductId(7)))
        .await
        .expect_err("product 7 does not exist");
    assert!(err.is_constraint_violation());
    drop(unit);

    assert_eq!(counts(&pool).await?, empty_counts());
    Ok(())
}

#[tokio::test]
async fn uncommitted_writes_are_discarded() -> Result<()> {
    let pool = commerce_store().await?;

    let mut unit = UnitOfWork::begin(&pool).await?;
    insert_customer(unit.conn(), &NewCustomer::new("Nobody")).await?;
    unit.rollback().await?;
    assert_eq!(counts(&pool).await?[0], ("customer".to_string(), 0));

    let mut unit = UnitOfWork::begin(&pool).await?;
    insert_customer(unit.conn(), &NewCustomer::new("Somebody")).await?;
    unit.commit().await?;
    assert_eq!(counts(&pool).await?[0], ("customer".to_string(), 1));
    Ok(())
}

#[tokio::test]
async fn engine_checks_reject_out_of_range_values() -> Result<()> {
    let pool = commerce_store().await?;

    let err = sqlx::query("insert into product (name, price, category) values ('Bad', -1.0, 'c')")
        .execute(&pool)
        .await
        .map_err(storefront_store::map_db_error)
        .expect_err("negative price");
    assert!(err.is_constraint_violation());

    let err = sqlx::query("insert into customer (fullname, country_code) values ('X', 'USA')")
        .execute(&pool)
        .await
        .map_err(storefront_store::map_db_error)
        .expect_err("three letter country code");
    assert!(err.is_constraint_violation());

    assert_eq!(counts(&pool).await?, empty_counts());
    Ok(())
}
