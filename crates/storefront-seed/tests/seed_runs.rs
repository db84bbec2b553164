use std::collections::BTreeSet;

use anyhow::{Context, Result};
use storefront_core::{ProductId, commerce_model};
use storefront_seed::{FakeData, FakerSource, ProductPolicy, SeedError, SeedProfile, Seeder};
use storefront_store::{
    CustomerSort, QueryLayer, SqliteAdapter, SqlitePool, connect_in_memory, table_counts,
};

fn small_profile(policy: ProductPolicy) -> SeedProfile {
    SeedProfile {
        products: 4,
        customers: 12,
        min_orders: 1,
        max_orders: 3,
        policy,
        seed: 11,
        ..SeedProfile::default()
    }
}

async fn seed(pool: &SqlitePool, profile: SeedProfile) -> Result<storefront_seed::SeedReport> {
    let mut faker = FakerSource::new(profile.seed, &profile.locales);
    let report = Seeder::new(profile)?.run(pool, &mut faker).await?;
    Ok(report)
}

async fn all_orders(queries: &SqliteAdapter) -> Result<Vec<storefront_core::Order>> {
    let mut orders = Vec::new();
    for customer in queries.all_customers(CustomerSort::ById).await? {
        orders.extend(queries.orders_of_customer(customer.id).await?);
    }
    Ok(orders)
}

#[tokio::test]
async fn default_profile_seeds_expected_volumes() -> Result<()> {
    let pool = connect_in_memory().await?;
    let report = seed(&pool, SeedProfile::default()).await?;

    assert_eq!(report.rows("product"), Some(10));
    assert_eq!(report.rows("customer"), Some(100));
    assert_eq!(report.rows("credit_card"), Some(100));
    let orders = report.rows("order").context("order count")?;
    assert!((100..=500).contains(&orders), "orders = {orders}");
    assert_eq!(report.policy, ProductPolicy::Latest);
    assert!(report.finished_at >= report.started_at);
    let wall_ms = (report.finished_at - report.started_at).num_milliseconds();
    assert!(report.duration_ms <= u64::try_from(wall_ms)? + 1_000);

    let queries = SqliteAdapter::new(pool);
    let counts = queries.customer_order_counts().await?;
    assert_eq!(counts.len(), 100);
    assert!(counts.iter().all(|row| (1..=5).contains(&row.orders)));
    assert_eq!(queries.customer_cards().await?.len(), 100);
    Ok(())
}

#[tokio::test]
async fn seeded_products_follow_the_naming_scheme() -> Result<()> {
    let pool = connect_in_memory().await?;
    seed(&pool, small_profile(ProductPolicy::Latest)).await?;

    let product = storefront_store::product_by_id(&pool, ProductId(1))
        .await?
        .context("first product")?;
    assert_eq!(product.name, "Product 0");
    assert_eq!(product.price.get(), 9.99);
    assert_eq!(product.description.as_deref(), Some("Description 0"));
    assert_eq!(product.category, "category");
    Ok(())
}

#[tokio::test]
async fn same_seed_reproduces_the_same_data() -> Result<()> {
    let first = SqliteAdapter::new(connect_in_memory().await?);
    let second = SqliteAdapter::new(connect_in_memory().await?);
    seed(first.pool(), small_profile(ProductPolicy::Uniform)).await?;
    seed(second.pool(), small_profile(ProductPolicy::Uniform)).await?;

    assert_eq!(
        first.all_customers(CustomerSort::ById).await?,
        second.all_customers(CustomerSort::ById).await?
    );
    assert_eq!(first.customer_cards().await?, second.customer_cards().await?);
    assert_eq!(all_orders(&first).await?, all_orders(&second).await?);
    Ok(())
}

#[tokio::test]
async fn reseeding_replaces_previous_rows() -> Result<()> {
    let pool = connect_in_memory().await?;
    let first = seed(&pool, small_profile(ProductPolicy::Latest)).await?;
    let second = seed(&pool, small_profile(ProductPolicy::Latest)).await?;

    assert_eq!(first.tables, second.tables);
    assert_ne!(first.run_id, second.run_id);
    assert_eq!(second.rows("customer"), Some(12));
    Ok(())
}

#[tokio::test]
async fn latest_policy_orders_the_last_product() -> Result<()> {
    let pool = connect_in_memory().await?;
    let report = seed(&pool, small_profile(ProductPolicy::Latest)).await?;
    let queries = SqliteAdapter::new(pool);

    let orders = all_orders(&queries).await?;
    assert_eq!(orders.len() as i64, report.rows("order").context("order count")?);
    assert!(orders.iter().all(|order| order.product_id == ProductId(4)));
    assert!(orders.iter().all(|order| order.quantity.map(|q| q.get()) == Some(1)));
    Ok(())
}

#[tokio::test]
async fn uniform_policy_spreads_orders_over_products() -> Result<()> {
    let pool = connect_in_memory().await?;
    let profile = SeedProfile {
        customers: 60,
        ..small_profile(ProductPolicy::Uniform)
    };
    seed(&pool, profile).await?;
    let queries = SqliteAdapter::new(pool);

    let used: BTreeSet<ProductId> = all_orders(&queries)
        .await?
        .iter()
        .map(|order| order.product_id)
        .collect();
    assert!(used.len() > 1, "only products {used:?} were ordered");
    assert!(used.iter().all(|id| (1..=4).contains(&id.get())));
    Ok(())
}

/// Hands out fixed values and breaks the card of the `broken_at`-th customer.
struct BrokenCardFaker {
    calls: u32,
    broken_at: u32,
}

impl FakeData for BrokenCardFaker {
    fn full_name(&mut self) -> String {
        format!("Customer {}", self.calls)
    }

    fn email(&mut self) -> String {
        "customer@example.com".to_string()
    }

    fn address(&mut self) -> String {
        "1 Main Street\nSpringfield".to_string()
    }

    fn country_code(&mut self) -> String {
        "US".to_string()
    }

    fn credit_card_number(&mut self) -> String {
        self.calls += 1;
        if self.calls == self.broken_at {
            String::new()
        } else {
            "4111111111111111".to_string()
        }
    }

    fn random_int(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

#[tokio::test]
async fn failure_mid_seed_leaves_tables_empty() -> Result<()> {
    let pool = connect_in_memory().await?;
    seed(&pool, small_profile(ProductPolicy::Latest)).await?;

    let mut faker = BrokenCardFaker {
        calls: 0,
        broken_at: 5,
    };
    let err = Seeder::new(small_profile(ProductPolicy::Latest))?
        .run(&pool, &mut faker)
        .await
        .expect_err("empty card number aborts the run");
    assert!(matches!(err, SeedError::Store(ref inner) if inner.is_malformed_input()));

    let counts = table_counts(&pool, &commerce_model()).await?;
    assert!(counts.iter().all(|count| count.rows == 0), "{counts:?}");
    Ok(())
}

#[test]
fn invalid_profiles_are_rejected_up_front() {
    let inverted = SeedProfile {
        min_orders: 3,
        max_orders: 1,
        ..SeedProfile::default()
    };
    assert!(matches!(
        Seeder::new(inverted),
        Err(SeedError::InvalidProfile(_))
    ));

    let no_locales = SeedProfile {
        locales: Vec::new(),
        ..SeedProfile::default()
    };
    assert!(Seeder::new(no_locales).is_err());
}
