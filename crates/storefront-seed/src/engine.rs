use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use storefront_core::{
    CardNumber, CountryCode, NewCreditCard, NewCustomer, NewOrder, NewProduct, Price, ProductId,
    Quantity, commerce_model,
};
use storefront_store::{
    SqlitePool, UnitOfWork, insert_credit_card, insert_customer, insert_order, insert_product,
    latest_product_id, reset_schema, table_counts,
};

use crate::errors::SeedError;
use crate::faker::FakeData;
use crate::model::{ProductPolicy, SeedProfile, SeedReport};

const PRODUCT_PRICE: f64 = 9.99;
const PRODUCT_CATEGORY: &str = "category";
const ORDER_QUANTITY: u32 = 1;
const PROGRESS_EVERY: u32 = 25;

/// Rebuilds the commerce tables and fills them with fake data.
#[derive(Debug, Clone)]
pub struct Seeder {
    profile: SeedProfile,
}

struct Inserted {
    products: usize,
    customers: u32,
    orders: u64,
}

impl Seeder {
    pub fn new(profile: SeedProfile) -> Result<Self, SeedError> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &SeedProfile {
        &self.profile
    }

    /// Reset the commerce schema and seed it inside a single unit of work.
    ///
    /// Any failure rolls the whole unit back, leaving the freshly reset
    /// tables empty.
    pub async fn run<F>(&self, pool: &SqlitePool, faker: &mut F) -> Result<SeedReport, SeedError>
    where
        F: FakeData,
    {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let model = commerce_model();

        info!(
            event = "seed_started",
            run_id = %run_id,
            products = self.profile.products,
            customers = self.profile.customers,
            policy = %self.profile.policy,
            seed = self.profile.seed
        );

        reset_schema(pool, &model).await?;

        let mut unit = UnitOfWork::begin(pool).await?;
        let inserted = match self.populate(&mut unit, faker).await {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!(event = "seed_failed", run_id = %run_id, error = %err);
                if let Err(rollback_err) = unit.rollback().await {
                    warn!(event = "seed_rollback_failed", run_id = %run_id, error = %rollback_err);
                }
                return Err(err);
            }
        };
        unit.commit().await?;

        let tables = table_counts(pool, &model).await?;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            event = "seed_completed",
            run_id = %run_id,
            products = inserted.products,
            customers = inserted.customers,
            orders = inserted.orders,
            duration_ms
        );

        Ok(SeedReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            policy: self.profile.policy,
            seed: self.profile.seed,
            tables,
            duration_ms,
        })
    }

    async fn populate<F>(&self, unit: &mut UnitOfWork, faker: &mut F) -> Result<Inserted, SeedError>
    where
        F: FakeData,
    {
        let mut product_ids = Vec::with_capacity(self.profile.products as usize);
        for idx in 0..self.profile.products {
            let product = NewProduct::new(
                format!("Product {idx}"),
                Price::new(PRODUCT_PRICE)?,
                PRODUCT_CATEGORY,
            )?
            .with_description(format!("Description {idx}"));
            product_ids.push(insert_product(unit.conn(), &product).await?);
        }

        let mut orders = 0_u64;
        for idx in 0..self.profile.customers {
            let customer = NewCustomer::new(faker.full_name())
                .with_email(faker.email())
                .with_address(faker.address())
                .with_country_code(CountryCode::new(faker.country_code())?);
            let customer_id = insert_customer(unit.conn(), &customer).await?;

            let number = CardNumber::new(faker.credit_card_number())?;
            let card = NewCreditCard::new(customer_id, number);
            insert_credit_card(unit.conn(), &card).await?;

            let order_count = faker.random_int(self.profile.min_orders, self.profile.max_orders);
            for _ in 0..order_count {
                let product_id = self.pick_product(unit, faker, &product_ids).await?;
                let order = NewOrder::new(customer_id, product_id)
                    .with_quantity(Quantity::new(ORDER_QUANTITY)?);
                insert_order(unit.conn(), &order).await?;
            }
            orders += u64::from(order_count);

            let seeded = idx + 1;
            if seeded % PROGRESS_EVERY == 0 {
                debug!(event = "seed_progress", customers = seeded, orders);
            }
        }

        Ok(Inserted {
            products: product_ids.len(),
            customers: self.profile.customers,
            orders,
        })
    }

    async fn pick_product<F>(
        &self,
        unit: &mut UnitOfWork,
        faker: &mut F,
        inserted: &[ProductId],
    ) -> Result<ProductId, SeedError>
    where
        F: FakeData,
    {
        let picked = match self.profile.policy {
            ProductPolicy::Latest => latest_product_id(&mut *unit.conn()).await?,
            ProductPolicy::Uniform => match inserted.len() {
                0 => None,
                len => {
                    let last = u32::try_from(len - 1).unwrap_or(u32::MAX);
                    inserted.get(faker.random_int(0, last) as usize).copied()
                }
            },
        };
        picked.ok_or_else(|| SeedError::InvalidProfile("no product to order".to_string()))
    }
}
