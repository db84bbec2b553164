//! SQLite persistence for the storefront entity model.
//!
//! The pool handle is always passed in explicitly: schema management,
//! inserts and queries are free functions over an executor, with
//! [`SqliteAdapter`] and [`ScoreService`] as thin owners of a pool.

pub mod adapter;
mod errors;
pub mod options;
pub mod scores;
pub mod sqlite;
pub mod unit;

pub use adapter::{CustomerSort, QueryLayer};
pub use errors::map_db_error;
pub use options::{StoreOptions, connect, connect_in_memory};
pub use scores::ScoreService;
pub use sqlite::{
    SqliteAdapter, all_customers, country_counts, credit_card_of_customer, customer_by_id,
    customer_cards, customer_of_card, customer_of_order, customer_order_counts,
    customers_by_country, ensure_schema, insert_credit_card, insert_customer, insert_order,
    insert_player_score, insert_product, latest_product_id, orders_of_customer,
    orders_of_product, product_by_id, product_of_order, reset_schema, table_counts, top_scores,
};
pub use unit::UnitOfWork;

pub use sqlx::SqlitePool;
pub use storefront_core::{Error, Result};
