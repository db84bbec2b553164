//! Core contracts for the storefront data-access layer.
//!
//! This crate defines the entity records, their validated value types, the
//! declarative table catalogue and the typed row sets returned by queries.
//! It carries no engine code; `storefront-store` renders and executes it.

pub mod connection;
pub mod entities;
pub mod error;
pub mod graph;
pub mod model;
pub mod rows;
pub mod types;
pub mod validation;

pub use connection::{ConnectionInfo, describe_connection};
pub use entities::{
    CreditCard, Customer, NewCreditCard, NewCustomer, NewOrder, NewPlayerScore, NewProduct,
    Order, PlayerScore, Product,
};
pub use error::{Error, Result};
pub use graph::creation_order;
pub use model::{
    Cardinality, CheckConstraint, ColumnDef, ColumnType, Constraint, Entity, EntityModel,
    ForeignKey, PrimaryKey, Relation, TableDef, commerce_model, scoring_model,
};
pub use rows::{CountryCount, CustomerCard, CustomerOrderCount, TableCount, TopScore};
pub use types::{
    CardNumber, CountryCode, CreditCardId, CustomerId, OrderId, PlayerName, PlayerScoreId, Price,
    ProductId, Quantity,
};
pub use validation::validate_model;
