//! Fake-data seeding for the commerce tables.

pub mod engine;
pub mod errors;
pub mod faker;
pub mod model;

pub use engine::Seeder;
pub use errors::SeedError;
pub use faker::{FakeData, FakerSource, LocaleKey};
pub use model::{ProductPolicy, SeedProfile, SeedReport};
