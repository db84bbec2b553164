//! Sources of fake customer data.

mod adapter;
mod locales;

pub use adapter::FakerSource;
pub use locales::LocaleKey;

/// Supplier of fake values for seeding.
///
/// Values are raw strings; the seeder validates them through the entity
/// newtypes before anything is written.
pub trait FakeData {
    fn full_name(&mut self) -> String;

    fn email(&mut self) -> String;

    /// Postal address; may span several lines.
    fn address(&mut self) -> String;

    fn country_code(&mut self) -> String;

    fn credit_card_number(&mut self) -> String;

    /// Uniform integer in `min..=max`.
    fn random_int(&mut self, min: u32, max: u32) -> u32;
}
