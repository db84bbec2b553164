use fake::Fake;
use fake::faker::address::en::CountryCode;
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::{address, internet, name};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use storefront_core::types::{COUNTRY_CODE_LEN, MAX_CARD_NUMBER_LEN};

use crate::faker::FakeData;
use crate::faker::locales::LocaleKey;

const DEFAULT_LOCALE: LocaleKey = LocaleKey::EnUs;
const FALLBACK_COUNTRY_CODE: &str = "US";

/// [`FakeData`] backed by the `fake` crate.
///
/// Every value is drawn from one seeded ChaCha stream, so two sources built
/// with the same seed and locales produce the same sequence.
#[derive(Debug, Clone)]
pub struct FakerSource {
    rng: ChaCha8Rng,
    locales: Vec<LocaleKey>,
}

impl FakerSource {
    pub fn new(seed: u64, locales: &[LocaleKey]) -> Self {
        let locales = if locales.is_empty() {
            vec![DEFAULT_LOCALE]
        } else {
            locales.to_vec()
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            locales,
        }
    }

    fn pick_locale(&mut self) -> LocaleKey {
        if self.locales.len() == 1 {
            return self.locales[0];
        }
        let idx = self.rng.random_range(0..self.locales.len());
        self.locales[idx]
    }
}

impl FakeData for FakerSource {
    fn full_name(&mut self) -> String {
        match self.pick_locale() {
            LocaleKey::EnUs => name::en::Name().fake_with_rng(&mut self.rng),
            LocaleKey::PtBr => name::pt_br::Name().fake_with_rng(&mut self.rng),
        }
    }

    fn email(&mut self) -> String {
        match self.pick_locale() {
            LocaleKey::EnUs => internet::en::SafeEmail().fake_with_rng(&mut self.rng),
            LocaleKey::PtBr => internet::pt_br::SafeEmail().fake_with_rng(&mut self.rng),
        }
    }

    fn address(&mut self) -> String {
        let locale = self.pick_locale();
        let rng = &mut self.rng;
        let (building, street, city, state, zip): (String, String, String, String, String) =
            match locale {
                LocaleKey::EnUs => (
                    address::en::BuildingNumber().fake_with_rng(rng),
                    address::en::StreetName().fake_with_rng(rng),
                    address::en::CityName().fake_with_rng(rng),
                    address::en::StateAbbr().fake_with_rng(rng),
                    address::en::ZipCode().fake_with_rng(rng),
                ),
                LocaleKey::PtBr => (
                    address::pt_br::BuildingNumber().fake_with_rng(rng),
                    address::pt_br::StreetName().fake_with_rng(rng),
                    address::pt_br::CityName().fake_with_rng(rng),
                    address::pt_br::StateAbbr().fake_with_rng(rng),
                    address::pt_br::ZipCode().fake_with_rng(rng),
                ),
            };
        format!("{building} {street}\n{city}, {state} {zip}")
    }

    fn country_code(&mut self) -> String {
        normalize_country_code(CountryCode().fake_with_rng(&mut self.rng))
    }

    fn credit_card_number(&mut self) -> String {
        let raw: String = CreditCardNumber().fake_with_rng(&mut self.rng);
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(MAX_CARD_NUMBER_LEN)
            .collect()
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(low..=high)
    }
}

/// `fake` occasionally yields codes that do not fit `CHAR(2)`.
fn normalize_country_code(code: String) -> String {
    if code.chars().count() == COUNTRY_CODE_LEN {
        return code;
    }
    debug!(
        event = "country_code_fallback",
        generated = %code,
        fallback = FALLBACK_COUNTRY_CODE
    );
    FALLBACK_COUNTRY_CODE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(source: &mut FakerSource) -> Vec<String> {
        vec![
            source.full_name(),
            source.email(),
            source.address(),
            source.country_code(),
            source.credit_card_number(),
            source.random_int(1, 5).to_string(),
        ]
    }

    #[test]
    fn same_seed_same_values() {
        let mut first = FakerSource::new(7, LocaleKey::ALL);
        let mut second = FakerSource::new(7, LocaleKey::ALL);
        for _ in 0..20 {
            assert_eq!(draw(&mut first), draw(&mut second));
        }
    }

    #[test]
    fn values_fit_column_limits() {
        let mut source = FakerSource::new(42, LocaleKey::ALL);
        for _ in 0..200 {
            assert_eq!(source.country_code().chars().count(), COUNTRY_CODE_LEN);
            let number = source.credit_card_number();
            assert!(!number.is_empty());
            assert!(number.len() <= MAX_CARD_NUMBER_LEN);
            assert!(number.chars().all(|ch| ch.is_ascii_digit()));
            assert!(!source.full_name().trim().is_empty());
        }
    }

    #[test]
    fn random_int_is_inclusive() {
        let mut source = FakerSource::new(1, &[]);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let value = source.random_int(1, 3);
            assert!((1..=3).contains(&value));
            seen[(value - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
        assert_eq!(source.random_int(4, 4), 4);
    }

    #[test]
    fn empty_locale_set_falls_back_to_default() {
        let mut empty = FakerSource::new(3, &[]);
        let mut en_us = FakerSource::new(3, &[LocaleKey::EnUs]);
        for _ in 0..10 {
            assert_eq!(draw(&mut empty), draw(&mut en_us));
        }
    }

    #[test]
    fn odd_length_country_codes_fall_back() {
        assert_eq!(normalize_country_code("USA".to_string()), FALLBACK_COUNTRY_CODE);
        assert_eq!(normalize_country_code(String::new()), FALLBACK_COUNTRY_CODE);
        assert_eq!(normalize_country_code("BR".to_string()), "BR");
    }
}
