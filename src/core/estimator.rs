//! Heuristic resale price estimation.
//!
//! The price starts from a fixed base, is reduced by damped wear factors
//! (mileage, age, accidents), scaled by market factors looked up per brand,
//! fuel type and transmission, and finally perturbed by a small random
//! variation supplied through [`VariationSource`].

use crate::domain::model::{PriceBreakdown, PriceEstimate, VehicleAttributes};
use crate::domain::ports::VariationSource;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const BASE_PRICE: f64 = 25_000.0;
pub const PRICE_FLOOR: f64 = 5_000.0;
pub const MARKET_ADJUSTMENT: f64 = 1.1;
pub const DIRTY_TITLE_FACTOR: f64 = 0.7;
pub const MIN_VARIATION: f64 = 0.95;
pub const MAX_VARIATION: f64 = 1.05;

pub const DEFAULT_BRAND_FACTOR: f64 = 1.0;

const BRAND_FACTORS: &[(&str, f64)] = &[
    ("mercedes-benz", 1.8),
    ("bmw", 1.7),
    ("audi", 1.7),
    ("porsche", 2.2),
    ("lexus", 1.6),
    ("infiniti", 1.4),
    ("acura", 1.3),
    ("tesla", 2.0),
    ("land rover", 1.9),
    ("aston martin", 2.5),
    ("bentley", 3.0),
    ("toyota", 1.2),
    ("honda", 1.15),
    ("ford", 1.0),
    ("chevrolet", 0.95),
    ("dodge", 0.98),
    ("chrysler", 0.97),
    ("jeep", 1.25),
    ("volvo", 1.5),
    ("volkswagen", 1.1),
    ("hyundai", 0.9),
    ("kia", 0.85),
    ("nissan", 0.95),
    ("genesis", 1.3),
    ("lincoln", 1.4),
    ("jaguar", 1.8),
    ("cadillac", 1.5),
    ("mini", 1.2),
    ("subaru", 1.1),
    ("lucid", 2.1),
    ("rivian", 1.9),
    ("hummer", 1.6),
];

// First entry doubles as the fallback.
const FUEL_FACTORS: &[(&str, f64)] = &[
    ("gasoline", 1.0),
    ("diesel", 1.15),
    ("electric", 1.4),
    ("hybrid", 1.25),
];

const TRANSMISSION_FACTORS: &[(&str, f64)] = &[
    ("automatic", 1.1),
    ("manual", 0.95),
    ("cvt", 1.05),
];

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, factor)| *factor)
}

pub fn known_brands() -> impl Iterator<Item = &'static str> {
    BRAND_FACTORS.iter().map(|(name, _)| *name)
}

pub fn brand_factor(brand: &str) -> f64 {
    lookup(BRAND_FACTORS, brand).unwrap_or(DEFAULT_BRAND_FACTOR)
}

pub fn fuel_factor(fuel_type: &str) -> f64 {
    lookup(FUEL_FACTORS, fuel_type).unwrap_or(FUEL_FACTORS[0].1)
}

pub fn transmission_factor(transmission: &str) -> f64 {
    lookup(TRANSMISSION_FACTORS, transmission).unwrap_or(TRANSMISSION_FACTORS[0].1)
}

/// Linear blend of `factor` toward 1.0; `weight` is the share that survives.
fn damp(factor: f64, weight: f64) -> f64 {
    factor * weight + (1.0 - weight)
}

/// Computes every factor and the price before variation and floor.
pub fn breakdown(attrs: &VehicleAttributes) -> PriceBreakdown {
    let mileage_factor = (1.0 - attrs.mileage / 300_000.0).max(0.3);
    let age_factor = (1.0 - attrs.years_used / 25.0).max(0.3);
    let accident_factor = (1.0 - f64::from(attrs.accident_count) * 0.15).max(0.5);

    let brand_factor = brand_factor(&attrs.brand);
    let fuel_factor = fuel_factor(&attrs.fuel_type);
    let transmission_factor = transmission_factor(&attrs.transmission);
    let title_factor = if attrs.clean_title { 1.0 } else { DIRTY_TITLE_FACTOR };

    let pre_variation_price = BASE_PRICE
        * damp(mileage_factor, 0.25)
        * damp(age_factor, 0.3)
        * damp(accident_factor, 0.2)
        * brand_factor
        * fuel_factor
        * transmission_factor
        * title_factor
        * MARKET_ADJUSTMENT;

    PriceBreakdown {
        base_price: BASE_PRICE,
        mileage_factor,
        age_factor,
        accident_factor,
        brand_factor,
        fuel_factor,
        transmission_factor,
        title_factor,
        market_adjustment: MARKET_ADJUSTMENT,
        pre_variation_price,
    }
}

pub struct PriceEstimator<V: VariationSource> {
    variation: V,
}

impl<V: VariationSource> PriceEstimator<V> {
    pub fn new(variation: V) -> Self {
        Self { variation }
    }

    pub fn estimate(&mut self, attrs: &VehicleAttributes) -> PriceEstimate {
        let breakdown = breakdown(attrs);
        let variation = self
            .variation
            .next_variation()
            .clamp(MIN_VARIATION, MAX_VARIATION);
        let price = (breakdown.pre_variation_price * variation).max(PRICE_FLOOR);

        tracing::debug!(
            brand = %attrs.brand,
            pre_variation = breakdown.pre_variation_price,
            variation,
            price,
            "Estimated vehicle price"
        );

        PriceEstimate {
            price,
            variation,
            breakdown,
            estimated_at: Utc::now(),
        }
    }
}

/// Uniform variation drawn from a `StdRng`.
pub struct RandomVariation {
    rng: StdRng,
}

impl RandomVariation {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl VariationSource for RandomVariation {
    fn next_variation(&mut self) -> f64 {
        self.rng.gen_range(MIN_VARIATION..=MAX_VARIATION)
    }
}

/// Always yields the same variation, clamped into the allowed band.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl FixedVariation {
    pub fn neutral() -> Self {
        Self(1.0)
    }
}

impl VariationSource for FixedVariation {
    fn next_variation(&mut self) -> f64 {
        self.0.clamp(MIN_VARIATION, MAX_VARIATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toyota() -> VehicleAttributes {
        VehicleAttributes {
            brand: "toyota".to_string(),
            fuel_type: "gasoline".to_string(),
            transmission: "automatic".to_string(),
            mileage: 0.0,
            years_used: 0.0,
            accident_count: 0,
            clean_title: true,
        }
    }

    fn neutral_estimate(attrs: &VehicleAttributes) -> f64 {
        PriceEstimator::new(FixedVariation::neutral())
            .estimate(attrs)
            .price
    }

    #[test]
    fn test_new_toyota_price_band() {
        // 25000 * 1.2 (brand) * 1.1 (automatic) * 1.1 (market)
        let expected = 36_300.0;
        assert!((neutral_estimate(&toyota()) - expected).abs() < 1e-6);

        let mut estimator = PriceEstimator::new(RandomVariation::seeded(7));
        for _ in 0..200 {
            let price = estimator.estimate(&toyota()).price;
            assert!((expected * 0.95 - 1e-6..=expected * 1.05 + 1e-6).contains(&price));
        }
    }

    #[test]
    fn test_worn_bentley_compounds_every_factor() {
        let attrs = VehicleAttributes {
            brand: "bentley".to_string(),
            mileage: 150_000.0,
            years_used: 10.0,
            accident_count: 2,
            clean_title: false,
            ..toyota()
        };

        let b = breakdown(&attrs);
        assert!((b.mileage_factor - 0.5).abs() < 1e-12);
        assert!((b.age_factor - 0.6).abs() < 1e-12);
        assert!((b.accident_factor - 0.7).abs() < 1e-12);
        assert_eq!(b.brand_factor, 3.0);
        assert_eq!(b.title_factor, 0.7);

        // 25000 * 0.875 * 0.88 * 0.94 * 3.0 * 1.0 * 1.1 * 0.7 * 1.1
        let expected = 45_979.395;
        assert!((neutral_estimate(&attrs) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_decay_factors_bottom_out() {
        let attrs = VehicleAttributes {
            mileage: 1_000_000.0,
            years_used: 80.0,
            accident_count: 10,
            ..toyota()
        };
        let b = breakdown(&attrs);
        assert_eq!(b.mileage_factor, 0.3);
        assert_eq!(b.age_factor, 0.3);
        assert_eq!(b.accident_factor, 0.5);
    }

    #[test]
    fn test_price_never_below_floor() {
        let attrs = VehicleAttributes {
            brand: "kia".to_string(),
            transmission: "manual".to_string(),
            mileage: 900_000.0,
            years_used: 40.0,
            accident_count: 9,
            clean_title: false,
            ..toyota()
        };
        let mut estimator = PriceEstimator::new(FixedVariation(0.95));
        let estimate = estimator.estimate(&attrs);
        assert!(estimate.price >= PRICE_FLOOR);
        assert!(estimate.price <= estimate.breakdown.pre_variation_price);

        let mut estimator = PriceEstimator::new(RandomVariation::seeded(3));
        for brand in known_brands() {
            let attrs = VehicleAttributes {
                brand: brand.to_string(),
                ..attrs.clone()
            };
            assert!(estimator.estimate(&attrs).price >= PRICE_FLOOR);
        }
    }

    #[test]
    fn test_wear_never_raises_price() {
        let base = toyota();
        let mut previous = f64::INFINITY;
        for mileage in (0..=400_000).step_by(25_000) {
            let price = breakdown(&VehicleAttributes {
                mileage: mileage as f64,
                ..base.clone()
            })
            .pre_variation_price;
            assert!(price <= previous);
            previous = price;
        }

        let mut previous = f64::INFINITY;
        for years in 0..=30 {
            let price = breakdown(&VehicleAttributes {
                years_used: years as f64,
                ..base.clone()
            })
            .pre_variation_price;
            assert!(price <= previous);
            previous = price;
        }

        let mut previous = f64::INFINITY;
        for accidents in 0..=6 {
            let price = breakdown(&VehicleAttributes {
                accident_count: accidents,
                ..base.clone()
            })
            .pre_variation_price;
            assert!(price <= previous);
            previous = price;
        }
    }

    #[test]
    fn test_unknown_categories_use_defaults() {
        assert_eq!(brand_factor("yugo"), DEFAULT_BRAND_FACTOR);
        assert_eq!(fuel_factor("hydrogen"), 1.0);
        assert_eq!(transmission_factor("sequential"), 1.1);

        let attrs = VehicleAttributes {
            brand: "Yugo".to_string(),
            fuel_type: "hydrogen".to_string(),
            transmission: "sequential".to_string(),
            ..toyota()
        };
        let b = breakdown(&attrs);
        assert_eq!(b.brand_factor, 1.0);
        assert_eq!(b.fuel_factor, 1.0);
        assert_eq!(b.transmission_factor, 1.1);
    }

    #[test]
    fn test_lookups_ignore_case_and_padding() {
        assert_eq!(brand_factor("  Land Rover "), 1.9);
        assert_eq!(brand_factor("MERCEDES-BENZ"), 1.8);
        assert_eq!(fuel_factor("Electric"), 1.4);
        assert_eq!(transmission_factor("CVT"), 1.05);
        assert_eq!(known_brands().count(), 32);
    }

    #[test]
    fn test_dirty_title_is_seventy_percent() {
        let clean = neutral_estimate(&toyota());
        let dirty = neutral_estimate(&VehicleAttributes {
            clean_title: false,
            ..toyota()
        });
        assert!((dirty - clean * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_variation_is_repeatable() {
        let mut estimator = PriceEstimator::new(FixedVariation(1.02));
        let first = estimator.estimate(&toyota()).price;
        let second = estimator.estimate(&toyota()).price;
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PriceEstimator::new(RandomVariation::seeded(42));
        let mut b = PriceEstimator::new(RandomVariation::seeded(42));
        for _ in 0..10 {
            assert_eq!(a.estimate(&toyota()).price, b.estimate(&toyota()).price);
        }
    }

    #[test]
    fn test_out_of_band_variation_is_clamped() {
        let estimate = PriceEstimator::new(FixedVariation(2.0)).estimate(&toyota());
        assert_eq!(estimate.variation, MAX_VARIATION);
        assert_eq!(estimate.formatted_price(), format!("{:.2}", 36_300.0 * 1.05));
    }
}
