//! Reference price data.
//!
//! All amounts are in Philippine pesos. Ranges are per person: accommodation
//! per night, meals per meal, activities per activity, transport per day.
//! Multipliers scale a base price for regional and destination cost levels.

use std::collections::HashMap;

use crate::models::document::normalize_key;
use crate::models::pricing::{BudgetTier, PriceRange, TierLevel};

/// Regional cost index, keyed by normalized region name.
const REGIONAL_MULTIPLIERS: [(&str, f64); 22] = [
    ("ncr", 1.20),
    ("metromanila", 1.20),
    ("car", 0.85),
    ("cordillera", 0.85),
    ("ilocos", 0.85),
    ("cagayanvalley", 0.80),
    ("centralluzon", 0.95),
    ("calabarzon", 1.00),
    ("mimaropa", 0.90),
    ("bicol", 0.80),
    ("westernvisayas", 0.85),
    ("centralvisayas", 1.00),
    ("easternvisayas", 0.75),
    ("negrosisland", 0.85),
    ("zamboangapeninsula", 0.75),
    ("northernmindanao", 0.80),
    ("davaoregion", 0.90),
    ("davao", 0.90),
    ("soccsksargen", 0.75),
    ("caraga", 0.70),
    ("barmm", 0.70),
    ("bangsamoro", 0.70),
];

/// Destination premiums, keyed by lowercase trimmed name.
const DESTINATION_MULTIPLIERS: [(&str, f64); 16] = [
    ("siargao", 1.25),
    ("boracay", 1.40),
    ("el nido", 1.35),
    ("coron", 1.30),
    ("batanes", 1.45),
    ("palawan", 1.20),
    ("puerto princesa", 1.10),
    ("manila", 1.15),
    ("cebu", 1.10),
    ("bohol", 1.05),
    ("baguio", 1.00),
    ("la union", 1.00),
    ("vigan", 0.95),
    ("davao", 0.95),
    ("camiguin", 0.90),
    ("sagada", 0.90),
];

/// City premiums, keyed exactly as the city is written.
const CITY_MULTIPLIERS: [(&str, f64); 12] = [
    ("Makati City", 1.30),
    ("Makati", 1.30),
    ("BGC", 1.35),
    ("Taguig", 1.25),
    ("Pasay", 1.15),
    ("Quezon City", 1.05),
    ("Cebu City", 1.10),
    ("Lapu-Lapu City", 1.15),
    ("Davao City", 0.95),
    ("Iloilo City", 0.90),
    ("Cagayan de Oro", 0.85),
    ("Dumaguete", 0.85),
];

/// Immutable price reference data. Built once and shared by reference, so
/// callers can substitute their own tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTables {
    pub budget: BudgetTier,
    pub moderate: BudgetTier,
    pub luxury: BudgetTier,
    pub regional: HashMap<String, f64>,
    pub destinations: HashMap<String, f64>,
    pub cities: HashMap<String, f64>,
}

impl PriceTables {
    pub fn tier(&self, level: TierLevel) -> &BudgetTier {
        match level {
            TierLevel::Budget => &self.budget,
            TierLevel::Moderate => &self.moderate,
            TierLevel::Luxury => &self.luxury,
        }
    }

    /// Replaces the regional index. Keys are normalized on insert.
    pub fn with_regional(mut self, entries: &[(&str, f64)]) -> Self {
        self.regional = entries
            .iter()
            .map(|(name, factor)| (normalize_key(name), *factor))
            .collect();
        self
    }

    /// Replaces the destination table. Keys are lowercased and trimmed on insert.
    pub fn with_destinations(mut self, entries: &[(&str, f64)]) -> Self {
        self.destinations = entries
            .iter()
            .map(|(name, factor)| (name.trim().to_lowercase(), *factor))
            .collect();
        self
    }

    pub fn with_cities(mut self, entries: &[(&str, f64)]) -> Self {
        self.cities = entries
            .iter()
            .map(|(name, factor)| (name.to_string(), *factor))
            .collect();
        self
    }
}

impl Default for PriceTables {
    fn default() -> Self {
        let tables = Self {
            budget: BudgetTier {
                level: TierLevel::Budget,
                accommodation: PriceRange::new(
                    800.0,
                    2500.0,
                    "Budget",
                    "Hostels, guesthouses and basic inns",
                ),
                meal: PriceRange::new(100.0, 300.0, "Budget", "Carinderias and street food"),
                activity: PriceRange::new(
                    0.0,
                    1500.0,
                    "Budget",
                    "Free sights, beaches and shared group tours",
                ),
                transport: PriceRange::new(
                    100.0,
                    500.0,
                    "Budget",
                    "Jeepneys, tricycles and public buses",
                ),
                daily_min: 1500.0,
                daily_max: 3500.0,
            },
            moderate: BudgetTier {
                level: TierLevel::Moderate,
                accommodation: PriceRange::new(
                    2500.0,
                    6000.0,
                    "Moderate",
                    "Mid-range hotels and resorts",
                ),
                meal: PriceRange::new(300.0, 800.0, "Moderate", "Casual dining restaurants"),
                activity: PriceRange::new(
                    1500.0,
                    4000.0,
                    "Moderate",
                    "Island hopping and guided tours",
                ),
                transport: PriceRange::new(
                    500.0,
                    1500.0,
                    "Moderate",
                    "Taxis, ride-hailing and van transfers",
                ),
                daily_min: 4000.0,
                daily_max: 9000.0,
            },
            luxury: BudgetTier {
                level: TierLevel::Luxury,
                accommodation: PriceRange::new(
                    8000.0,
                    25000.0,
                    "Luxury",
                    "Five-star hotels and private villas",
                ),
                meal: PriceRange::new(1000.0, 3500.0, "Luxury", "Fine dining"),
                activity: PriceRange::new(
                    4000.0,
                    12000.0,
                    "Luxury",
                    "Private tours and exclusive experiences",
                ),
                transport: PriceRange::new(
                    2000.0,
                    6000.0,
                    "Luxury",
                    "Private car hire and domestic flights",
                ),
                daily_min: 12000.0,
                daily_max: 35000.0,
            },
            regional: HashMap::new(),
            destinations: HashMap::new(),
            cities: HashMap::new(),
        };

        tables
            .with_regional(&REGIONAL_MULTIPLIERS)
            .with_destinations(&DESTINATION_MULTIPLIERS)
            .with_cities(&CITY_MULTIPLIERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_ordered_by_tier() {
        let tables = PriceTables::default();
        for level in [TierLevel::Budget, TierLevel::Moderate] {
            let cheaper = tables.tier(level);
            let pricier = match level {
                TierLevel::Budget => tables.tier(TierLevel::Moderate),
                _ => tables.tier(TierLevel::Luxury),
            };
            assert!(cheaper.daily_max <= pricier.daily_max);
            assert!(cheaper.accommodation.average < pricier.accommodation.average);
        }
    }

    #[test]
    fn test_reference_multipliers() {
        let tables = PriceTables::default();
        assert_eq!(tables.regional.get("caraga"), Some(&0.70));
        assert_eq!(tables.destinations.get("siargao"), Some(&1.25));
        assert_eq!(tables.destinations.get("el nido"), Some(&1.35));
        assert_eq!(tables.cities.get("Cebu City"), Some(&1.10));
    }

    #[test]
    fn test_fixture_tables_replace_defaults() {
        let tables = PriceTables::default().with_regional(&[("Test Region", 2.0)]);
        assert_eq!(tables.regional.len(), 1);
        assert_eq!(tables.regional.get("testregion"), Some(&2.0));
    }
}
