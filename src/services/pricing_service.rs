use crate::models::document::normalize_key;
use crate::models::pricing::{BudgetTier, DailyBudgetEstimate, PriceRange, TierLevel};
use crate::services::price_tables::PriceTables;

/// Meals budgeted per person per day in a daily estimate.
const MEALS_PER_DAY: f64 = 3.0;

pub struct PricingService<'a> {
    tables: &'a PriceTables,
}

impl<'a> PricingService<'a> {
    pub fn new(tables: &'a PriceTables) -> Self {
        Self { tables }
    }

    /// Regional cost index for `region`, 1.0 when unknown or blank.
    pub fn regional_multiplier(&self, region: Option<&str>) -> f64 {
        region
            .map(normalize_key)
            .filter(|key| !key.is_empty())
            .and_then(|key| self.tables.regional.get(&key).copied())
            .unwrap_or(1.0)
    }

    /// Destination premium: destination names first, then city names as written.
    pub fn destination_multiplier(&self, destination: Option<&str>) -> f64 {
        let Some(destination) = destination.map(str::trim).filter(|d| !d.is_empty()) else {
            return 1.0;
        };

        self.tables
            .destinations
            .get(&destination.to_lowercase())
            .or_else(|| self.tables.cities.get(destination))
            .copied()
            .unwrap_or(1.0)
    }

    /// Scale a base price by regional and destination multipliers, rounded to
    /// the nearest whole peso.
    pub fn adjusted_price(
        &self,
        base_price: f64,
        region: Option<&str>,
        destination: Option<&str>,
    ) -> f64 {
        let regional = self.regional_multiplier(region);
        let destination = self.destination_multiplier(destination);
        (base_price * regional * destination).round()
    }

    /// Full bundle for a tier label; unknown labels get the moderate tier.
    pub fn budget_tier(&self, label: &str) -> &'a BudgetTier {
        self.tables.tier(TierLevel::from_label(label))
    }

    pub fn accommodation_range_for_tier(&self, label: &str) -> &'a PriceRange {
        &self.budget_tier(label).accommodation
    }

    pub fn meal_range_for_tier(&self, label: &str) -> &'a PriceRange {
        &self.budget_tier(label).meal
    }

    pub fn activity_range_for_tier(&self, label: &str) -> &'a PriceRange {
        &self.budget_tier(label).activity
    }

    pub fn transport_range_for_tier(&self, label: &str) -> &'a PriceRange {
        &self.budget_tier(label).transport
    }

    /// Daily spend for a party: the tier's per-person envelope and a typical
    /// day (a night's stay, three meals, one activity, local transport), each
    /// adjusted for location and multiplied by party size.
    pub fn estimate_daily_budget(
        &self,
        label: &str,
        region: Option<&str>,
        destination: Option<&str>,
        travelers: u32,
    ) -> DailyBudgetEstimate {
        let tier = self.budget_tier(label);
        let travelers = travelers.max(1);
        let party = f64::from(travelers);

        let typical_day = tier.accommodation.average
            + tier.meal.average * MEALS_PER_DAY
            + tier.activity.average
            + tier.transport.average;

        DailyBudgetEstimate {
            tier: tier.level,
            travelers,
            min: self.adjusted_price(tier.daily_min, region, destination) * party,
            max: self.adjusted_price(tier.daily_max, region, destination) * party,
            average: self.adjusted_price(typical_day, region, destination) * party,
        }
    }
}
