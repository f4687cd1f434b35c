use crate::models::document::normalize_key;
use crate::models::trip::TripRecord;

/// Point estimates per budget label, in pesos.
const TIER_ESTIMATES: [(&str, f64); 4] = [
    ("cheap", 5_000.0),
    ("budget", 5_000.0),
    ("moderate", 15_000.0),
    ("luxury", 50_000.0),
];

pub const DEFAULT_ESTIMATE: f64 = 10_000.0;

/// Coarse cost estimate for a whole trip.
///
/// A custom budget set by the user is returned as-is. Otherwise the budget
/// label maps to a fixed point estimate. Records only ever carry a label at
/// this point, so no location multiplier is applied.
pub fn estimate_cost(trip: &TripRecord) -> f64 {
    if let Some(custom) = trip.custom_budget() {
        return custom;
    }

    trip.budget_label()
        .map(normalize_key)
        .and_then(|label| {
            TIER_ESTIMATES
                .iter()
                .find(|(tier, _)| *tier == label)
                .map(|(_, estimate)| *estimate)
        })
        .unwrap_or(DEFAULT_ESTIMATE)
}
