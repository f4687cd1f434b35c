use serde::{Deserialize, Serialize};

use super::document::normalize_key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub label: String,
    pub description: String,
}

impl PriceRange {
    pub fn new(min: f64, max: f64, label: &str, description: &str) -> Self {
        Self {
            min,
            max,
            average: ((min + max) / 2.0).round(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierLevel {
    Budget,
    Moderate,
    Luxury,
}

impl TierLevel {
    pub const ALL: [TierLevel; 3] = [TierLevel::Budget, TierLevel::Moderate, TierLevel::Luxury];

    /// Resolves a free-form tier label. Unknown, blank or garbled labels resolve
    /// to `Moderate`.
    pub fn from_label(label: &str) -> Self {
        match normalize_key(label).as_str() {
            "budget" | "budgetfriendly" | "cheap" | "low" | "lowcost" | "economy" | "affordable"
            | "backpacker" => TierLevel::Budget,
            "luxury" | "luxurious" | "premium" | "highend" | "expensive" | "deluxe" => {
                TierLevel::Luxury
            }
            "moderate" | "mid" | "midrange" | "standard" | "average" | "comfort" => {
                TierLevel::Moderate
            }
            _ => TierLevel::Moderate,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TierLevel::Budget => "Budget",
            TierLevel::Moderate => "Moderate",
            TierLevel::Luxury => "Luxury",
        }
    }
}

/// One price range per cost category plus a per-person daily envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTier {
    pub level: TierLevel,
    pub accommodation: PriceRange,
    pub meal: PriceRange,
    pub activity: PriceRange,
    pub transport: PriceRange,
    pub daily_min: f64,
    pub daily_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBudgetEstimate {
    pub tier: TierLevel,
    pub travelers: u32,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}
