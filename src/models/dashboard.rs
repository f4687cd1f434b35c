use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub label: String,
    pub trips: u32,
    pub users: u32,
}

/// A `{name, value}` row, the shape the chart components consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub value: u32,
}

impl NamedCount {
    pub fn new(name: &str, value: u32) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyComparison {
    pub trips_this_week: u32,
    pub trips_last_week: u32,
    pub users_this_week: u32,
    pub users_last_week: u32,
    pub trip_growth: i64,
    pub user_growth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularDestination {
    pub name: String,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub completed: u32,
    pub partial: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total_trips: u32,
    pub total_users: u32,
    pub complete_profiles: u32,
    pub statuses: StatusBreakdown,
    pub average_optimization_score: f64,
    pub total_estimated_cost: f64,
    pub average_estimated_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: DashboardTotals,
    pub time_series: Vec<DailyActivity>,
    pub budget_distribution: Vec<NamedCount>,
    pub duration_buckets: Vec<NamedCount>,
    pub travelers_distribution: Vec<NamedCount>,
    pub weekly: WeeklyComparison,
    pub popular_destinations: Vec<PopularDestination>,
}
