use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::dashboard::{
    DailyActivity, DashboardSummary, DashboardTotals, NamedCount, PopularDestination,
    StatusBreakdown, WeeklyComparison,
};
use crate::models::pricing::TierLevel;
use crate::models::trip::{NormalizedTripMetrics, TripRecord, TripStatus};
use crate::models::user::UserRecord;
use crate::services::trip_metrics_service::TripMetricsService;

const DEFAULT_WINDOW_DAYS: u32 = 30;
const DEFAULT_WEEK_DAYS: u32 = 7;
const DEFAULT_TOP_DESTINATIONS: usize = 3;
/// Longest window or week accepted from configuration.
pub const MAX_CONFIG_DAYS: u32 = 3650;

/// Duration bands as `(label, first day, last day)`.
const DURATION_BANDS: [(&str, u32, u32); 4] = [
    ("1-3 days", 1, 3),
    ("4-7 days", 4, 7),
    ("8-14 days", 8, 14),
    ("15+ days", 15, u32::MAX),
];

const TRAVELER_CATEGORIES: [&str; 4] = ["Solo", "Couple", "Family", "Group"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Calendar days in the activity time series
    pub window_days: u32,
    /// Days in each of the two weeks compared for growth
    pub week_days: u32,
    /// Number of destinations ranked
    pub top_destinations: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            week_days: DEFAULT_WEEK_DAYS,
            top_destinations: DEFAULT_TOP_DESTINATIONS,
        }
    }
}

impl DashboardConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            window_days: days_from_env("DASHBOARD_WINDOW_DAYS").unwrap_or(defaults.window_days),
            week_days: days_from_env("DASHBOARD_WEEK_DAYS").unwrap_or(defaults.week_days),
            top_destinations: std::env::var("DASHBOARD_TOP_DESTINATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.top_destinations),
        }
    }
}

/// Day counts outside `1..=MAX_CONFIG_DAYS` are ignored.
fn days_from_env(var: &str) -> Option<u32> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|days: &u32| (1..=MAX_CONFIG_DAYS).contains(days))
}

/// Folds trip and user snapshots into the operator dashboard.
///
/// The fold never mutates its inputs and depends only on them, `now` and the
/// viewer's UTC offset, so the same snapshot always yields the same summary.
#[derive(Default)]
pub struct DashboardService {
    pub config: DashboardConfig,
}

impl DashboardService {
    pub fn new() -> Self {
        let config = DashboardConfig::from_env();
        log::info!("DashboardService initialized with config: {:?}", config);
        Self { config }
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn summarize(
        &self,
        trips: &[TripRecord],
        users: &[UserRecord],
        now: DateTime<Utc>,
        viewer_offset: FixedOffset,
    ) -> DashboardSummary {
        let metrics: Vec<NormalizedTripMetrics> =
            trips.iter().map(TripMetricsService::normalize).collect();

        let trip_dates: Vec<Option<DateTime<Utc>>> =
            trips.iter().map(TripRecord::created_at).collect();
        let user_dates: Vec<Option<DateTime<Utc>>> =
            users.iter().map(UserRecord::created_at).collect();

        DashboardSummary {
            totals: self.totals(&metrics, users),
            time_series: self.time_series(&trip_dates, &user_dates, now, viewer_offset),
            budget_distribution: budget_distribution(trips),
            duration_buckets: duration_buckets(&metrics),
            travelers_distribution: travelers_distribution(trips),
            weekly: self.weekly_comparison(&trip_dates, &user_dates, now),
            popular_destinations: self.popular_destinations(trips),
        }
    }

    fn totals(&self, metrics: &[NormalizedTripMetrics], users: &[UserRecord]) -> DashboardTotals {
        let mut statuses = StatusBreakdown {
            completed: 0,
            partial: 0,
            failed: 0,
        };
        for trip in metrics {
            match trip.status {
                TripStatus::Completed => statuses.completed += 1,
                TripStatus::Partial => statuses.partial += 1,
                TripStatus::Failed => statuses.failed += 1,
            }
        }

        let trip_count = metrics.len();
        let score_sum: f64 = metrics
            .iter()
            .map(|trip| f64::from(trip.optimization_score))
            .sum();
        let total_estimated_cost: f64 = metrics.iter().map(|trip| trip.estimated_cost).sum();

        let (average_optimization_score, average_estimated_cost) = if trip_count > 0 {
            (
                (score_sum / trip_count as f64 * 10.0).round() / 10.0,
                (total_estimated_cost / trip_count as f64).round(),
            )
        } else {
            (0.0, 0.0)
        };

        DashboardTotals {
            total_trips: to_count(trip_count),
            total_users: to_count(users.len()),
            complete_profiles: to_count(users.iter().filter(|u| u.is_profile_complete()).count()),
            statuses,
            average_optimization_score,
            total_estimated_cost,
            average_estimated_cost,
        }
    }

    /// One bucket per calendar day in the viewer's offset, oldest first,
    /// ending today. Empty days are kept.
    pub fn time_series(
        &self,
        trip_dates: &[Option<DateTime<Utc>>],
        user_dates: &[Option<DateTime<Utc>>],
        now: DateTime<Utc>,
        viewer_offset: FixedOffset,
    ) -> Vec<DailyActivity> {
        let today = now.with_timezone(&viewer_offset).date_naive();
        let window = i64::from(self.config.window_days.clamp(1, MAX_CONFIG_DAYS));
        let first_day = today
            .checked_sub_signed(Duration::days(window - 1))
            .unwrap_or(NaiveDate::MIN);

        let mut series: Vec<DailyActivity> = (0..window)
            .map(|offset| {
                let date = first_day + Duration::days(offset);
                DailyActivity {
                    date,
                    label: date.format("%b %-d").to_string(),
                    trips: 0,
                    users: 0,
                }
            })
            .collect();

        let bucket = |created: &DateTime<Utc>| -> Option<usize> {
            let day: NaiveDate = created.with_timezone(&viewer_offset).date_naive();
            let index = (day - first_day).num_days();
            (0..window).contains(&index).then_some(index as usize)
        };

        for index in trip_dates.iter().flatten().filter_map(|d| bucket(d)) {
            series[index].trips += 1;
        }
        for index in user_dates.iter().flatten().filter_map(|d| bucket(d)) {
            series[index].users += 1;
        }

        series
    }

    /// Creations in the trailing week against the week before it.
    pub fn weekly_comparison(
        &self,
        trip_dates: &[Option<DateTime<Utc>>],
        user_dates: &[Option<DateTime<Utc>>],
        now: DateTime<Utc>,
    ) -> WeeklyComparison {
        let week = Duration::days(i64::from(self.config.week_days.clamp(1, MAX_CONFIG_DAYS)));
        let this_week_start = now.checked_sub_signed(week).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let last_week_start = this_week_start
            .checked_sub_signed(week)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let split = |dates: &[Option<DateTime<Utc>>]| -> (u32, u32) {
            dates.iter().flatten().fold((0, 0), |(this, last), created| {
                if *created >= this_week_start && *created <= now {
                    (this + 1, last)
                } else if *created >= last_week_start && *created < this_week_start {
                    (this, last + 1)
                } else {
                    (this, last)
                }
            })
        };

        let (trips_this_week, trips_last_week) = split(trip_dates);
        let (users_this_week, users_last_week) = split(user_dates);

        WeeklyComparison {
            trips_this_week,
            trips_last_week,
            users_this_week,
            users_last_week,
            trip_growth: growth_percentage(trips_this_week, trips_last_week),
            user_growth: growth_percentage(users_this_week, users_last_week),
        }
    }

    /// Most planned destinations. Equal counts keep the order destinations
    /// were first seen in.
    pub fn popular_destinations(&self, trips: &[TripRecord]) -> Vec<PopularDestination> {
        let mut order: Vec<(&str, u32)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for destination in trips.iter().filter_map(TripRecord::destination) {
            match positions.get(destination) {
                Some(&index) => order[index].1 += 1,
                None => {
                    positions.insert(destination, order.len());
                    order.push((destination, 1));
                }
            }
        }

        // stable: ties stay in encounter order
        order.sort_by(|a, b| b.1.cmp(&a.1));

        let total = trips.len() as f64;
        order
            .into_iter()
            .take(self.config.top_destinations)
            .map(|(name, count)| PopularDestination {
                name: name.to_string(),
                count,
                percentage: (f64::from(count) / total * 100.0).round() as u32,
            })
            .collect()
    }
}

/// Week-over-week growth in whole percent. An empty previous week reads as
/// 100% growth when anything happened this week, 0% otherwise.
pub fn growth_percentage(this_week: u32, last_week: u32) -> i64 {
    if last_week == 0 {
        return if this_week > 0 { 100 } else { 0 };
    }

    let change = f64::from(this_week) - f64::from(last_week);
    (change / f64::from(last_week) * 100.0).round() as i64
}

/// Trips per budget tier, labels resolved the same way price lookups resolve
/// them. Unrecognized labels count as Moderate; trips without a label are
/// left out.
pub fn budget_distribution(trips: &[TripRecord]) -> Vec<NamedCount> {
    let mut counts: HashMap<TierLevel, u32> = HashMap::new();
    for tier in trips
        .iter()
        .filter_map(TripRecord::budget_label)
        .map(TierLevel::from_label)
    {
        *counts.entry(tier).or_default() += 1;
    }

    TierLevel::ALL
        .iter()
        .map(|tier| NamedCount::new(tier.display_name(), counts.get(tier).copied().unwrap_or(0)))
        .collect()
}

pub fn duration_buckets(metrics: &[NormalizedTripMetrics]) -> Vec<NamedCount> {
    DURATION_BANDS
        .iter()
        .map(|(label, first, last)| {
            let count = metrics
                .iter()
                .filter(|trip| (*first..=*last).contains(&trip.duration_days))
                .count();
            NamedCount::new(label, to_count(count))
        })
        .collect()
}

/// Trips per traveler category. Labels outside the four categories are left
/// out of this breakdown only.
pub fn travelers_distribution(trips: &[TripRecord]) -> Vec<NamedCount> {
    let mut counts = [0u32; TRAVELER_CATEGORIES.len()];
    for trip in trips {
        if let Some(index) = trip.traveler_label().and_then(traveler_category) {
            counts[index] += 1;
        }
    }

    TRAVELER_CATEGORIES
        .iter()
        .zip(counts)
        .map(|(name, value)| NamedCount::new(name, value))
        .collect()
}

fn traveler_category(label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    TRAVELER_CATEGORIES
        .iter()
        .position(|category| label.contains(&category.to_lowercase()))
}

fn to_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn trip_created(at: DateTime<Utc>) -> TripRecord {
        TripRecord::new(json!({ "createdAt": at.to_rfc3339() }))
    }

    fn trips(docs: Vec<Value>) -> Vec<TripRecord> {
        docs.into_iter().map(TripRecord::new).collect()
    }

    #[test]
    fn test_growth_never_divides_by_zero() {
        assert_eq!(growth_percentage(0, 0), 0);
        assert_eq!(growth_percentage(5, 0), 100);
        assert_eq!(growth_percentage(6, 4), 50);
        assert_eq!(growth_percentage(1, 4), -75);
        assert_eq!(growth_percentage(1, 3), -67);
    }

    #[test]
    fn test_time_series_keeps_empty_days() {
        let service = DashboardService::default();
        let first_day = now() - Duration::days(29);
        let records = vec![trip_created(first_day), trip_created(now())];
        let dates: Vec<_> = records.iter().map(TripRecord::created_at).collect();

        let series = service.time_series(&dates, &[], now(), utc_offset());

        assert_eq!(series.len(), 30);
        assert_eq!(series[0].trips, 1);
        assert_eq!(series[29].trips, 1);
        assert_eq!(series.iter().map(|day| day.trips).sum::<u32>(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(series[29].label, "Jun 30");
    }

    #[test]
    fn test_time_series_uses_viewer_offset() {
        let service = DashboardService::default();
        // 23:30 UTC on Jun 29 is already Jun 30 in Manila
        let late = Utc.with_ymd_and_hms(2025, 6, 29, 23, 30, 0).unwrap();
        let manila = FixedOffset::east_opt(8 * 3600).unwrap();

        let series = service.time_series(&[Some(late)], &[], now(), manila);
        assert_eq!(series[29].date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(series[29].trips, 1);

        let series = service.time_series(&[Some(late)], &[], now(), utc_offset());
        assert_eq!(series[28].trips, 1);
    }

    #[test]
    fn test_time_series_ignores_out_of_window_and_undated() {
        let service = DashboardService::default();
        let old = now() - Duration::days(45);
        let future = now() + Duration::days(3);

        let series = service.time_series(&[Some(old), Some(future), None], &[None], now(), utc_offset());
        assert!(series.iter().all(|day| day.trips == 0 && day.users == 0));
    }

    #[test]
    fn test_weekly_comparison() {
        let service = DashboardService::default();
        let dates = vec![
            Some(now() - Duration::days(1)),
            Some(now() - Duration::days(6)),
            Some(now() - Duration::days(8)),
            Some(now() - Duration::days(20)),
            None,
        ];
        let users = vec![Some(now() - Duration::hours(2))];

        let weekly = service.weekly_comparison(&dates, &users, now());
        assert_eq!(weekly.trips_this_week, 2);
        assert_eq!(weekly.trips_last_week, 1);
        assert_eq!(weekly.trip_growth, 100);
        assert_eq!(weekly.users_this_week, 1);
        assert_eq!(weekly.users_last_week, 0);
        assert_eq!(weekly.user_growth, 100);
    }

    #[test]
    fn test_weekly_comparison_edges() {
        let service = DashboardService::default();
        let dates = vec![
            Some(now()),
            Some(now() - Duration::days(7)),
            Some(now() - Duration::days(7) - Duration::seconds(1)),
            Some(now() - Duration::days(14)),
            Some(now() - Duration::days(14) - Duration::seconds(1)),
            Some(now() + Duration::seconds(1)),
        ];

        let weekly = service.weekly_comparison(&dates, &[], now());
        assert_eq!(weekly.trips_this_week, 2);
        assert_eq!(weekly.trips_last_week, 2);
        assert_eq!(weekly.trip_growth, 0);
    }

    #[test]
    fn test_oversized_config_does_not_panic() {
        let service = DashboardService::with_config(DashboardConfig {
            window_days: 200_000_000,
            week_days: 200_000_000,
            top_destinations: 3,
        });
        let dates = vec![Some(now() - Duration::days(1))];

        let weekly = service.weekly_comparison(&dates, &dates, now());
        assert_eq!(weekly.trips_this_week, 1);

        let series = service.time_series(&dates, &[], now(), utc_offset());
        assert_eq!(series.len(), MAX_CONFIG_DAYS as usize);
        assert_eq!(series.iter().map(|day| day.trips).sum::<u32>(), 1);
    }

    #[test]
    fn test_budget_distribution_normalizes_labels() {
        let records = trips(vec![
            json!({ "userSelection": { "budget": "Budget-Friendly" } }),
            json!({ "userSelection": { "budget": "cheap" } }),
            json!({ "userSelection": { "budget": "LUXURY" } }),
            json!({ "userSelection": { "budget": "no idea" } }),
            json!({}),
            json!({ "userSelection": { "budget": "  " } }),
        ]);

        assert_eq!(
            budget_distribution(&records),
            vec![
                NamedCount::new("Budget", 2),
                NamedCount::new("Moderate", 1),
                NamedCount::new("Luxury", 1),
            ]
        );
    }

    #[test]
    fn test_duration_buckets() {
        let records = trips(vec![
            json!({ "userSelection": { "duration": 1 } }),
            json!({ "userSelection": { "duration": 3 } }),
            json!({ "userSelection": { "duration": 4 } }),
            json!({ "userSelection": { "duration": 14 } }),
            json!({ "userSelection": { "duration": 30 } }),
            json!({}),
        ]);
        let metrics: Vec<_> = records.iter().map(TripMetricsService::normalize).collect();

        let values: Vec<u32> = duration_buckets(&metrics).iter().map(|b| b.value).collect();
        assert_eq!(values, vec![3, 1, 1, 1]);
    }

    #[test]
    fn test_travelers_distribution_drops_unknown_labels() {
        let records = trips(vec![
            json!({ "userSelection": { "traveler": "Solo" } }),
            json!({ "userSelection": { "traveler": "A Couple" } }),
            json!({ "userSelection": { "traveler": "family" } }),
            json!({ "userSelection": { "traveler": "Friends" } }),
            json!({ "userSelection": { "traveler": "Group of friends" } }),
            json!({}),
        ]);

        let rows = travelers_distribution(&records);
        let total: u32 = rows.iter().map(|row| row.value).sum();
        assert_eq!(total, 4);
        assert_eq!(rows[3], NamedCount::new("Group", 1));
    }

    #[test]
    fn test_popular_destinations_ties_keep_encounter_order() {
        let service = DashboardService::default();
        let records = trips(vec![
            json!({ "destination": "Cebu" }),
            json!({ "destination": "Bohol" }),
            json!({ "destination": "Siargao" }),
            json!({ "destination": "Bohol" }),
            json!({ "destination": "Palawan" }),
            json!({ "destination": "Siargao" }),
            json!({}),
        ]);

        let ranked = service.popular_destinations(&records);
        let names: Vec<&str> = ranked.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bohol", "Siargao", "Cebu"]);
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[0].percentage, 29);
        assert_eq!(ranked[2].percentage, 14);
    }

    #[test]
    fn test_summarize_empty_snapshot() {
        let service = DashboardService::default();
        let summary = service.summarize(&[], &[], now(), utc_offset());

        assert_eq!(summary.totals.total_trips, 0);
        assert_eq!(summary.totals.average_optimization_score, 0.0);
        assert_eq!(summary.time_series.len(), 30);
        assert_eq!(summary.weekly.trip_growth, 0);
        assert!(summary.popular_destinations.is_empty());
        assert_eq!(summary.budget_distribution.len(), 3);
        assert_eq!(summary.duration_buckets.len(), 4);
    }

    #[test]
    fn test_summarize_totals() {
        let service = DashboardService::default();
        let records = trips(vec![
            json!({ "tripData": { "itinerary": [{}] }, "userSelection": { "budget": "luxury" } }),
            json!({ "tripData": { "hotels": [] } }),
            json!({}),
        ]);
        let users = vec![
            UserRecord::new(json!({ "profileCompleted": true })),
            UserRecord::new(json!({})),
        ];

        let totals = service.summarize(&records, &users, now(), utc_offset()).totals;
        assert_eq!(totals.total_trips, 3);
        assert_eq!(totals.total_users, 2);
        assert_eq!(totals.complete_profiles, 1);
        assert_eq!(totals.statuses.completed, 1);
        assert_eq!(totals.statuses.partial, 1);
        assert_eq!(totals.statuses.failed, 1);
        // (55 + 30 + 0) / 3
        assert_eq!(totals.average_optimization_score, 28.3);
        assert_eq!(totals.total_estimated_cost, 70_000.0);
        assert_eq!(totals.average_estimated_cost, 23_333.0);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let service = DashboardService::default();
        let records = trips(vec![
            json!({ "destination": "Cebu", "createdAt": "2025-06-29T10:00:00Z" }),
            json!({ "destination": "Bohol", "createdAt": "2025-06-20T10:00:00Z" }),
        ]);

        let first = service.summarize(&records, &[], now(), utc_offset());
        let second = service.summarize(&records, &[], now(), utc_offset());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
