use crate::models::trip::{NormalizedTripMetrics, TripMetricsView, TripRecord};
use crate::services::cost_estimator::estimate_cost;
use crate::services::duration_resolver::resolve_duration;
use crate::services::itinerary_analyzer::analyze;
use crate::services::trip_classifier::{determine_status, optimization_score};

pub struct TripMetricsService;

impl TripMetricsService {
    /// Compute the canonical metrics for one trip. Every field is populated,
    /// however malformed the record is.
    pub fn normalize(trip: &TripRecord) -> NormalizedTripMetrics {
        let content = analyze(trip.content());

        NormalizedTripMetrics {
            duration_days: resolve_duration(trip),
            itinerary_days: content.total_days,
            hotels_count: content.hotels_count,
            places_count: content.places_count,
            activities_count: content.activities_count,
            status: determine_status(trip),
            optimization_score: optimization_score(trip),
            estimated_cost: estimate_cost(trip),
        }
    }

    pub fn view(trip: &TripRecord) -> TripMetricsView {
        TripMetricsView {
            id: trip.id(),
            destination: trip.destination().map(str::to_string),
            created_at: trip.created_at(),
            metrics: Self::normalize(trip),
        }
    }

    pub fn view_all(trips: &[TripRecord]) -> Vec<TripMetricsView> {
        trips.iter().map(Self::view).collect()
    }
}
