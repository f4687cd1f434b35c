use serde_json::Value;

use crate::models::document::{as_flag, is_non_empty};
use crate::models::trip::{TripRecord, TripStatus};

const CONTENT_POINTS: u32 = 30;
const ITINERARY_POINTS: u32 = 25;
const HOTELS_POINTS: u32 = 15;
const REAL_FLIGHTS_POINTS: u32 = 15;
const REAL_HOTELS_POINTS: u32 = 10;
const PROFILE_POINTS: u32 = 5;
const MAX_SCORE: u32 = 100;

/// `Failed` without generated content, `Completed` once it holds itinerary
/// days, `Partial` in between.
pub fn determine_status(trip: &TripRecord) -> TripStatus {
    let Some(content) = trip.content().filter(|content| !content.is_empty()) else {
        return TripStatus::Failed;
    };

    if has_itinerary(trip) {
        TripStatus::Completed
    } else {
        log::debug!(
            "Trip {:?} has content without itinerary days ({} fields)",
            trip.id(),
            content.len()
        );
        TripStatus::Partial
    }
}

/// Completeness score in `0..=100`.
///
/// Points are awarded for the presence of the structural pieces a finished
/// trip carries. It says nothing about whether the itinerary is any good.
pub fn optimization_score(trip: &TripRecord) -> u8 {
    let Some(content) = trip.content() else {
        return 0;
    };

    let mut score = CONTENT_POINTS;

    if has_itinerary(trip) {
        score += ITINERARY_POINTS;
    }
    if content.get("hotels").is_some_and(is_non_empty_list)
        || content.get("accommodations").is_some_and(is_non_empty_list)
    {
        score += HOTELS_POINTS;
    }
    if as_flag(trip.flag("hasRealFlights")) {
        score += REAL_FLIGHTS_POINTS;
    }
    if as_flag(trip.flag("hasRealHotels")) {
        score += REAL_HOTELS_POINTS;
    }
    if trip.profile().is_some_and(|profile| !profile.is_empty()) {
        score += PROFILE_POINTS;
    }

    score.min(MAX_SCORE) as u8
}

fn has_itinerary(trip: &TripRecord) -> bool {
    trip.itinerary_days().is_some_and(|days| !days.is_empty())
}

fn is_non_empty_list(value: &Value) -> bool {
    value.is_array() && is_non_empty(value)
}
