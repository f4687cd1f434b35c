use crate::models::document::as_number;
use crate::models::trip::TripRecord;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 365;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Trip length in days, always within `1..=365`.
///
/// Sources in priority order: the explicit duration field, the inclusive span
/// between start and end dates, the number of itinerary days, and finally a
/// single day.
pub fn resolve_duration(trip: &TripRecord) -> u32 {
    explicit_duration(trip)
        .or_else(|| date_span(trip))
        .or_else(|| itinerary_length(trip))
        .unwrap_or(MIN_DURATION_DAYS)
}

fn explicit_duration(trip: &TripRecord) -> Option<u32> {
    let days = as_number(trip.duration_field()?)?;
    Some(clamp_days(days.trunc()))
}

fn date_span(trip: &TripRecord) -> Option<u32> {
    let (start, end) = (trip.start_date()?, trip.end_date()?);
    let elapsed = (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY;
    Some(clamp_days(elapsed.ceil() + 1.0))
}

fn itinerary_length(trip: &TripRecord) -> Option<u32> {
    let days = trip.itinerary_days()?.len();
    (days > 0).then(|| clamp_days(days as f64))
}

fn clamp_days(days: f64) -> u32 {
    days.clamp(f64::from(MIN_DURATION_DAYS), f64::from(MAX_DURATION_DAYS)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn resolve(doc: Value) -> u32 {
        resolve_duration(&TripRecord::new(doc))
    }

    #[test]
    fn test_explicit_duration_wins() {
        assert_eq!(
            resolve(json!({
                "userSelection": { "duration": 5, "startDate": "2025-01-01", "endDate": "2025-01-04" }
            })),
            5
        );
        assert_eq!(resolve(json!({ "userSelection": { "noOfDays": "7" } })), 7);
    }

    #[test]
    fn test_explicit_duration_is_clamped() {
        assert_eq!(resolve(json!({ "userSelection": { "duration": -4 } })), 1);
        assert_eq!(resolve(json!({ "userSelection": { "duration": 0 } })), 1);
        assert_eq!(resolve(json!({ "userSelection": { "duration": 1000 } })), 365);
        assert_eq!(resolve(json!({ "userSelection": { "duration": 2.9 } })), 2);
    }

    #[test]
    fn test_date_span_is_inclusive() {
        let trip = json!({
            "userSelection": { "startDate": "2025-01-01", "endDate": "2025-01-04" }
        });
        assert_eq!(resolve(trip), 4);
    }

    #[test]
    fn test_partial_days_round_up() {
        let trip = json!({
            "userSelection": {
                "startDate": "2025-01-01T08:00:00Z",
                "endDate": "2025-01-03T20:00:00Z"
            }
        });
        assert_eq!(resolve(trip), 4);
    }

    #[test]
    fn test_reversed_dates_clamp_to_one() {
        let trip = json!({
            "userSelection": { "startDate": "2025-01-10", "endDate": "2025-01-01" }
        });
        assert_eq!(resolve(trip), 1);
    }

    #[test]
    fn test_non_numeric_duration_falls_through() {
        let trip = json!({
            "userSelection": {
                "duration": "a week or so",
                "dateRange": { "startDate": "2025-03-01", "endDate": "2025-03-02" }
            }
        });
        assert_eq!(resolve(trip), 2);
    }

    #[test]
    fn test_unparsable_dates_fall_through_to_itinerary() {
        let trip = json!({
            "userSelection": { "startDate": "someday", "endDate": "2025-01-04" },
            "tripData": { "itinerary": [{}, {}, {}] }
        });
        assert_eq!(resolve(trip), 3);
    }

    #[test]
    fn test_itinerary_data_days_count() {
        let trip = json!({ "tripData": { "itinerary_data": [{}, {}] } });
        assert_eq!(resolve(trip), 2);
    }

    #[test]
    fn test_defaults_to_one_day() {
        assert_eq!(resolve(json!({})), 1);
        assert_eq!(resolve(json!({ "tripData": { "itinerary": [] } })), 1);
        assert_eq!(resolve(json!("not even an object")), 1);
    }

    #[test]
    fn test_always_within_bounds() {
        let garbage = [
            json!({ "userSelection": { "duration": "-99999" } }),
            json!({ "userSelection": { "duration": 1e300 } }),
            json!({ "userSelection": { "startDate": "1900-01-01", "endDate": "2100-01-01" } }),
            json!({ "userSelection": { "duration": null, "startDate": 0, "endDate": -1 } }),
            json!({ "userSelection": [] }),
        ];

        for doc in garbage {
            let days = resolve(doc);
            assert!((MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&days));
        }
    }
}
