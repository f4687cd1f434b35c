//! Counts days, stays, places and activities in generated trip content.
//!
//! Generated content has been stored in several shapes over time. Each day
//! entry is matched against an ordered list of recognizers and the first one
//! that claims the day decides its activity count. The two heuristic
//! recognizers at the end of the list are approximations: they guess at
//! activity text and can over- or under-count unusual days.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::document::as_text;

type Day = Map<String, Value>;

/// Reads one day shape. `None` means the day is not in this shape.
type DayRecognizer = fn(&Day) -> Option<u32>;

const DAY_RECOGNIZERS: [(&str, DayRecognizer); 7] = [
    ("activities", activities_list),
    ("plan", plan_list),
    ("planText", plan_text),
    ("plan-json", plan_string),
    ("activity", single_activity),
    ("time-slots", time_slots),
    ("long-text", long_text_fields),
];

const TIME_SLOT_KEYS: [&str; 4] = ["morning", "afternoon", "evening", "night"];
const METADATA_KEYS: [&str; 5] = ["day", "dayNumber", "day_number", "theme", "date"];
const ACTIVITY_TEXT_MIN_LEN: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub total_days: u32,
    pub hotels_count: u32,
    pub places_count: u32,
    pub activities_count: u32,
}

/// Summarize a generated-content block. Absent content summarizes to zeros.
pub fn analyze(content: Option<&Map<String, Value>>) -> ContentSummary {
    let Some(content) = content else {
        return ContentSummary::default();
    };
    let hotels_count = list_len(content, &["accommodations", "hotels"]);
    let places_count = list_len(content, &["placesToVisit", "places_to_visit"]);

    let (total_days, activities_count) =
        if let Some(days) = content.get("itinerary").and_then(Value::as_array) {
            let activities = days.iter().map(day_activity_count).sum::<u32>();
            (count(days.len()), activities)
        } else if let Some(days) = content.get("itinerary_data").and_then(Value::as_array) {
            let activities = days
                .iter()
                .map(|day| {
                    day.get("plan")
                        .and_then(Value::as_array)
                        .map_or(0, |plan| count(plan.len()))
                })
                .sum::<u32>();
            (count(days.len()), activities)
        } else {
            (0, 0)
        };

    ContentSummary {
        total_days,
        hotels_count,
        places_count,
        activities_count,
    }
}

/// Activity count for one entry of the primary itinerary list.
pub fn day_activity_count(day: &Value) -> u32 {
    let Some(day) = day.as_object() else {
        return 0;
    };

    for (shape, recognize) in DAY_RECOGNIZERS {
        if let Some(activities) = recognize(day) {
            if matches!(shape, "time-slots" | "long-text") {
                log::debug!("Day activities counted by {} heuristic: {}", shape, activities);
            }
            return activities;
        }
    }

    0
}

fn activities_list(day: &Day) -> Option<u32> {
    day.get("activities")?.as_array().map(|list| count(list.len()))
}

fn plan_list(day: &Day) -> Option<u32> {
    day.get("plan")?.as_array().map(|list| count(list.len()))
}

fn plan_text(day: &Day) -> Option<u32> {
    day.get("planText")?.as_str().map(count_pipe_segments)
}

fn plan_string(day: &Day) -> Option<u32> {
    let raw = day.get("plan")?.as_str()?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(list)) => Some(count(list.len())),
        _ => Some(count_pipe_segments(raw)),
    }
}

fn single_activity(day: &Day) -> Option<u32> {
    day.get("activity")?.as_str().map(|_| 1)
}

fn time_slots(day: &Day) -> Option<u32> {
    let filled = TIME_SLOT_KEYS
        .iter()
        .filter(|key| day.get(**key).and_then(as_text).is_some())
        .count();

    (filled > 0).then(|| count(filled))
}

/// Last resort: string fields long enough to read like an activity description.
fn long_text_fields(day: &Day) -> Option<u32> {
    let described = day
        .iter()
        .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
        .filter_map(|(_, value)| value.as_str())
        .filter(|text| text.chars().count() > ACTIVITY_TEXT_MIN_LEN)
        .count();

    Some(count(described))
}

/// Length of the first of `keys` holding a list.
fn list_len(content: &Map<String, Value>, keys: &[&str]) -> u32 {
    keys.iter()
        .find_map(|key| content.get(*key).and_then(Value::as_array))
        .map_or(0, |list| count(list.len()))
}

fn count_pipe_segments(text: &str) -> u32 {
    count(text.split('|').filter(|part| !part.trim().is_empty()).count())
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
