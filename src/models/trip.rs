use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::document::{as_number, as_text, first_array, first_object, first_present};
use super::timestamp::parse_timestamp;

const SELECTION_KEYS: [&str; 3] = ["userSelection", "user_selection", "selection"];
const CONTENT_KEYS: [&str; 3] = ["tripData", "trip_data", "generatedTrip"];
const PROFILE_KEYS: [&str; 3] = ["userProfile", "profile", "personalization"];
const CREATED_AT_KEYS: [&str; 3] = ["createdAt", "created_at", "timestamp"];

/// A stored trip document, read as-is.
///
/// The generated-content block is resolved once on construction, since older
/// records stored it as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    doc: Value,
    content: Option<Value>,
}

impl TripRecord {
    pub fn new(doc: Value) -> Self {
        let content = resolve_content(&doc);
        Self { doc, content }
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Document id, whether stored as an ObjectId (`{"$oid": ..}`) or a plain
    /// string/number.
    pub fn id(&self) -> Option<String> {
        let id = first_present(&self.doc, &["_id", "id"])?;
        match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Map<String, Value>> {
        first_object(&self.doc, &SELECTION_KEYS)
    }

    fn selection_field(&self, keys: &[&str]) -> Option<&Value> {
        let selection = self.selection()?;
        keys.iter()
            .filter_map(|key| selection.get(*key))
            .find(|value| !value.is_null())
    }

    /// The generated-content block, if one is attached.
    pub fn content(&self) -> Option<&Map<String, Value>> {
        self.content.as_ref().and_then(Value::as_object)
    }

    pub fn content_field(&self, key: &str) -> Option<&Value> {
        self.content().and_then(|content| content.get(key))
    }

    /// Destination label as shown to the user.
    /// Each alias is tried in turn; an unlabeled or blank one does not hide
    /// the next.
    pub fn destination(&self) -> Option<&str> {
        ["location", "destination"]
            .iter()
            .filter_map(|key| self.selection_field(&[*key]))
            .find_map(place_label)
            .or_else(|| first_present(&self.doc, &["destination"]).and_then(place_label))
    }

    pub fn duration_field(&self) -> Option<&Value> {
        self.selection_field(&["duration", "noOfDays", "days", "numberOfDays"])
    }

    pub fn traveler_label(&self) -> Option<&str> {
        self.selection_field(&["traveler", "travelers", "travelType"])
            .and_then(as_text)
    }

    pub fn budget_label(&self) -> Option<&str> {
        self.selection_field(&["budget", "budgetLevel", "budgetTier"])
            .and_then(as_text)
    }

    /// A custom budget counts only when it is a positive amount.
    pub fn custom_budget(&self) -> Option<f64> {
        self.selection_field(&["customBudget", "budgetAmount"])
            .and_then(as_number)
            .filter(|amount| *amount > 0.0)
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.date_field("startDate", "start")
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.date_field("endDate", "end")
    }

    fn date_field(&self, key: &str, short_key: &str) -> Option<DateTime<Utc>> {
        if let Some(parsed) = self.selection_field(&[key]).and_then(parse_timestamp) {
            return Some(parsed);
        }

        let range = self.selection_field(&["dateRange"])?;
        first_present(range, &[key, short_key]).and_then(parse_timestamp)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        first_present(&self.doc, &CREATED_AT_KEYS).and_then(parse_timestamp)
    }

    pub fn profile(&self) -> Option<&Map<String, Value>> {
        first_object(&self.doc, &PROFILE_KEYS)
    }

    /// Flag lookup: the content block first, then the top level of the record.
    pub fn flag(&self, key: &str) -> Option<&Value> {
        self.content_field(key)
            .or_else(|| self.doc.as_object().and_then(|doc| doc.get(key)))
    }

    pub fn itinerary_days(&self) -> Option<&Vec<Value>> {
        let content = self.content.as_ref()?;
        first_array(content, &["itinerary", "itinerary_data"])
    }
}

fn place_label(place: &Value) -> Option<&str> {
    match place {
        Value::Object(_) => first_present(place, &["label", "name", "description"]).and_then(as_text),
        other => as_text(other),
    }
}

fn resolve_content(doc: &Value) -> Option<Value> {
    match first_present(doc, &CONTENT_KEYS)? {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ Value::Object(_)) => Some(parsed),
            Ok(_) => None,
            Err(err) => {
                log::debug!("Ignoring unparsable trip content: {}", err);
                None
            }
        },
        other => Some(other.clone()),
    }
}

impl From<Value> for TripRecord {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}

impl<'de> Deserialize<'de> for TripRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Failed,
    Partial,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Failed => "failed",
            TripStatus::Partial => "partial",
            TripStatus::Completed => "completed",
        }
    }
}

/// The canonical summary of a trip record. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTripMetrics {
    pub duration_days: u32,
    pub itinerary_days: u32,
    pub hotels_count: u32,
    pub places_count: u32,
    pub activities_count: u32,
    pub status: TripStatus,
    pub optimization_score: u8,
    pub estimated_cost: f64,
}

/// Metrics together with the identifying fields list views need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMetricsView {
    pub id: Option<String>,
    pub destination: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub metrics: NormalizedTripMetrics,
}
