#![allow(dead_code)]

use actix_web::{web, App};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use trip_metrics_api::db::mongo::DataSource;
use trip_metrics_api::routes;
use trip_metrics_api::services::dashboard_service::DashboardService;
use trip_metrics_api::services::price_tables::PriceTables;

/// The API without a datastore. Routes that only compute (pricing and posted
/// trip metrics) work; routes that read MongoDB are registered but unused.
pub fn create_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(DataSource::default()))
        .app_data(web::Data::new(PriceTables::default()))
        .app_data(web::Data::new(DashboardService::default()))
        .configure(routes::config)
}

/// Current product shape: selection block plus generated content.
pub fn current_trip(created_at: DateTime<Utc>) -> Value {
    json!({
        "_id": { "$oid": "65a1b2c3d4e5f60718293a4b" },
        "userEmail": "ana@example.com",
        "userSelection": {
            "location": { "label": "Siargao" },
            "duration": "4",
            "traveler": "Couple",
            "budget": "Moderate"
        },
        "tripData": {
            "hotels": [{ "hotelName": "Nay Palad" }, { "hotelName": "Kalinaw" }],
            "placesToVisit": [{ "placeName": "Cloud 9" }],
            "itinerary": [
                { "day": 1, "activities": ["Surf lesson", "Sunset at Cloud 9"] },
                { "day": 2, "plan": ["Island hopping"] },
                { "day": 3, "planText": "Magpupungko|Lunch|Night market" }
            ],
            "hasRealFlights": true,
            "hasRealHotels": true
        },
        "userProfile": { "interests": ["surfing"] },
        "createdAt": created_at.to_rfc3339()
    })
}

/// Early product shape: content stored as a JSON string, `itinerary_data`
/// days and a custom budget.
pub fn legacy_trip(created_at: DateTime<Utc>) -> Value {
    json!({
        "id": "legacy-7",
        "destination": "Bohol",
        "userSelection": {
            "noOfDays": 9,
            "travelers": "Family of four",
            "budget": "cheap",
            "customBudget": 42000
        },
        "tripData": "{\"itinerary_data\": [{\"plan\": [{}, {}]}, {\"plan\": [{}]}]}",
        "createdAt": { "$date": created_at.to_rfc3339() }
    })
}

/// A generation that never returned content.
pub fn failed_trip(created_at: DateTime<Utc>) -> Value {
    json!({
        "destination": "Siargao",
        "userSelection": {
            "startDate": "2025-01-01",
            "endDate": "2025-01-20",
            "traveler": "Just me",
            "budget": "Luxury"
        },
        "createdAt": created_at.timestamp_millis()
    })
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}
