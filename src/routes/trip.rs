use actix_web::{web, HttpResponse, Responder};
use bson::{doc, Document};
use mongodb::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::db::mongo::{fetch_trips, find_trip, DataSource};
use crate::models::trip::TripRecord;
use crate::services::trip_metrics_service::TripMetricsService;

const DEFAULT_LIST_LIMIT: u16 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripListQuery {
    pub user_email: Option<String>,
    pub destination: Option<String>,
    pub limit: Option<u16>,
}

/// Datastore filter for a trip listing. The destination is a case-insensitive
/// prefix match against every field a destination has been stored under.
pub fn trip_filter(params: &TripListQuery) -> Document {
    let mut filter = doc! {};

    if let Some(email) = params.user_email.as_deref().filter(|e| !e.trim().is_empty()) {
        filter.insert("userEmail", email.trim());
    }

    if let Some(search_text) = params.destination.as_deref().filter(|d| !d.trim().is_empty()) {
        let pattern = doc! {
            "$regex": format!("^{}", regex::escape(search_text.trim())),
            "$options": "i"
        };
        filter.insert(
            "$or",
            vec![
                doc! { "userSelection.location.label": pattern.clone() },
                doc! { "userSelection.location": pattern.clone() },
                doc! { "userSelection.destination": pattern.clone() },
                doc! { "destination": pattern },
            ],
        );
    }

    filter
}

/*
    /api/trips/metrics
*/
pub async fn list_metrics(
    data: web::Data<Arc<Client>>,
    source: web::Data<DataSource>,
    params: web::Query<TripListQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let filter = trip_filter(&params);
    let limit = i64::from(params.limit.unwrap_or(DEFAULT_LIST_LIMIT));

    log::debug!("Trip metrics filter: {:?}", filter);

    match fetch_trips(&client, &source, filter, Some(limit)).await {
        Ok(trips) => HttpResponse::Ok().json(TripMetricsService::view_all(&trips)),
        Err(err) => {
            log::error!("Failed to fetch trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trips.")
        }
    }
}

/*
    /api/trips/{id}/metrics
*/
pub async fn get_metrics(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    source: web::Data<DataSource>,
) -> impl Responder {
    let client = data.into_inner();
    let id = path.into_inner();
    if id.trim().is_empty() {
        return HttpResponse::BadRequest().body("Invalid ID");
    }

    match find_trip(&client, &source, &id).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(TripMetricsService::view(&trip)),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            log::error!("Failed to retrieve trip {}: {:?}", id, err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    POST /api/trips/metrics
    Accepts one trip document or an array of them.
*/
pub async fn compute_metrics(input: web::Json<Value>) -> impl Responder {
    match input.into_inner() {
        Value::Array(docs) => {
            let trips: Vec<TripRecord> = docs.into_iter().map(TripRecord::new).collect();
            HttpResponse::Ok().json(TripMetricsService::view_all(&trips))
        }
        doc => HttpResponse::Ok().json(TripMetricsService::view(&TripRecord::new(doc))),
    }
}
