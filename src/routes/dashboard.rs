use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::{FixedOffset, Offset, Utc};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::{fetch_trips, fetch_users, DataSource};
use crate::services::dashboard_service::DashboardService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Viewer's offset from UTC in minutes east (Manila is 480)
    pub tz_offset_minutes: Option<i32>,
}

/// Offset for calendar-day bucketing. Out-of-range offsets fall back to UTC.
pub fn viewer_offset(minutes_east: Option<i32>) -> FixedOffset {
    let utc = Utc.fix();
    let Some(minutes) = minutes_east else {
        return utc;
    };

    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            log::warn!("Ignoring invalid viewer offset of {} minutes", minutes);
            utc
        })
}

/*
    /api/admin/dashboard
*/
pub async fn get_dashboard(
    data: web::Data<Arc<Client>>,
    source: web::Data<DataSource>,
    service: web::Data<DashboardService>,
    params: web::Query<DashboardQuery>,
) -> impl Responder {
    let client = data.into_inner();

    let trips = match fetch_trips(&client, &source, doc! {}, None).await {
        Ok(trips) => trips,
        Err(err) => {
            log::error!("Failed to fetch trips for dashboard: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch trips.");
        }
    };

    let users = match fetch_users(&client, &source).await {
        Ok(users) => users,
        Err(err) => {
            log::error!("Failed to fetch users for dashboard: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch users.");
        }
    };

    log::info!(
        "Building dashboard from {} trips and {} users",
        trips.len(),
        users.len()
    );

    let summary = service.summarize(
        &trips,
        &users,
        Utc::now(),
        viewer_offset(params.tz_offset_minutes),
    );
    HttpResponse::Ok().json(summary)
}
