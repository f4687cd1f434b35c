use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::price_tables::PriceTables;
use crate::services::pricing_service::PricingService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedPriceRequest {
    pub base_price: f64,
    pub region: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedPriceResponse {
    pub adjusted_price: f64,
    pub regional_multiplier: f64,
    pub destination_multiplier: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBudgetRequest {
    pub tier: Option<String>,
    pub region: Option<String>,
    pub destination: Option<String>,
    pub travelers: Option<u32>,
}

/*
    /api/pricing/tiers/{tier}
*/
pub async fn get_tier(path: web::Path<String>, tables: web::Data<PriceTables>) -> impl Responder {
    let pricing = PricingService::new(&tables);
    HttpResponse::Ok().json(pricing.budget_tier(&path.into_inner()))
}

/*
    /api/pricing/adjusted
*/
pub async fn adjusted_price(
    tables: web::Data<PriceTables>,
    input: web::Json<AdjustedPriceRequest>,
) -> impl Responder {
    let request = input.into_inner();
    if !request.base_price.is_finite() {
        return HttpResponse::BadRequest().body("basePrice must be a finite number");
    }

    let pricing = PricingService::new(&tables);
    let region = request.region.as_deref();
    let destination = request.destination.as_deref();

    HttpResponse::Ok().json(AdjustedPriceResponse {
        adjusted_price: pricing.adjusted_price(request.base_price, region, destination),
        regional_multiplier: pricing.regional_multiplier(region),
        destination_multiplier: pricing.destination_multiplier(destination),
    })
}

/*
    /api/pricing/daily
*/
pub async fn daily_budget(
    tables: web::Data<PriceTables>,
    input: web::Json<DailyBudgetRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let pricing = PricingService::new(&tables);

    HttpResponse::Ok().json(pricing.estimate_daily_budget(
        request.tier.as_deref().unwrap_or_default(),
        request.region.as_deref(),
        request.destination.as_deref(),
        request.travelers.unwrap_or(1),
    ))
}
