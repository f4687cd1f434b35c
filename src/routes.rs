use actix_web::web;

pub mod dashboard;
pub mod health;
pub mod pricing;
pub mod trip;

/// Registers every `/api` route. Handlers pull the MongoDB client,
/// `DataSource`, `PriceTables` and `DashboardService` from app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route(
                "/admin/dashboard",
                web::get().to(dashboard::get_dashboard),
            )
            .service(
                web::scope("/trips")
                    .route("/metrics", web::get().to(trip::list_metrics))
                    .route("/metrics", web::post().to(trip::compute_metrics))
                    .route("/{id}/metrics", web::get().to(trip::get_metrics)),
            )
            .service(
                web::scope("/pricing")
                    .route("/tiers/{tier}", web::get().to(pricing::get_tier))
                    .route("/adjusted", web::post().to(pricing::adjusted_price))
                    .route("/daily", web::post().to(pricing::daily_budget)),
            ),
    );
}
