use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_metrics_api::db::mongo::{create_mongo_client, DataSource};
use trip_metrics_api::routes;
use trip_metrics_api::services::dashboard_service::DashboardService;
use trip_metrics_api::services::price_tables::PriceTables;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = std::env::var("MONGODB_URI")
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "MONGODB_URI must be set"))?;
    let client = create_mongo_client(&mongo_uri)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let source = web::Data::new(DataSource::from_env());
    let tables = web::Data::new(PriceTables::default());
    let dashboard = web::Data::new(DashboardService::new());
    log::info!("Reading trips from {:?}", source.get_ref());

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(client.clone()))
            .app_data(source.clone())
            .app_data(tables.clone())
            .app_data(dashboard.clone())
            .configure(routes::config)
    })
    .bind((host, port))?
    .run()
    .await
}
