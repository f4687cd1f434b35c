pub mod cost_estimator;
pub mod dashboard_service;
pub mod duration_resolver;
pub mod itinerary_analyzer;
pub mod price_tables;
pub mod pricing_service;
pub mod trip_classifier;
pub mod trip_metrics_service;
