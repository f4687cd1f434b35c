//! Trip record normalization, cost estimation and dashboard aggregation for
//! the trip planner, served over HTTP from the product's MongoDB snapshot.
//!
//! `models` and `services` are pure and synchronous; `db` and `routes` are
//! the async shell around them.

pub mod db;
pub mod models;
pub mod routes;
pub mod services;
