pub mod dashboard;
pub mod document;
pub mod pricing;
pub mod timestamp;
pub mod trip;
pub mod user;
