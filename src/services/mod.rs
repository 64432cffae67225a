//! Business logic services.

pub mod aggregator;
pub mod auth;
pub mod dashboard;
pub mod resource_client;
pub mod view;
