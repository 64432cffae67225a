//! Upstream records, dashboard statistics, and view DTOs.

pub mod dashboard;
pub mod department;
pub mod id;
pub mod machine;
pub mod material;
pub mod user;
pub mod workshop;
