//! service-core: Shared infrastructure for the customer service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
