pub mod customers;
pub mod health;
pub mod root;

pub use customers::{create_customer, delete_customer, list_customers, update_customer};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use root::hello;
