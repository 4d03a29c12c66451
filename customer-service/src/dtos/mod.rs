pub mod customer;

pub use customer::{CustomerPayload, CustomerRequest, CustomerResponse, DeleteOutcome};
