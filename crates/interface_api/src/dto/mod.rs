//! Request/response data transfer objects

pub mod expense;
pub mod settlement;
pub mod reports;
pub mod budget;
