//! Request handlers

pub mod health;
pub mod settlement;
pub mod reports;
pub mod budget;
