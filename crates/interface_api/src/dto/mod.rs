//! Request and response data transfer objects

pub mod calculators;
pub mod health;
