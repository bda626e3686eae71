//! Domain aggregates exposed by the booking service layer.

pub mod appointment;
pub mod booking;
pub mod catalog;
pub mod plan;
pub mod types;
pub mod user;
