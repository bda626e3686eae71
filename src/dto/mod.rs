//! DTO modules that shape service data for display.

pub mod dashboard;
pub mod plans;
