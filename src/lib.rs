//! Barbershop booking: appointment wizard, subscription plan catalog and
//! simulated sign-in, persisted as JSON snapshots in SQLite.

pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

/// Snapshot key holding the plan catalog.
pub const PLANS_SNAPSHOT_KEY: &str = "barbershop-plans";
/// Snapshot key holding the signed-in session.
pub const AUTH_SNAPSHOT_KEY: &str = "barbershop-auth";
