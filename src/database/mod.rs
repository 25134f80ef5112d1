//! Database module
//!
//! Schema setup for the postgres backend and demo seeding for any backend.

pub mod migrations;
pub mod seed;

pub use migrations::run_migrations;
pub use seed::seed_initial_data;
