//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local store used when no database is configured.

pub mod memory;
pub mod persistence;
