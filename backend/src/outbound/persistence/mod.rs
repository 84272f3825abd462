//! PostgreSQL persistence using Diesel with `diesel-async` and `bb8`.
//!
//! Row structs and the table definition are internal; only the repository,
//! the pool, and the migration runner are exported.
//!
//! ```ignore
//! use pastebin::outbound::persistence::{DbPool, DieselPasteRepository, PoolConfig};
//!
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselPasteRepository::new(pool);
//! ```

mod diesel_paste_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_paste_repository::DieselPasteRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
