//! Persistence layer: the [`AdminStore`] seam and its implementations.
//!
//! [`PgStore`] talks to PostgreSQL through `sqlx::PgPool`; the schema and
//! audit triggers live in `migrations/`. [`MemoryStore`] reproduces the
//! same constraints in process for local runs and tests.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::AdminStore;
