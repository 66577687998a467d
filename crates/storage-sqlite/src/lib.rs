//! SQLite storage implementation for Streakmap.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `streakmap-core` and contains:
//! - Database initialisation, connection pooling and the single writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for goals, goal groups and progress entries
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place where Diesel dependencies exist. The core
//! crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod progress;

pub use config::StorageConfig;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use goals::GoalRepository;
pub use progress::ProgressRepository;

// Re-export from streakmap-core for convenience
pub use streakmap_core::errors::{DatabaseError, Error, Result};
