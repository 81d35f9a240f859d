//! # dhaba-db: Database Layer for Dhaba POS
//!
//! This crate provides database access for the Dhaba POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dhaba POS Data Flow                              │
//! │                                                                         │
//! │  Request Handler (POST /transactions)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dhaba-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (menu.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │  transaction) │    │              │  │   │
//! │  │   │ SqlitePool    │    │ MenuRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ TransactionRepo│   │ ...          │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                 ./data/dhaba.db (configurable)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, transaction)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dhaba_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/dhaba.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let items = db.menu().list().await?;
//! let record = db.transactions().get_by_order_number("ORD260831042").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::menu::MenuRepository;
pub use repository::transaction::TransactionRepository;
