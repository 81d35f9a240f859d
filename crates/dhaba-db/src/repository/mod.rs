//! # Repository Module
//!
//! Database repository implementations for Dhaba POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Request Handler                                                       │
//! │       │                                                                 │
//! │       │  db.menu().get_by_item_id("ITEM001")                           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  MenuRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_item_id(&self, item_id)                                    │
//! │  ├── insert(&self, new_item)                                           │
//! │  ├── update(&self, item_id, patch)                                     │
//! │  └── delete(&self, item_id)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Repositories can be tested against an in-memory database            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu catalog CRUD
//! - [`transaction::TransactionRepository`] - Finalized order recording and queries

pub mod menu;
pub mod transaction;
