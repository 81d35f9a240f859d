//! Library surface of the Dhaba POS server.
//!
//! The binary in `main.rs` is a thin wrapper; everything it wires up is
//! exposed here so integration tests can build the router against an
//! in-memory database.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
