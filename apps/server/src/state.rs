//! Shared application state.
//!
//! One state type holding the database handle and the loaded config.
//! Both are cheap to clone; axum clones the state per request.

use dhaba_core::TaxRate;
use dhaba_db::Database;

use crate::config::ServerConfig;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState { db, config }
    }

    /// The configured tax rate, applied by the finalize handler.
    pub fn tax_rate(&self) -> TaxRate {
        self.config.tax_rate()
    }
}
