//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::Mutex;

use invivodb::AnimalRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The record store. SQLite connections are not `Sync`, so access is
    /// serialised behind a mutex.
    pub registry: Arc<Mutex<AnimalRegistry>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: AnimalRegistry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
