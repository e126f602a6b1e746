//! API handlers for the volstore web layer.

pub mod file;
pub mod meta;

pub use file::*;
pub use meta::*;

use std::sync::Arc;

use crate::config::Config;
use crate::volume::VolumeService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration, read-only for the process lifetime.
    pub config: Arc<Config>,
    /// File service bound to the configured volume root.
    pub volume: VolumeService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<Config>, volume: VolumeService) -> Self {
        Self { config, volume }
    }
}
