//! Volume-backed file service.
//!
//! This module owns all filesystem access for the service:
//! - filename validation (path-traversal guard)
//! - size-limited uploads committed by atomic rename
//! - listing, reading, and deleting entries in the volume root

pub mod service;

pub use service::{validate_filename, FileEntry, StoredFile, VolumeHealth, VolumeService};
