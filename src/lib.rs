//! volstore - Volume File Upload Service
//!
//! A small HTTP service that uploads, lists, and deletes files in a single
//! configured filesystem-backed storage volume, with size-limit enforcement
//! and JSON configuration.

pub mod config;
pub mod error;
pub mod logging;
pub mod volume;
pub mod web;

pub use config::Config;
pub use error::{Result, VolstoreError};
pub use volume::{FileEntry, StoredFile, VolumeService};
