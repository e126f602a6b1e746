//! Data Transfer Objects for the volstore API.
//!
//! All requests arrive as multipart forms or path segments, so only
//! response schemas are defined here.

pub mod response;

pub use response::*;
