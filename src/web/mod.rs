//! Web API module for volstore.
//!
//! Translates HTTP requests into file service calls and serializes
//! results to JSON responses and status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
