//! Sales Flow HTTP server.
//!
//! Serves the landing page at `/`, the background scene description at
//! `/api/scene`, and the waitlist endpoint at `/api/waitlist`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
