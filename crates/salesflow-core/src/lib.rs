//! Core library for the Sales Flow waitlist.
//!
//! Holds the server-side submission check and the recorder interface that
//! stands in for a future mailing-list integration, plus the client-side
//! capture form state machine and the HTTP client it submits through. The
//! crate knows nothing about Axum; `salesflow-server` wires it to routes.

pub mod client;
pub mod error;
pub mod form;
pub mod recorder;
pub mod waitlist;
