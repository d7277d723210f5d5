//! Weighed ice-cream sales tracker backend.
//!
//! Library crate exposing the backend module tree so the binary and the
//! test suite share one implementation.

pub mod backend;

pub use backend::{create_router, initialize_backend, AppState};
