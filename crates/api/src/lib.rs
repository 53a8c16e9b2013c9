//! Gradebook HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, services,
//! handlers, routes, rendering) so integration tests and the binary
//! entrypoint can both access them.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
