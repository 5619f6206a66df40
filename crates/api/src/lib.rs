//! Event calendar API server library.
//!
//! Exposes config, state, error handling, the event service and routes so
//! integration tests, the server binary and the seeding tool share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;
