//! Domain types and validation for the event calendar.
//!
//! This crate has no internal dependencies so the repository layer, the HTTP
//! layer and the seeding tool can all share the same parsing rules.

pub mod error;
pub mod event;
pub mod types;
