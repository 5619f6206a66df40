//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool`, or any Postgres executor when the call has to join a caller's
//! transaction.

pub mod event_repo;

pub use event_repo::EventRepo;
