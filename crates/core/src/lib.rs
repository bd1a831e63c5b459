//! Domain logic for the Desa Jambakan content service.
//!
//! Everything in this crate is pure: no database, no HTTP, no filesystem.
//! Time is always passed in by the caller so the rules can be tested with a
//! fixed clock.

pub mod content;
pub mod error;
pub mod session;
pub mod types;
pub mod upload;
pub mod validation;
