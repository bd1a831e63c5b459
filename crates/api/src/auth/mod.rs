//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session-bound JWT access tokens.

pub mod jwt;
pub mod password;
