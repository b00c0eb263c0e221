//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`cookies`] -- `Set-Cookie` values for browser clients and cookie lookup.

pub mod cookies;
pub mod jwt;
pub mod password;
