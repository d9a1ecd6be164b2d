//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT bearer-token issue and verification.
//! - [`google`] -- Google ID-token verification for federated login.

pub mod google;
pub mod jwt;
pub mod password;
