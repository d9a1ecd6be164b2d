//! Row models and DTOs, one module per table.

pub mod application;
pub mod internship;
pub mod profile;
pub mod tracking;
pub mod user;
