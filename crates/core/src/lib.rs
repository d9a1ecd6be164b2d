//! Domain vocabulary shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod application_status;
pub mod error;
pub mod pagination;
pub mod time;
pub mod types;
