//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod internship_repo;
pub mod profile_repo;
pub mod tracking_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use internship_repo::InternshipRepo;
pub use profile_repo::ProfileRepo;
pub use tracking_repo::TrackingRepo;
pub use user_repo::UserRepo;
