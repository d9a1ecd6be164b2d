pub mod applications;
pub mod auth;
pub mod internships;
pub mod users;
