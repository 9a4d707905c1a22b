pub mod advisory;
pub mod auth;
pub mod dashboard;
pub mod profile;
