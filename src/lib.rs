pub mod app;
pub mod config;
pub mod domains;
pub mod error;
pub mod flows;
pub mod interfaces;
pub mod logging;
pub mod providers;
pub mod runtime_paths;
pub mod services;

pub use crate::error::Result;
