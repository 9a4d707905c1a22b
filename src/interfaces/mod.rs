pub mod advisory;
pub mod random;
pub mod session;
