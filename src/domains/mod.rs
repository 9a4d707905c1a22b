pub mod chat;
pub mod crops;
pub mod dashboard;
pub mod diagnosis;
pub mod profile;
pub mod tips;
