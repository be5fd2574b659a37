pub mod auth;
pub mod configuration;
pub mod setting;
pub mod user;
