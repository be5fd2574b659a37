pub mod auth;
pub mod configuration;
pub mod setting;
pub mod shared;
pub mod user;
