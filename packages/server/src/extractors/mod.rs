pub mod auth;
pub mod payload;
