mod common;
mod setting;
mod user;
