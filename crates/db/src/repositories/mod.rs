pub mod auth;
pub mod booking;
pub mod profile;
pub mod schedule;
