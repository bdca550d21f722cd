//! # Gators Core
//!
//! Domain types and the booking engine for the Gators Swimming Academy
//! scheduling service: entities, validation, the query/sort/search
//! projections, statistics, availability flattening, and the session and
//! capability model. Everything here is persistence-agnostic; the `db`
//! crate stores these types and the `api` crate serves them.

pub mod availability;
pub mod errors;
pub mod models;
pub mod policy;
pub mod query;
pub mod roles;
pub mod session;
