//! Plumbing shared by Mitfahrbörse services: tracing setup, HTTP middleware
//! and health endpoints.

pub mod health;
pub mod middleware;
pub mod tracing;
