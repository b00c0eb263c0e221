//! Employee management API server library.
//!
//! Exposes configuration, state, services and routes so the binary and the
//! integration tests build the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
