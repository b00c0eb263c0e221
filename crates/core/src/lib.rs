//! Domain logic for the employee management service.
//!
//! Nothing in this crate performs I/O. The `db` crate persists what these
//! modules validate, and the `api` crate composes both behind HTTP.

pub mod department;
pub mod employee;
pub mod error;
pub mod identity;
pub mod leave;
pub mod pagination;
pub mod roles;
pub mod salary;
pub mod search;
pub mod summary;
pub mod types;
