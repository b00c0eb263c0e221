//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;
