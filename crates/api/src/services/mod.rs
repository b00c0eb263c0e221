//! Business rules, one module per resource.
//!
//! Handlers stay thin: they extract, call one function here, and wrap the
//! result in a response envelope. Functions take the pool (and whatever
//! configuration they need) explicitly so they can be driven from tests and
//! from start-up code without an HTTP request.

pub mod auth;
pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;
pub mod summary;
