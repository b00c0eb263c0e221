//! Request guards.
//!
//! - [`auth::AuthUser`] -- resolves the caller from a JWT (header or cookie).
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated identity.
//! - [`rate_limit`] -- fixed-window per-IP limits for login and registration.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
