pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;
pub mod session;
pub mod summary;
pub mod user;
