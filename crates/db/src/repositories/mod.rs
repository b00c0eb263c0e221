//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a `&PgPool` (or any `PgExecutor`) as the first argument.

pub mod department_repo;
pub mod employee_repo;
pub mod leave_repo;
pub mod salary_repo;
pub mod session_repo;
pub mod summary_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use leave_repo::LeaveRepo;
pub use salary_repo::SalaryRepo;
pub use session_repo::SessionRepo;
pub use summary_repo::SummaryRepo;
pub use user_repo::UserRepo;
