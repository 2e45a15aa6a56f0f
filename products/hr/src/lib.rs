//! HR module: employee records with an owned passport and a shared,
//! de-duplicated department.

pub mod error;
pub mod model;
pub mod patch;
pub mod repository;
pub mod service;

pub use error::{RepoError, RepoResult};
pub use model::{Department, Employee, EmployeeUpdate, NewEmployee, Passport};
pub use repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use service::HrEmployeeService;
