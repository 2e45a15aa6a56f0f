//! Persistence for employees.
//!
//! Every mutation runs in a single transaction on one pooled connection.
//! `DatabaseTransaction` rolls back when dropped uncommitted, which covers
//! early returns, panics and a cancelled request future alike.

use async_trait::async_trait;
use platform_db::DbPool;

use crate::{
    error::RepoResult,
    model::{Department, Employee, EmployeeUpdate, NewEmployee},
};

pub mod department;
mod mutation;
mod query;

pub use department::{reclaim_if_unused, resolve_department};

/// Storage capability used by the service layer.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert an employee with its passport, reusing or creating the
    /// department. Returns the new employee id.
    async fn add_employee(&self, employee: NewEmployee) -> RepoResult<i32>;

    /// Remove an employee, its passport, and its department when no other
    /// employee references it.
    async fn delete_employee(&self, id: i32) -> RepoResult<()>;

    /// Apply a sparse update. Missing employees are `NotFound`; an update
    /// with nothing supplied is a no-op.
    async fn update_employee(&self, update: EmployeeUpdate) -> RepoResult<()>;

    /// Employees of `company_id`, optionally narrowed by department name
    /// and/or phone (blank fields do not filter).
    async fn list_company_employees(
        &self,
        company_id: i32,
        department: &Department,
    ) -> RepoResult<Vec<Employee>>;

    async fn find_employee(&self, id: i32) -> RepoResult<Option<Employee>>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeRepository {
    db: DbPool,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &DbPool {
        &self.db
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn add_employee(&self, employee: NewEmployee) -> RepoResult<i32> {
        self.insert_employee(employee).await
    }

    async fn delete_employee(&self, id: i32) -> RepoResult<()> {
        self.remove_employee(id).await
    }

    async fn update_employee(&self, update: EmployeeUpdate) -> RepoResult<()> {
        self.patch_employee(update).await
    }

    async fn list_company_employees(
        &self,
        company_id: i32,
        department: &Department,
    ) -> RepoResult<Vec<Employee>> {
        self.company_employees(company_id, department).await
    }

    async fn find_employee(&self, id: i32) -> RepoResult<Option<Employee>> {
        self.employee_by_id(id).await
    }
}
