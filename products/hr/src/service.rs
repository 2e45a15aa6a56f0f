//! RPC adapter: turns wire requests into repository calls.
//!
//! Absent nested `passport` / `department` messages become empty values
//! here, so the repository cannot tell "omitted" from "sent empty".

use async_trait::async_trait;
use platform_api::{
    AddEmployeeRequest, AddEmployeeResponse, ApiError, ApiResult, CompanyEmployeesRequest,
    DeleteEmployeeRequest, DeleteEmployeeResponse, DepartmentMessage, EmployeeMessage,
    EmployeeService, EmployeesResponse, OperationStatus, PassportMessage, UpdateEmployeeRequest,
    UpdateEmployeeResponse,
};
use tracing::{error, warn};

use crate::{
    error::RepoError,
    model::{Department, Employee, EmployeeUpdate, NewEmployee, Passport},
    patch::{DepartmentPatch, EmployeePatch, PassportPatch},
    repository::EmployeeRepository,
};

pub struct HrEmployeeService<R> {
    repo: R,
}

impl<R: EmployeeRepository> HrEmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

fn report(operation: &'static str, err: RepoError) -> ApiError {
    if err.is_not_found() {
        warn!(operation, error = %err, "employee request rejected");
    } else {
        error!(operation, error = ?err, "employee request failed");
    }
    err.into()
}

#[async_trait]
impl<R: EmployeeRepository> EmployeeService for HrEmployeeService<R> {
    async fn add_employee(&self, request: AddEmployeeRequest) -> ApiResult<AddEmployeeResponse> {
        let id = self
            .repo
            .add_employee(request.into())
            .await
            .map_err(|err| report("add_employee", err))?;
        Ok(AddEmployeeResponse { id })
    }

    async fn delete_employee(
        &self,
        request: DeleteEmployeeRequest,
    ) -> ApiResult<DeleteEmployeeResponse> {
        self.repo
            .delete_employee(request.id)
            .await
            .map_err(|err| report("delete_employee", err))?;
        Ok(DeleteEmployeeResponse {
            success: OperationStatus::Success,
        })
    }

    async fn show_company_employees(
        &self,
        request: CompanyEmployeesRequest,
    ) -> ApiResult<EmployeesResponse> {
        let department = department_or_blank(request.department);
        let employees = self
            .repo
            .list_company_employees(request.company_id, &department)
            .await
            .map_err(|err| report("show_company_employees", err))?;
        Ok(EmployeesResponse {
            employees: employees.into_iter().map(EmployeeMessage::from).collect(),
        })
    }

    async fn update_employee(
        &self,
        request: UpdateEmployeeRequest,
    ) -> ApiResult<UpdateEmployeeResponse> {
        self.repo
            .update_employee(request.into())
            .await
            .map_err(|err| report("update_employee", err))?;
        Ok(UpdateEmployeeResponse {
            success: OperationStatus::Success,
        })
    }
}

fn passport_or_blank(message: Option<PassportMessage>) -> Passport {
    message
        .map(|passport| Passport {
            kind: passport.kind,
            number: passport.number,
        })
        .unwrap_or_default()
}

fn department_or_blank(message: Option<DepartmentMessage>) -> Department {
    message
        .map(|department| Department::new(department.name, department.phone))
        .unwrap_or_default()
}

impl From<AddEmployeeRequest> for NewEmployee {
    fn from(request: AddEmployeeRequest) -> Self {
        Self {
            name: request.name,
            surname: request.surname,
            phone: request.phone,
            company_id: request.company_id,
            passport: passport_or_blank(request.passport),
            department: department_or_blank(request.department),
        }
    }
}

impl From<UpdateEmployeeRequest> for EmployeeUpdate {
    fn from(request: UpdateEmployeeRequest) -> Self {
        let passport = passport_or_blank(request.passport);
        let department = department_or_blank(request.department);
        Self {
            id: request.id,
            employee: EmployeePatch {
                name: request.name,
                surname: request.surname,
                phone: request.phone,
                company_id: request.company_id,
            },
            passport: PassportPatch {
                kind: passport.kind,
                number: passport.number,
            },
            department: DepartmentPatch {
                name: department.name,
                phone: department.phone,
            },
        }
    }
}

impl From<Employee> for EmployeeMessage {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            surname: employee.surname,
            phone: employee.phone,
            company_id: employee.company_id,
            passport: Some(PassportMessage {
                kind: employee.passport.kind,
                number: employee.passport.number,
            }),
            department: Some(DepartmentMessage {
                name: employee.department.name,
                phone: employee.department.phone,
            }),
        }
    }
}
