use async_trait::async_trait;

use crate::{
    AddEmployeeRequest, AddEmployeeResponse, ApiResult, CompanyEmployeesRequest,
    DeleteEmployeeRequest, DeleteEmployeeResponse, EmployeesResponse, UpdateEmployeeRequest,
    UpdateEmployeeResponse,
};

/// RPC surface of the employee service.
///
/// Implemented in-process by the HR product and remotely by the gateway's
/// HTTP client, so handlers on either side can be driven without a network.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn add_employee(&self, request: AddEmployeeRequest) -> ApiResult<AddEmployeeResponse>;

    async fn delete_employee(
        &self,
        request: DeleteEmployeeRequest,
    ) -> ApiResult<DeleteEmployeeResponse>;

    async fn show_company_employees(
        &self,
        request: CompanyEmployeesRequest,
    ) -> ApiResult<EmployeesResponse>;

    async fn update_employee(
        &self,
        request: UpdateEmployeeRequest,
    ) -> ApiResult<UpdateEmployeeResponse>;
}
