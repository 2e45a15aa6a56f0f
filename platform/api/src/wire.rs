//! JSON messages exchanged between the gateway and the employee service.
//!
//! Every field defaults when missing so partially filled payloads decode the
//! same way the service expects: empty strings and zero ids mean "not
//! supplied".

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentMessage {
    pub name: String,
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeMessage {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport: Option<PassportMessage>,
    pub department: Option<DepartmentMessage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddEmployeeRequest {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport: Option<PassportMessage>,
    pub department: Option<DepartmentMessage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeResponse {
    pub id: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteEmployeeRequest {
    pub id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub success: OperationStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyEmployeesRequest {
    pub company_id: i32,
    pub department: Option<DepartmentMessage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeesResponse {
    pub employees: Vec<EmployeeMessage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateEmployeeRequest {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport: Option<PassportMessage>,
    pub department: Option<DepartmentMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeResponse {
    pub success: OperationStatus,
}

/// Outcome flag returned by delete and update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Success,
    Fail,
}

/// Paths of the employee service RPC endpoints.
pub mod rpc {
    pub const ADD_EMPLOYEE: &str = "/rpc/employee.EmployeeService/AddEmployee";
    pub const DELETE_EMPLOYEE: &str = "/rpc/employee.EmployeeService/DeleteEmployee";
    pub const SHOW_COMPANY_EMPLOYEES: &str = "/rpc/employee.EmployeeService/ShowCompanyEmployees";
    pub const UPDATE_EMPLOYEE: &str = "/rpc/employee.EmployeeService/UpdateEmployee";
}
