use serde::{Deserialize, Serialize};

use crate::patch::{DepartmentPatch, EmployeePatch, PassportPatch};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Passport {
    pub kind: String,
    pub number: String,
}

/// Department value. Two departments with the same `(name, phone)` are the
/// same department.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Department {
    pub name: String,
    pub phone: String,
}

impl Department {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport: Passport,
    pub department: Department,
}

/// Input of `add_employee`; the id is assigned by storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport: Passport,
    pub department: Department,
}

/// Input of `update_employee`: three independent patch groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub id: i32,
    pub employee: EmployeePatch,
    pub passport: PassportPatch,
    pub department: DepartmentPatch,
}

impl EmployeeUpdate {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee.is_empty() && self.passport.is_empty() && self.department.is_empty()
    }
}
