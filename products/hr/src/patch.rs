//! Sparse patches. A field counts as supplied when it is non-empty (strings)
//! or non-zero (ids); everything else keeps its stored value.

use entity::{employees, passports};
use sea_orm::Value;

use crate::model::Department;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Supplied fields as `(column, value)` pairs.
    pub fn columns(&self) -> Vec<(employees::Column, Value)> {
        let mut columns = Vec::with_capacity(4);
        push_text(&mut columns, employees::Column::Name, &self.name);
        push_text(&mut columns, employees::Column::Surname, &self.surname);
        push_text(&mut columns, employees::Column::Phone, &self.phone);
        if self.company_id != 0 {
            columns.push((employees::Column::CompanyId, self.company_id.into()));
        }
        columns
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassportPatch {
    pub kind: String,
    pub number: String,
}

impl PassportPatch {
    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    pub fn columns(&self) -> Vec<(passports::Column, Value)> {
        let mut columns = Vec::with_capacity(2);
        push_text(&mut columns, passports::Column::Kind, &self.kind);
        push_text(&mut columns, passports::Column::Number, &self.number);
        columns
    }
}

fn push_text<C>(columns: &mut Vec<(C, Value)>, column: C, value: &str) {
    if !value.is_empty() {
        columns.push((column, value.to_owned().into()));
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepartmentPatch {
    pub name: String,
    pub phone: String,
}

/// What a department patch asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepartmentChange {
    Unchanged,
    Exact(Department),
    /// New name, keep the current department's phone.
    Rename(String),
    /// New phone, keep the current department's name.
    Rephone(String),
}

impl DepartmentPatch {
    pub fn is_empty(&self) -> bool {
        self.change() == DepartmentChange::Unchanged
    }

    pub fn change(&self) -> DepartmentChange {
        match (self.name.is_empty(), self.phone.is_empty()) {
            (true, true) => DepartmentChange::Unchanged,
            (false, false) => {
                DepartmentChange::Exact(Department::new(self.name.clone(), self.phone.clone()))
            }
            (false, true) => DepartmentChange::Rename(self.name.clone()),
            (true, false) => DepartmentChange::Rephone(self.phone.clone()),
        }
    }
}

impl DepartmentChange {
    /// Whether the effective target depends on the current department.
    pub fn needs_current(&self) -> bool {
        matches!(self, DepartmentChange::Rename(_) | DepartmentChange::Rephone(_))
    }

    /// Effective target department, `None` when nothing changes.
    pub fn target(self, current: &Department) -> Option<Department> {
        match self {
            DepartmentChange::Unchanged => None,
            DepartmentChange::Exact(department) => Some(department),
            DepartmentChange::Rename(name) => Some(Department::new(name, current.phone.clone())),
            DepartmentChange::Rephone(phone) => Some(Department::new(current.name.clone(), phone)),
        }
    }
}
