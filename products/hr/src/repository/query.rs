use entity::{departments, employees, passports};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use tracing::instrument;

use super::SeaOrmEmployeeRepository;
use crate::{
    error::{RepoResult, StorageContext},
    model::{Department, Employee, Passport},
};

#[derive(Debug, FromQueryResult)]
struct EmployeeRow {
    id: i32,
    name: String,
    surname: String,
    phone: String,
    company_id: i32,
    passport_type: String,
    passport_number: String,
    department_name: String,
    department_phone: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            company_id: row.company_id,
            passport: Passport {
                kind: row.passport_type,
                number: row.passport_number,
            },
            department: Department::new(row.department_name, row.department_phone),
        }
    }
}

impl SeaOrmEmployeeRepository {
    #[instrument(name = "employee_repo.show_company_employees", skip(self))]
    pub(super) async fn company_employees(
        &self,
        company_id: i32,
        department: &Department,
    ) -> RepoResult<Vec<Employee>> {
        let rows = company_listing(company_id, department)
            .into_model::<EmployeeRow>()
            .all(&self.db)
            .await
            .op("show_company_employees: query")?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    pub(super) async fn employee_by_id(&self, id: i32) -> RepoResult<Option<Employee>> {
        let row = hydrated()
            .filter(employees::Column::Id.eq(id))
            .into_model::<EmployeeRow>()
            .one(&self.db)
            .await
            .op("find_employee: query")?;
        Ok(row.map(Employee::from))
    }
}

/// Employees joined to their department and passport. Inner joins: an
/// employee missing either row is not returned.
fn hydrated() -> Select<employees::Entity> {
    employees::Entity::find()
        .select_only()
        .columns([
            employees::Column::Id,
            employees::Column::Name,
            employees::Column::Surname,
            employees::Column::Phone,
            employees::Column::CompanyId,
        ])
        .column_as(passports::Column::Kind, "passport_type")
        .column_as(passports::Column::Number, "passport_number")
        .column_as(departments::Column::Name, "department_name")
        .column_as(departments::Column::Phone, "department_phone")
        .join(JoinType::InnerJoin, employees::Relation::Department.def())
        .join(JoinType::InnerJoin, employees::Relation::Passport.def())
}

fn company_listing(company_id: i32, department: &Department) -> Select<employees::Entity> {
    hydrated()
        .filter(listing_condition(company_id, department))
        .order_by_asc(employees::Column::Id)
}

/// Company match plus whichever department fields are non-empty.
fn listing_condition(company_id: i32, department: &Department) -> Condition {
    let company = Condition::all().add(employees::Column::CompanyId.eq(company_id));
    match (department.name.is_empty(), department.phone.is_empty()) {
        (true, true) => company,
        (false, true) => company.add(departments::Column::Name.eq(department.name.as_str())),
        (true, false) => company.add(departments::Column::Phone.eq(department.phone.as_str())),
        (false, false) => company
            .add(departments::Column::Name.eq(department.name.as_str()))
            .add(departments::Column::Phone.eq(department.phone.as_str())),
    }
}
