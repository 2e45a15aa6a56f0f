use entity::{departments, employees, passports};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info, instrument};

use super::{
    SeaOrmEmployeeRepository,
    department::{reclaim_if_unused, resolve_department},
};
use crate::{
    error::{RepoError, RepoResult, StorageContext},
    model::{Department, EmployeeUpdate, NewEmployee},
    patch::{DepartmentChange, EmployeePatch, PassportPatch},
};

impl SeaOrmEmployeeRepository {
    #[instrument(name = "employee_repo.add_employee", skip_all, fields(company_id = employee.company_id))]
    pub(super) async fn insert_employee(&self, employee: NewEmployee) -> RepoResult<i32> {
        let txn = self.db.begin().await.op("add_employee: begin transaction")?;

        let department_id = resolve_department(&txn, &employee.department)
            .await
            .map_err(|err| err.within("add_employee"))?;

        let passport = passports::ActiveModel {
            kind: Set(employee.passport.kind),
            number: Set(employee.passport.number),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .op("add_employee: insert passport")?;

        let record = employees::ActiveModel {
            name: Set(employee.name),
            surname: Set(employee.surname),
            phone: Set(employee.phone),
            company_id: Set(employee.company_id),
            passport_id: Set(passport.id),
            department_id: Set(department_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .op("add_employee: insert employee")?;

        txn.commit().await.op("add_employee: commit transaction")?;
        info!(employee_id = record.id, department_id, "employee added");
        Ok(record.id)
    }

    #[instrument(name = "employee_repo.delete_employee", skip(self))]
    pub(super) async fn remove_employee(&self, id: i32) -> RepoResult<()> {
        let txn = self.db.begin().await.op("delete_employee: begin transaction")?;

        let (passport_id, department_id) = owned_ids(&txn, id)
            .await
            .map_err(|err| err.within("delete_employee"))?;

        employees::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .op("delete_employee: delete employee")?;
        passports::Entity::delete_by_id(passport_id)
            .exec(&txn)
            .await
            .op("delete_employee: delete passport")?;
        let reclaimed = reclaim_if_unused(&txn, department_id)
            .await
            .map_err(|err| err.within("delete_employee"))?;

        txn.commit().await.op("delete_employee: commit transaction")?;
        info!(department_id, reclaimed, "employee deleted");
        Ok(())
    }

    #[instrument(name = "employee_repo.update_employee", skip_all, fields(employee_id = update.id))]
    pub(super) async fn patch_employee(&self, update: EmployeeUpdate) -> RepoResult<()> {
        let txn = self.db.begin().await.op("update_employee: begin transaction")?;

        let (passport_id, department_id) = owned_ids(&txn, update.id)
            .await
            .map_err(|err| err.within("update_employee"))?;
        if update.is_empty() {
            debug!("nothing to update");
        }

        apply_employee_patch(&txn, update.id, &update.employee).await?;
        apply_passport_patch(&txn, passport_id, &update.passport).await?;
        reassign_department(&txn, update.id, department_id, update.department.change()).await?;

        txn.commit().await.op("update_employee: commit transaction")?;
        Ok(())
    }
}

/// `(passport_id, department_id)` of an employee, row-locked for the rest of
/// the transaction where the backend supports it.
async fn owned_ids(txn: &DatabaseTransaction, id: i32) -> RepoResult<(i32, i32)> {
    employees::Entity::find_by_id(id)
        .select_only()
        .columns([employees::Column::PassportId, employees::Column::DepartmentId])
        .lock_exclusive()
        .into_tuple::<(i32, i32)>()
        .one(txn)
        .await
        .op("select passport and department ids")?
        .ok_or_else(|| RepoError::employee_not_found(id))
}

async fn apply_employee_patch(
    txn: &DatabaseTransaction,
    id: i32,
    patch: &EmployeePatch,
) -> RepoResult<()> {
    let columns = patch.columns();
    if columns.is_empty() {
        return Ok(());
    }
    let statement = columns.into_iter().fold(
        employees::Entity::update_many().filter(employees::Column::Id.eq(id)),
        |statement, (column, value)| statement.col_expr(column, Expr::value(value)),
    );
    statement
        .exec(txn)
        .await
        .op("update_employee: update employee data")?;
    Ok(())
}

/// Passports are addressed through the employee's `passport_id`.
async fn apply_passport_patch(
    txn: &DatabaseTransaction,
    passport_id: i32,
    patch: &PassportPatch,
) -> RepoResult<()> {
    let columns = patch.columns();
    if columns.is_empty() {
        return Ok(());
    }
    let statement = columns.into_iter().fold(
        passports::Entity::update_many().filter(passports::Column::Id.eq(passport_id)),
        |statement, (column, value)| statement.col_expr(column, Expr::value(value)),
    );
    statement
        .exec(txn)
        .await
        .op("update_employee: update passport")?;
    Ok(())
}

async fn reassign_department(
    txn: &DatabaseTransaction,
    employee_id: i32,
    old_department_id: i32,
    change: DepartmentChange,
) -> RepoResult<()> {
    let current = if change.needs_current() {
        current_department(txn, old_department_id).await?
    } else {
        Department::default()
    };
    let Some(target) = change.target(&current) else {
        return Ok(());
    };

    let new_department_id = resolve_department(txn, &target)
        .await
        .map_err(|err| err.within("update_employee"))?;
    if new_department_id == old_department_id {
        return Ok(());
    }

    employees::Entity::update_many()
        .col_expr(employees::Column::DepartmentId, Expr::value(new_department_id))
        .filter(employees::Column::Id.eq(employee_id))
        .exec(txn)
        .await
        .op("update_employee: update department id")?;
    reclaim_if_unused(txn, old_department_id)
        .await
        .map_err(|err| err.within("update_employee"))?;
    debug!(old_department_id, new_department_id, "department reassigned");
    Ok(())
}

async fn current_department(txn: &DatabaseTransaction, id: i32) -> RepoResult<Department> {
    let model = departments::Entity::find_by_id(id)
        .one(txn)
        .await
        .op("update_employee: select department")?
        .ok_or(RepoError::NotFound {
            entity: "department",
            id,
        })?;
    Ok(Department::new(model.name, model.phone))
}
