//! Find-or-create and reference-counted cleanup of shared departments.
//!
//! Both functions take the caller's transaction so the check and the write
//! it guards see the same state.

use entity::{departments, employees};
use sea_orm::{
    ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    Set, sea_query::OnConflict,
};
use tracing::{debug, instrument};

use crate::{
    error::{RepoError, RepoResult, StorageContext},
    model::Department,
};

/// Id of the department with exactly this `(name, phone)`, inserting it when
/// absent.
///
/// The insert is `ON CONFLICT DO NOTHING` against the unique
/// `(name, phone)` index followed by a re-read, so two transactions racing
/// on the same new pair end up sharing one row.
#[instrument(name = "employee_repo.resolve_department", skip_all)]
pub async fn resolve_department(txn: &DatabaseTransaction, department: &Department) -> RepoResult<i32> {
    if let Some(id) = find_department_id(txn, department).await? {
        debug!(department_id = id, "reusing department");
        return Ok(id);
    }

    let row = departments::ActiveModel {
        name: Set(department.name.clone()),
        phone: Set(department.phone.clone()),
        ..Default::default()
    };
    let inserted = departments::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([departments::Column::Name, departments::Column::Phone])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await
        .op("resolve_department: insert department")?;
    if inserted == 0 {
        debug!("department inserted concurrently; reusing it");
    }

    let id = find_department_id(txn, department).await?.ok_or_else(|| {
        RepoError::Storage {
            op: "resolve_department: reload department".into(),
            source: DbErr::RecordNotFound("department vanished after insert".into()),
        }
    })?;
    debug!(department_id = id, "created department");
    Ok(id)
}

async fn find_department_id(
    txn: &DatabaseTransaction,
    department: &Department,
) -> RepoResult<Option<i32>> {
    departments::Entity::find()
        .select_only()
        .column(departments::Column::Id)
        .filter(departments::Column::Name.eq(department.name.as_str()))
        .filter(departments::Column::Phone.eq(department.phone.as_str()))
        .into_tuple::<i32>()
        .one(txn)
        .await
        .op("resolve_department: select department")
}

/// Delete `department_id` when no employee references it any more.
///
/// Call only after the employee that used to reference it has been deleted
/// or re-pointed within `txn`. Returns whether the row was removed.
///
/// The department row is locked before counting, so concurrent reclaimers of
/// one department run one after the other and the later one counts against
/// committed state.
#[instrument(name = "employee_repo.reclaim_department", skip(txn))]
pub async fn reclaim_if_unused(txn: &DatabaseTransaction, department_id: i32) -> RepoResult<bool> {
    let locked = departments::Entity::find_by_id(department_id)
        .select_only()
        .column(departments::Column::Id)
        .lock_exclusive()
        .into_tuple::<i32>()
        .one(txn)
        .await
        .op("reclaim_department: lock department")?;
    if locked.is_none() {
        return Ok(false);
    }

    let references = employees::Entity::find()
        .filter(employees::Column::DepartmentId.eq(department_id))
        .count(txn)
        .await
        .op("reclaim_department: count employees")?;
    if references > 0 {
        return Ok(false);
    }

    let result = departments::Entity::delete_by_id(department_id)
        .exec(txn)
        .await
        .op("reclaim_department: delete department")?;
    debug!(rows = result.rows_affected, "reclaimed unused department");
    Ok(result.rows_affected > 0)
}
