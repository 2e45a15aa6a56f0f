mod common;

use common::{department_rows, new_employee, passport_count, setup};
use entity::{employees, passports};
use products_hr::{
    Department, EmployeeRepository, EmployeeUpdate, RepoError,
    patch::{DepartmentPatch, EmployeePatch, PassportPatch},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

async fn department_id_of(repo: &products_hr::SeaOrmEmployeeRepository, id: i32) -> i32 {
    employees::Entity::find_by_id(id)
        .one(repo.pool())
        .await
        .unwrap()
        .unwrap()
        .department_id
}

#[tokio::test]
async fn add_returns_the_employee_id_and_persists_everything() {
    let repo = setup().await;
    let input = new_employee("ada", 5, Department::new("Eng", "100"));

    let id = repo.add_employee(input.clone()).await.unwrap();

    let stored = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, input.name);
    assert_eq!(stored.surname, input.surname);
    assert_eq!(stored.company_id, 5);
    assert_eq!(stored.passport, input.passport);
    assert_eq!(stored.department, Department::new("Eng", "100"));
}

#[tokio::test]
async fn identical_departments_share_one_row() {
    let repo = setup().await;
    let sales = Department::new("Sales", "111");

    let first = repo.add_employee(new_employee("ann", 1, sales.clone())).await.unwrap();
    let second = repo.add_employee(new_employee("bob", 1, sales)).await.unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(
        department_id_of(&repo, first).await,
        department_id_of(&repo, second).await
    );
    assert_eq!(department_rows(repo.pool()).await.len(), 1);
}

#[tokio::test]
async fn department_survives_until_its_last_employee_is_deleted() {
    let repo = setup().await;
    let sales = Department::new("Sales", "111");
    let first = repo.add_employee(new_employee("ann", 1, sales.clone())).await.unwrap();
    let second = repo.add_employee(new_employee("bob", 1, sales.clone())).await.unwrap();

    repo.delete_employee(first).await.unwrap();
    let remaining = department_rows(repo.pool()).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Sales");
    assert_eq!(remaining[0].phone, "111");

    repo.delete_employee(second).await.unwrap();
    assert!(department_rows(repo.pool()).await.is_empty());
}

#[tokio::test]
async fn deleting_an_employee_deletes_its_passport() {
    let repo = setup().await;
    let keep = repo
        .add_employee(new_employee("ann", 1, Department::new("Ops", "1")))
        .await
        .unwrap();
    let gone = repo
        .add_employee(new_employee("bob", 1, Department::new("Ops", "1")))
        .await
        .unwrap();
    assert_eq!(passport_count(repo.pool()).await, 2);

    repo.delete_employee(gone).await.unwrap();

    assert_eq!(passport_count(repo.pool()).await, 1);
    assert!(repo.find_employee(gone).await.unwrap().is_none());
    let kept = repo.find_employee(keep).await.unwrap().unwrap();
    assert_eq!(kept.passport.number, "P-ann");
}

#[tokio::test]
async fn deleting_an_unknown_employee_is_not_found() {
    let repo = setup().await;
    let err = repo.delete_employee(42).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "employee",
            id: 42
        }
    ));
}

#[tokio::test]
async fn name_only_update_leaves_everything_else_alone() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 3, Department::new("Eng", "100")))
        .await
        .unwrap();
    let before = repo.find_employee(id).await.unwrap().unwrap();

    let mut update = EmployeeUpdate::new(id);
    update.employee = EmployeePatch {
        name: "Annabel".into(),
        ..EmployeePatch::default()
    };
    repo.update_employee(update).await.unwrap();

    let after = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(after.name, "Annabel");
    assert_eq!(after.surname, before.surname);
    assert_eq!(after.phone, before.phone);
    assert_eq!(after.company_id, before.company_id);
    assert_eq!(after.passport, before.passport);
    assert_eq!(after.department, before.department);
}

#[tokio::test]
async fn passport_update_targets_the_employees_own_passport() {
    let repo = setup().await;
    // An unrelated passport row shifts passport ids away from employee ids.
    let stray = passports::ActiveModel {
        kind: Set("stray".into()),
        number: Set("X-0".into()),
        ..Default::default()
    }
    .insert(repo.pool())
    .await
    .unwrap();
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "1")))
        .await
        .unwrap();
    assert_eq!(id, stray.id);

    let mut update = EmployeeUpdate::new(id);
    update.passport = PassportPatch {
        number: "P-new".into(),
        ..PassportPatch::default()
    };
    repo.update_employee(update).await.unwrap();

    let after = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(after.passport.number, "P-new");
    assert_eq!(after.passport.kind, "national");
    let untouched = passports::Entity::find_by_id(stray.id)
        .one(repo.pool())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.number, "X-0");
}

#[tokio::test]
async fn renaming_inherits_phone_and_reclaims_the_old_department() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Old", "222")))
        .await
        .unwrap();

    let mut update = EmployeeUpdate::new(id);
    update.department = DepartmentPatch {
        name: "NewDept".into(),
        ..DepartmentPatch::default()
    };
    repo.update_employee(update).await.unwrap();

    let after = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(after.department, Department::new("NewDept", "222"));
    let rows = department_rows(repo.pool()).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "NewDept");
}

#[tokio::test]
async fn phone_only_change_keeps_the_name() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap();

    let mut update = EmployeeUpdate::new(id);
    update.department = DepartmentPatch {
        phone: "200".into(),
        ..DepartmentPatch::default()
    };
    repo.update_employee(update).await.unwrap();

    let after = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(after.department, Department::new("Eng", "200"));
}

#[tokio::test]
async fn reassignment_keeps_a_department_that_is_still_referenced() {
    let repo = setup().await;
    let shared = Department::new("Shared", "1");
    let mover = repo.add_employee(new_employee("ann", 1, shared.clone())).await.unwrap();
    let stayer = repo.add_employee(new_employee("bob", 1, shared.clone())).await.unwrap();
    let target = repo
        .add_employee(new_employee("cid", 1, Department::new("Target", "2")))
        .await
        .unwrap();

    let mut update = EmployeeUpdate::new(mover);
    update.department = DepartmentPatch {
        name: "Target".into(),
        phone: "2".into(),
    };
    repo.update_employee(update).await.unwrap();

    assert_eq!(
        department_id_of(&repo, mover).await,
        department_id_of(&repo, target).await
    );
    let stayer_department = repo.find_employee(stayer).await.unwrap().unwrap().department;
    assert_eq!(stayer_department, shared);
    assert_eq!(department_rows(repo.pool()).await.len(), 2);
}

#[tokio::test]
async fn moving_to_the_current_department_changes_nothing() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap();
    let before = department_id_of(&repo, id).await;

    let mut update = EmployeeUpdate::new(id);
    update.department = DepartmentPatch {
        name: "Eng".into(),
        phone: "100".into(),
    };
    repo.update_employee(update).await.unwrap();

    assert_eq!(department_id_of(&repo, id).await, before);
    assert_eq!(department_rows(repo.pool()).await.len(), 1);
}

#[tokio::test]
async fn updating_an_unknown_employee_is_not_found() {
    let repo = setup().await;
    let mut update = EmployeeUpdate::new(9);
    update.employee.name = "ghost".into();
    let err = repo.update_employee(update).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_update_is_a_successful_no_op() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap();
    let before = repo.find_employee(id).await.unwrap().unwrap();

    repo.update_employee(EmployeeUpdate::new(id)).await.unwrap();

    assert_eq!(repo.find_employee(id).await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn listing_composes_company_and_department_filters() {
    let repo = setup().await;
    let a = repo
        .add_employee(new_employee("a", 5, Department::new("Eng", "111")))
        .await
        .unwrap();
    let b = repo
        .add_employee(new_employee("b", 5, Department::new("Eng", "222")))
        .await
        .unwrap();
    let c = repo
        .add_employee(new_employee("c", 5, Department::new("Ops", "111")))
        .await
        .unwrap();
    repo.add_employee(new_employee("d", 6, Department::new("Eng", "111")))
        .await
        .unwrap();

    let ids = |employees: Vec<products_hr::Employee>| {
        employees.into_iter().map(|e| e.id).collect::<Vec<_>>()
    };

    let all = repo.list_company_employees(5, &Department::default()).await.unwrap();
    assert_eq!(ids(all), vec![a, b, c]);

    let eng = repo
        .list_company_employees(5, &Department::new("Eng", ""))
        .await
        .unwrap();
    assert_eq!(ids(eng), vec![a, b]);

    let by_phone = repo
        .list_company_employees(5, &Department::new("", "111"))
        .await
        .unwrap();
    assert_eq!(ids(by_phone), vec![a, c]);

    let exact = repo
        .list_company_employees(5, &Department::new("Eng", "111"))
        .await
        .unwrap();
    assert_eq!(ids(exact), vec![a]);

    let nobody = repo.list_company_employees(7, &Department::default()).await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn listed_employees_are_fully_hydrated() {
    let repo = setup().await;
    let input = new_employee("ann", 5, Department::new("Eng", "111"));
    repo.add_employee(input.clone()).await.unwrap();

    let listed = repo.list_company_employees(5, &Department::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].passport, input.passport);
    assert_eq!(listed[0].department, input.department);
    assert_eq!(listed[0].phone, input.phone);
}

#[tokio::test]
async fn blank_department_is_stored_and_shared() {
    let repo = setup().await;
    let first = repo
        .add_employee(new_employee("ann", 1, Department::default()))
        .await
        .unwrap();
    let second = repo
        .add_employee(new_employee("bob", 1, Department::default()))
        .await
        .unwrap();

    let rows = department_rows(repo.pool()).await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0].name.is_empty() && rows[0].phone.is_empty());
    assert_eq!(
        department_id_of(&repo, first).await,
        department_id_of(&repo, second).await
    );
}

#[tokio::test]
async fn failed_add_rolls_back_the_department() {
    let repo = setup().await;
    repo.pool()
        .execute_unprepared("DROP TABLE passports")
        .await
        .unwrap();

    let err = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap_err();

    match err {
        RepoError::Storage { ref op, .. } => assert_eq!(op, "add_employee: insert passport"),
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert!(department_rows(repo.pool()).await.is_empty());
}

#[tokio::test]
async fn failed_department_step_rolls_back_the_whole_update() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap();
    repo.pool()
        .execute_unprepared("ALTER TABLE departments RENAME COLUMN phone TO phone_x")
        .await
        .unwrap();

    let mut update = EmployeeUpdate::new(id);
    update.employee = EmployeePatch {
        name: "Annabel".into(),
        ..EmployeePatch::default()
    };
    update.passport = PassportPatch {
        number: "P-new".into(),
        ..PassportPatch::default()
    };
    update.department = DepartmentPatch {
        name: "Research".into(),
        ..DepartmentPatch::default()
    };
    let err = repo.update_employee(update).await.unwrap_err();

    match err {
        RepoError::Storage { ref op, .. } => assert_eq!(op, "update_employee: select department"),
        other => panic!("expected storage failure, got {other:?}"),
    }
    let stored = employees::Entity::find_by_id(id)
        .one(repo.pool())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "ann");
    let passport = passports::Entity::find_by_id(stored.passport_id)
        .one(repo.pool())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(passport.number, "P-ann");
}

#[tokio::test]
async fn failed_delete_keeps_employee_and_passport() {
    let repo = setup().await;
    let id = repo
        .add_employee(new_employee("ann", 1, Department::new("Eng", "100")))
        .await
        .unwrap();
    repo.pool()
        .execute_unprepared("ALTER TABLE passports RENAME TO passports_moved")
        .await
        .unwrap();

    let err = repo.delete_employee(id).await.unwrap_err();

    match err {
        RepoError::Storage { ref op, .. } => assert_eq!(op, "delete_employee: delete passport"),
        other => panic!("expected storage failure, got {other:?}"),
    }
    repo.pool()
        .execute_unprepared("ALTER TABLE passports_moved RENAME TO passports")
        .await
        .unwrap();
    let stored = repo.find_employee(id).await.unwrap().unwrap();
    assert_eq!(stored.passport.number, "P-ann");
    assert_eq!(passport_count(repo.pool()).await, 1);
    assert_eq!(department_rows(repo.pool()).await.len(), 1);
}
