#![allow(dead_code)]

use entity::{departments, passports};
use migration::{Migrator, MigratorTrait};
use products_hr::{Department, NewEmployee, Passport, SeaOrmEmployeeRepository};
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};

/// Fresh in-memory SQLite store with the production schema applied.
pub async fn setup() -> SeaOrmEmployeeRepository {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&conn, None).await.unwrap();
    SeaOrmEmployeeRepository::new(conn)
}

pub fn new_employee(name: &str, company_id: i32, department: Department) -> NewEmployee {
    NewEmployee {
        name: name.into(),
        surname: format!("{name}son"),
        phone: format!("+1-555-{:04}", name.len()),
        company_id,
        passport: Passport {
            kind: "national".into(),
            number: format!("P-{name}"),
        },
        department,
    }
}

pub async fn department_rows(db: &DatabaseConnection) -> Vec<departments::Model> {
    departments::Entity::find().all(db).await.unwrap()
}

pub async fn passport_count(db: &DatabaseConnection) -> u64 {
    passports::Entity::find().count(db).await.unwrap()
}
