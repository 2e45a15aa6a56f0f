//! SeaORM models for the employee store.

pub mod departments;
pub mod employees;
pub mod passports;
