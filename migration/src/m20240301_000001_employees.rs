use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    Phone,
}

#[derive(DeriveIden)]
enum Passports {
    Table,
    Id,
    Type,
    Number,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Surname,
    Phone,
    CompanyId,
    PassportId,
    DepartmentId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Departments::Phone).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        // Natural key for find-or-create; lets ON CONFLICT absorb racing inserts.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_departments_name_phone")
                    .table(Departments::Table)
                    .col(Departments::Name)
                    .col(Departments::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Passports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Passports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Passports::Type).string_len(64).not_null())
                    .col(ColumnDef::new(Passports::Number).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Employees::Surname).string_len(128).not_null())
                    .col(ColumnDef::new(Employees::Phone).string_len(64).not_null())
                    .col(ColumnDef::new(Employees::CompanyId).integer().not_null())
                    .col(
                        ColumnDef::new(Employees::PassportId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_passport")
                            .from(Employees::Table, Employees::PassportId)
                            .to(Passports::Table, Passports::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_company")
                    .table(Employees::Table)
                    .col(Employees::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_department")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Passports::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
