//! Initial database migration.
//!
//! Creates the companies, monthly_business_data and business_targets tables.
//! Built with the schema builder so the same migration runs on Postgres and
//! on the SQLite databases used in tests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: COMPANIES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Description).text())
                    .col(
                        ColumnDef::new(Companies::CapitaleSociale)
                            .decimal_len(15, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Companies::UserId).uuid().not_null())
                    .col(timestamp(Companies::CreatedAt))
                    .col(timestamp(Companies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_companies_user")
                    .table(Companies::Table)
                    .col(Companies::UserId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: MONTHLY FIGURES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(MonthlyBusinessData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyBusinessData::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlyBusinessData::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(MonthlyBusinessData::Month).integer().not_null())
                    .col(ColumnDef::new(MonthlyBusinessData::Year).integer().not_null())
                    .col(amount(MonthlyBusinessData::Ricavi))
                    .col(amount(MonthlyBusinessData::CostiDiretti))
                    .col(amount(MonthlyBusinessData::CostiTotali))
                    .col(amount(MonthlyBusinessData::CompensoImprenditore))
                    .col(amount(MonthlyBusinessData::Margine))
                    .col(amount(MonthlyBusinessData::UtileNetto))
                    .col(timestamp(MonthlyBusinessData::CreatedAt))
                    .col(timestamp(MonthlyBusinessData::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_business_data_company")
                            .from(MonthlyBusinessData::Table, MonthlyBusinessData::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .check(
                        Expr::col(MonthlyBusinessData::Month)
                            .gte(1)
                            .and(Expr::col(MonthlyBusinessData::Month).lte(12)),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per company and period
        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_business_data_period")
                    .table(MonthlyBusinessData::Table)
                    .col(MonthlyBusinessData::CompanyId)
                    .col(MonthlyBusinessData::Year)
                    .col(MonthlyBusinessData::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: TARGETS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(BusinessTargets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusinessTargets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BusinessTargets::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(BusinessTargets::Year).integer().not_null())
                    .col(ColumnDef::new(BusinessTargets::TargetRicavi).decimal_len(15, 2))
                    .col(ColumnDef::new(BusinessTargets::TargetMargine).decimal_len(15, 2))
                    .col(ColumnDef::new(BusinessTargets::TargetUtileNetto).decimal_len(15, 2))
                    .col(timestamp(BusinessTargets::CreatedAt))
                    .col(timestamp(BusinessTargets::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_targets_company")
                            .from(BusinessTargets::Table, BusinessTargets::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One target row per company and year
        manager
            .create_index(
                Index::create()
                    .name("uq_business_targets_year")
                    .table(BusinessTargets::Table)
                    .col(BusinessTargets::CompanyId)
                    .col(BusinessTargets::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BusinessTargets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MonthlyBusinessData::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

fn amount<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .decimal_len(15, 2)
        .not_null()
        .default(0)
        .to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    Description,
    CapitaleSociale,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MonthlyBusinessData {
    Table,
    Id,
    CompanyId,
    Month,
    Year,
    Ricavi,
    CostiDiretti,
    CostiTotali,
    CompensoImprenditore,
    Margine,
    UtileNetto,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BusinessTargets {
    Table,
    Id,
    CompanyId,
    Year,
    TargetRicavi,
    TargetMargine,
    TargetUtileNetto,
    CreatedAt,
    UpdatedAt,
}
