//! Integration tests for the SeaORM record store.
//!
//! Runs the migrations against an in-memory SQLite database.

use bizpulse_core::company::{CompanyChanges, NewCompany};
use bizpulse_core::metrics::DerivedMetrics;
use bizpulse_core::records::{MonthlyFigures, MonthlyRecordUpdate, MonthlyRecordUpsert};
use bizpulse_core::store::{RecordStore, StoreError};
use bizpulse_core::targets::TargetUpsert;
use bizpulse_db::SeaOrmStore;
use bizpulse_db::migration::{Migrator, MigratorTrait};
use bizpulse_shared::types::{CompanyId, MonthlyRecordId, Period, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database};

/// Creates a migrated in-memory store.
async fn setup() -> SeaOrmStore {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A single connection keeps every query on the same in-memory database.
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    SeaOrmStore::new(db)
}

async fn create_company(store: &SeaOrmStore, user_id: UserId, name: &str) -> CompanyId {
    store
        .insert_company(NewCompany {
            user_id,
            fields: CompanyChanges {
                name: name.to_string(),
                description: None,
                share_capital: dec!(10000),
            },
        })
        .await
        .expect("Failed to create company")
        .id
}

fn upsert(company_id: CompanyId, month: u32, year: i32, revenue: Decimal) -> MonthlyRecordUpsert {
    let figures = MonthlyFigures {
        revenue,
        direct_costs: dec!(18000),
        total_costs: dec!(30000),
        owner_compensation: dec!(4000),
    };
    MonthlyRecordUpsert {
        company_id,
        period: Period::new(month, year).unwrap(),
        figures,
        metrics: DerivedMetrics {
            margin: revenue - figures.direct_costs,
            net_income: revenue - figures.total_costs,
        },
    }
}

#[tokio::test]
async fn test_company_insert_update_and_list() {
    let store = setup().await;
    let owner = UserId::new();
    let company_id = create_company(&store, owner, "Acme").await;
    create_company(&store, UserId::new(), "Other").await;

    let updated = store
        .update_company(
            company_id,
            CompanyChanges {
                name: "Acme Srl".to_string(),
                description: Some("Consulenza".to_string()),
                share_capital: dec!(20000),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme Srl");
    assert_eq!(updated.share_capital, dec!(20000));

    let companies = store.list_companies(owner).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].description.as_deref(), Some("Consulenza"));
}

#[tokio::test]
async fn test_update_unknown_company_is_not_found() {
    let store = setup().await;

    let err = store
        .update_company(
            CompanyId::new(),
            CompanyChanges {
                name: "Ghost".to_string(),
                description: None,
                share_capital: Decimal::ZERO,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_monthly_upsert_is_keyed_on_period() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;

    let first = store
        .upsert_monthly_record(upsert(company_id, 3, 2024, dec!(45000)))
        .await
        .unwrap();
    let second = store
        .upsert_monthly_record(upsert(company_id, 3, 2024, dec!(50000)))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    let records = store.list_monthly_records(company_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].figures.revenue, dec!(50000));
    assert_eq!(records[0].margin, dec!(32000));
}

#[tokio::test]
async fn test_monthly_records_ordered_by_period() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;
    for (month, year) in [(3, 2024), (12, 2023), (1, 2024)] {
        store
            .upsert_monthly_record(upsert(company_id, month, year, dec!(1000)))
            .await
            .unwrap();
    }

    let periods: Vec<String> = store
        .list_monthly_records(company_id)
        .await
        .unwrap()
        .iter()
        .map(|r| r.period.to_string())
        .collect();
    assert_eq!(periods, vec!["2023-12", "2024-01", "2024-03"]);
}

#[tokio::test]
async fn test_monthly_update_and_delete() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;
    let record = store
        .upsert_monthly_record(upsert(company_id, 1, 2024, dec!(45000)))
        .await
        .unwrap();

    let mut figures = record.figures;
    figures.revenue = dec!(47000);
    let updated = store
        .update_monthly_record(
            record.id,
            MonthlyRecordUpdate {
                figures,
                metrics: DerivedMetrics {
                    margin: dec!(29000),
                    net_income: dec!(17000),
                },
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.figures.revenue, dec!(47000));
    assert_eq!(updated.net_income, dec!(17000));

    store.delete_monthly_record(record.id).await.unwrap();
    assert!(store.find_monthly_record(record.id).await.unwrap().is_none());

    let err = store.delete_monthly_record(record.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_unknown_record_is_not_found() {
    let store = setup().await;

    let err = store
        .update_monthly_record(
            MonthlyRecordId::new(),
            MonthlyRecordUpdate {
                figures: MonthlyFigures::default(),
                metrics: DerivedMetrics::default(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_target_upsert_per_year() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;
    let target = |year: i32, margin: Option<Decimal>| TargetUpsert {
        company_id,
        year,
        target_revenue: Some(dec!(50000)),
        target_margin: margin,
        target_net_income: None,
    };

    store.upsert_target(target(2023, None)).await.unwrap();
    store.upsert_target(target(2024, Some(dec!(30000)))).await.unwrap();
    let replaced = store.upsert_target(target(2024, None)).await.unwrap();

    assert_eq!(replaced.target_margin, None);
    let targets = store.list_targets(company_id).await.unwrap();
    let years: Vec<i32> = targets.iter().map(|t| t.year).collect();
    assert_eq!(years, vec![2024, 2023]);
}

#[tokio::test]
async fn test_concurrent_upserts_for_one_period_both_succeed() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;

    let (a, b) = tokio::join!(
        store.upsert_monthly_record(upsert(company_id, 4, 2024, dec!(55000))),
        store.upsert_monthly_record(upsert(company_id, 4, 2024, dec!(56000))),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.id, b.id);
    let records = store.list_monthly_records(company_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!([dec!(55000), dec!(56000)].contains(&records[0].figures.revenue));
    assert_eq!(
        records[0].margin,
        records[0].figures.revenue - records[0].figures.direct_costs
    );
}

#[tokio::test]
async fn test_upsert_keeps_created_at_of_existing_record() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;

    let first = store
        .upsert_monthly_record(upsert(company_id, 5, 2024, dec!(58000)))
        .await
        .unwrap();
    let second = store
        .upsert_monthly_record(upsert(company_id, 5, 2024, dec!(60000)))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.figures.revenue, dec!(60000));
}

#[tokio::test]
async fn test_concurrent_target_upserts_for_one_year_both_succeed() {
    let store = setup().await;
    let company_id = create_company(&store, UserId::new(), "Acme Srl").await;
    let target = |revenue: Decimal| TargetUpsert {
        company_id,
        year: 2024,
        target_revenue: Some(revenue),
        target_margin: None,
        target_net_income: None,
    };

    let (a, b) = tokio::join!(
        store.upsert_target(target(dec!(50000))),
        store.upsert_target(target(dec!(52000))),
    );
    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(store.list_targets(company_id).await.unwrap().len(), 1);
}
