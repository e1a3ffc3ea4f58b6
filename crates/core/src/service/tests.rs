use std::sync::Arc;

use bizpulse_shared::NetIncomeFormula;
use bizpulse_shared::types::{AmountInput, CompanyId, MonthlyRecordId, Period, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::identity::StaticIdentity;
use crate::metrics::Advisory;
use crate::store::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    service: BusinessDataService<InMemoryStore>,
    user: StaticIdentity,
}

fn fixture(formula: NetIncomeFormula) -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    Fixture {
        service: BusinessDataService::new(Arc::clone(&store), formula),
        store,
        user: StaticIdentity::signed_in(UserId::new()),
    }
}

fn amount(value: Decimal) -> Option<AmountInput> {
    Some(AmountInput::Number(value))
}

fn entry(month: u32, year: i32, revenue: Decimal) -> MonthlyEntryInput {
    MonthlyEntryInput {
        month,
        year,
        revenue: amount(revenue),
        direct_costs: amount(dec!(18000)),
        total_costs: amount(dec!(30000)),
        owner_compensation: amount(dec!(4000)),
    }
}

async fn company(f: &Fixture, name: &str) -> CompanyId {
    f.service
        .create_company(&f.user, &CompanyInput::named(name))
        .await
        .unwrap()
        .company
        .id
}

#[tokio::test]
async fn test_submit_computes_primary_formula() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;

    let saved = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(1, 2024, dec!(45000)))
        .await
        .unwrap();

    assert_eq!(saved.record.margin, dec!(27000));
    assert_eq!(saved.record.net_income, dec!(15000));
    assert_eq!(saved.records, vec![saved.record.clone()]);
    assert!(saved.advisories.is_empty());
}

#[tokio::test]
async fn test_submit_same_period_twice_keeps_one_record() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;

    f.service
        .submit_monthly_record(&f.user, Some(company_id), &entry(3, 2024, dec!(45000)))
        .await
        .unwrap();
    let saved = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(3, 2024, dec!(50000)))
        .await
        .unwrap();

    assert_eq!(saved.records.len(), 1);
    assert_eq!(saved.records[0].figures.revenue, dec!(50000));
    assert_eq!(saved.records[0].margin, dec!(32000));
}

#[tokio::test]
async fn test_submit_without_company_never_reaches_store() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);

    let err = f
        .service
        .submit_monthly_record(&f.user, None, &entry(1, 2024, dec!(1)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BusinessError::Validation(ValidationError::NoCompanySelected)
    ));
    assert_eq!(f.store.call_count(), 0);
}

#[tokio::test]
async fn test_submit_invalid_period_never_reaches_store() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    let calls = f.store.call_count();

    let err = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(13, 2024, dec!(1)))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(f.store.call_count(), calls);
}

#[tokio::test]
async fn test_submit_negative_margin_still_persists() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;

    let saved = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(2, 2024, dec!(10000)))
        .await
        .unwrap();

    assert_eq!(
        saved.advisories,
        vec![
            Advisory::NegativeMargin(dec!(-8000)),
            Advisory::NegativeNetIncome(dec!(-20000)),
        ]
    );
    assert_eq!(saved.records.len(), 1);
}

#[tokio::test]
async fn test_records_listed_chronologically() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    for (month, year) in [(3, 2024), (12, 2023), (1, 2024)] {
        f.service
            .submit_monthly_record(&f.user, Some(company_id), &entry(month, year, dec!(1000)))
            .await
            .unwrap();
    }

    let periods: Vec<Period> = f
        .service
        .list_monthly_records(&f.user, company_id)
        .await
        .unwrap()
        .iter()
        .map(|r| r.period)
        .collect();

    assert_eq!(
        periods,
        vec![
            Period::new(12, 2023).unwrap(),
            Period::new(1, 2024).unwrap(),
            Period::new(3, 2024).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_update_merges_and_recomputes() {
    let f = fixture(NetIncomeFormula::MarginLessOwnerCompensation);
    let company_id = company(&f, "Acme Srl").await;
    let saved = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(4, 2024, dec!(55000)))
        .await
        .unwrap();
    assert_eq!(saved.record.net_income, dec!(33000));

    let patch = MonthlyRecordPatch {
        direct_costs: amount(dec!(20000)),
        ..MonthlyRecordPatch::default()
    };
    let updated = f
        .service
        .update_monthly_record(&f.user, saved.record.id, &patch)
        .await
        .unwrap();

    assert_eq!(updated.record.figures.revenue, dec!(55000));
    assert_eq!(updated.record.margin, dec!(35000));
    assert_eq!(updated.record.net_income, dec!(31000));
    assert_eq!(updated.records[0], updated.record);
}

#[tokio::test]
async fn test_update_unknown_record_is_not_found() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);

    let err = f
        .service
        .update_monthly_record(&f.user, MonthlyRecordId::new(), &MonthlyRecordPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BusinessError::Store(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn test_delete_removes_record_from_list() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    let jan = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(1, 2024, dec!(45000)))
        .await
        .unwrap()
        .record;
    f.service
        .submit_monthly_record(&f.user, Some(company_id), &entry(2, 2024, dec!(52000)))
        .await
        .unwrap();

    let remaining = f.service.delete_monthly_record(&f.user, jan.id).await.unwrap();
    assert_eq!(remaining.len(), 1);

    let listed = f
        .service
        .list_monthly_records(&f.user, company_id)
        .await
        .unwrap();
    assert!(listed.iter().all(|r| r.id != jan.id));

    let again = f.service.delete_monthly_record(&f.user, jan.id).await;
    assert!(matches!(again, Err(BusinessError::Store(StoreError::NotFound { .. }))));
}

#[tokio::test]
async fn test_create_company_with_blank_name_is_noop() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let input = CompanyInput {
        name: String::new(),
        description: Some("desc".to_string()),
        share_capital: None,
    };

    let err = f.service.create_company(&f.user, &input).await.unwrap_err();

    assert!(matches!(
        err,
        BusinessError::Validation(ValidationError::EmptyCompanyName)
    ));
    assert_eq!(f.store.call_count(), 0);
}

#[tokio::test]
async fn test_update_company_returns_reloaded_list() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme").await;
    let input = CompanyInput {
        name: " Acme Srl ".to_string(),
        description: Some("Consulenza".to_string()),
        share_capital: Some(AmountInput::Text("10000".to_string())),
    };

    let saved = f
        .service
        .update_company(&f.user, company_id, &input)
        .await
        .unwrap();

    assert_eq!(saved.company.name, "Acme Srl");
    assert_eq!(saved.company.share_capital, dec!(10000));
    assert_eq!(saved.companies, vec![saved.company.clone()]);
}

#[tokio::test]
async fn test_foreign_company_is_not_found() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    let intruder = StaticIdentity::signed_in(UserId::new());

    let err = f
        .service
        .list_monthly_records(&intruder, company_id)
        .await
        .unwrap_err();
    assert!(matches!(err, BusinessError::CompanyNotFound(id) if id == company_id));

    let companies = f.service.list_companies(&intruder).await.unwrap();
    assert!(companies.is_empty());
}

#[tokio::test]
async fn test_foreign_record_is_not_found() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    let record = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &entry(1, 2024, dec!(45000)))
        .await
        .unwrap()
        .record;
    let intruder = StaticIdentity::signed_in(UserId::new());

    let err = f
        .service
        .delete_monthly_record(&intruder, record.id)
        .await
        .unwrap_err();

    assert!(matches!(err, BusinessError::Store(StoreError::NotFound { .. })));
    assert_eq!(
        f.service
            .list_monthly_records(&f.user, company_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_signed_out_is_rejected() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);

    let err = f
        .service
        .list_companies(&StaticIdentity::signed_out())
        .await
        .unwrap_err();
    assert!(matches!(err, BusinessError::Unauthenticated));
}

#[tokio::test]
async fn test_save_targets_upserts_per_year() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    let input = |margin: Decimal| TargetInput {
        year: 2024,
        target_margin: amount(margin),
        ..TargetInput::default()
    };

    f.service
        .save_targets(&f.user, Some(company_id), &input(dec!(30000)))
        .await
        .unwrap();
    let saved = f
        .service
        .save_targets(&f.user, Some(company_id), &input(dec!(32000)))
        .await
        .unwrap();

    assert_eq!(saved.targets.len(), 1);
    assert_eq!(saved.target.target_margin, Some(dec!(32000)));
    assert_eq!(saved.target.target_revenue, None);
}

#[tokio::test]
async fn test_alerts_use_latest_period() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    f.service
        .save_targets(
            &f.user,
            Some(company_id),
            &TargetInput {
                year: 2024,
                target_margin: amount(dec!(30000)),
                ..TargetInput::default()
            },
        )
        .await
        .unwrap();
    // margin 47000 then 25000
    for (month, revenue) in [(5, dec!(65000)), (6, dec!(43000))] {
        f.service
            .submit_monthly_record(&f.user, Some(company_id), &entry(month, 2024, revenue))
            .await
            .unwrap();
    }

    let alerts = f.service.alerts(&f.user, company_id).await.unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, crate::alerts::AlertKind::MarginBelowTarget);
    assert_eq!(alerts[0].period, Period::new(6, 2024).unwrap());
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;
    f.store
        .fail_next_call(StoreError::Unavailable("connection reset".to_string()));

    let err = f
        .service
        .list_targets(&f.user, company_id)
        .await
        .unwrap_err();
    assert!(matches!(err, BusinessError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn test_oversized_amount_is_rejected_and_dashboard_still_builds() {
    let f = fixture(NetIncomeFormula::RevenueLessTotalCosts);
    let company_id = company(&f, "Acme Srl").await;

    let mut january = entry(1, 2024, Decimal::ZERO);
    january.revenue = Some(AmountInput::Text("0.000001".to_string()));
    let saved = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &january)
        .await
        .unwrap();
    assert_eq!(saved.record.figures.revenue, Decimal::ZERO);

    let mut february = entry(2, 2024, Decimal::ZERO);
    february.revenue = Some(AmountInput::Text("1000000000000000000000000".to_string()));
    let calls = f.store.call_count();
    let err = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &february)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BusinessError::Validation(ValidationError::AmountOutOfRange { field: "revenue" })
    ));
    assert_eq!(f.store.call_count(), calls);

    f.service
        .submit_monthly_record(&f.user, Some(company_id), &entry(2, 2024, crate::records::MAX_AMOUNT))
        .await
        .unwrap();
    let dashboard = f.service.dashboard(&f.user, company_id).await.unwrap();

    assert_eq!(dashboard.totals.months_recorded, 2);
    assert_eq!(dashboard.cards[0].value, crate::records::MAX_AMOUNT);
    assert_eq!(dashboard.cards[0].change_percent, None);
}

#[tokio::test]
async fn test_net_income_beyond_column_is_rejected() {
    let f = fixture(NetIncomeFormula::MarginLessOwnerCompensation);
    let company_id = company(&f, "Acme Srl").await;
    let input = MonthlyEntryInput {
        month: 1,
        year: 2024,
        revenue: None,
        direct_costs: amount(crate::records::MAX_AMOUNT),
        total_costs: None,
        owner_compensation: amount(crate::records::MAX_AMOUNT),
    };

    let err = f
        .service
        .submit_monthly_record(&f.user, Some(company_id), &input)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BusinessError::Validation(ValidationError::AmountOutOfRange {
            field: "net_income"
        })
    ));
    let records = f
        .service
        .list_monthly_records(&f.user, company_id)
        .await
        .unwrap();
    assert!(records.is_empty());
}
