//! Database seeder for BizPulse development and testing.
//!
//! Seeds a demo company with six months of figures and yearly targets for
//! the demo user, then prints a development token for that user.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use bizpulse_core::company::CompanyInput;
use bizpulse_core::records::MonthlyEntryInput;
use bizpulse_core::targets::TargetInput;
use bizpulse_core::{BusinessDataService, StaticIdentity};
use bizpulse_db::SeaOrmStore;
use bizpulse_shared::types::{AmountInput, UserId};
use bizpulse_shared::{AppConfig, JwtConfig, JwtService};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0002);

/// Demo company name.
const DEMO_COMPANY: &str = "Acme Srl";

/// January to June 2024: revenue, direct costs, total costs, owner compensation.
const DEMO_MONTHS: [(u32, i64, i64, i64, i64); 6] = [
    (1, 45_000, 18_000, 30_000, 4_000),
    (2, 52_000, 20_800, 34_000, 4_000),
    (3, 48_000, 19_200, 32_000, 4_000),
    (4, 55_000, 22_000, 35_000, 4_500),
    (5, 58_000, 23_200, 36_000, 4_500),
    (6, 62_000, 24_800, 37_000, 5_000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = bizpulse_db::connect(&config.database.url).await?;

    let store = Arc::new(SeaOrmStore::new(db));
    let service = BusinessDataService::new(store, config.metrics.net_income_formula);
    let demo_user = StaticIdentity::signed_in(UserId::from_uuid(DEMO_USER_ID));

    println!("Seeding demo company...");
    let existing = service.list_companies(&demo_user).await?;
    let company_id = if let Some(company) = existing.iter().find(|c| c.name == DEMO_COMPANY) {
        println!("  Demo company already exists, updating figures...");
        company.id
    } else {
        let input = CompanyInput {
            name: DEMO_COMPANY.to_string(),
            description: Some("Demo company".to_string()),
            share_capital: Some(amount(10_000)),
        };
        service.create_company(&demo_user, &input).await?.company.id
    };

    println!("Seeding monthly figures...");
    for (month, revenue, direct_costs, total_costs, owner_compensation) in DEMO_MONTHS {
        let input = MonthlyEntryInput {
            month,
            year: 2024,
            revenue: Some(amount(revenue)),
            direct_costs: Some(amount(direct_costs)),
            total_costs: Some(amount(total_costs)),
            owner_compensation: Some(amount(owner_compensation)),
        };
        let saved = service
            .submit_monthly_record(&demo_user, Some(company_id), &input)
            .await?;
        println!(
            "  {}: margin {}, net income {}",
            saved.record.period.long_label(),
            saved.record.margin,
            saved.record.net_income
        );
    }

    println!("Seeding targets...");
    let targets = TargetInput {
        year: 2024,
        target_revenue: Some(amount(50_000)),
        target_margin: Some(amount(30_000)),
        target_net_income: Some(amount(18_000)),
    };
    service
        .save_targets(&demo_user, Some(company_id), &targets)
        .await?;

    let jwt_service = JwtService::new(JwtConfig::from(&config.auth));
    let token = jwt_service.generate_access_token(DEMO_USER_ID, Some("demo@bizpulse.dev".to_string()))?;

    println!("Seeding complete!");
    println!(
        "Demo token (valid {}s): {token}",
        config.auth.dev_token_expiry_secs
    );

    Ok(())
}

fn amount(value: i64) -> AmountInput {
    AmountInput::Number(Decimal::from(value))
}
