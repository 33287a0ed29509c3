//! Database seeder for Control Wise development.
//!
//! Creates a demo account with a few months of transactions, a planning,
//! a goal and a small portfolio. Running it twice is a no-op.
//!
//! Usage:
//!   seeder

use anyhow::Context;
use chrono::{Datelike, Months, NaiveDate, Utc};
use fake::{Fake, faker::lorem::en::Words};
use rust_decimal_macros::dec;

use controlwise_core::auth::hash_password;
use controlwise_db::entities::sea_orm_active_enums::{
    AssetType, MovementKind, TransactionKind, TransactionStatus,
};
use controlwise_db::repositories::{
    CreateAssetInput, CreateMovementInput, CreateTransactionInput, CreateUserInput, GoalInput,
    PlanningInput,
};
use controlwise_db::{
    AssetRepository, CategoryRepository, GoalRepository, MovementRepository, OwnerScope,
    PlanningRepository, TransactionRepository, UserRepository, connect,
};
use controlwise_shared::AppConfig;

const DEMO_EMAIL: &str = "demo@controlwise.dev";
const DEMO_PASSWORD: &str = "123456";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding database...");

    let users = UserRepository::new(db.clone());
    if users.find_by_email(DEMO_EMAIL).await?.is_some() {
        println!("Demo user already exists, nothing to do");
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let user = users
        .create_with_defaults(
            CreateUserInput {
                name: "Demo User".to_string(),
                email: DEMO_EMAIL.to_string(),
                password_hash: Some(hash_password(DEMO_PASSWORD)?),
            },
            today.year(),
        )
        .await?;
    let scope = OwnerScope::new(user.id);
    println!("Created user: {} ({})", user.email, user.id);

    let categories = CategoryRepository::new(db.clone()).list(scope).await?;
    let home = categories
        .iter()
        .find(|c| c.name == "Home")
        .context("Default categories missing")?;

    let planning = PlanningRepository::new(db.clone())
        .create(
            scope,
            PlanningInput {
                title: "Household".to_string(),
                target_amount: dec!(1500),
                kind: TransactionKind::Expense,
                category_id: home.id,
            },
        )
        .await?;
    println!("Created planning: {}", planning.title);

    let transactions = TransactionRepository::new(db.clone());
    let mut count = 0;
    for months_back in 0..3u32 {
        let month_start = first_of_month(today)
            .checked_sub_months(Months::new(months_back))
            .context("Date out of range")?;

        transactions
            .create(
                scope,
                CreateTransactionInput {
                    amount: dec!(4200),
                    description: Some("Salary".to_string()),
                    kind: TransactionKind::Income,
                    date: month_start.with_day(5).unwrap_or(month_start),
                    status: TransactionStatus::Executed,
                    category_id: None,
                    is_recurring: months_back == 0,
                    planning_id: None,
                },
            )
            .await?;
        count += 1;

        for (index, category) in categories.iter().enumerate() {
            let day = u32::try_from(index * 4 + 2).unwrap_or(1);
            let words: Vec<String> = Words(2..4).fake();
            transactions
                .create(
                    scope,
                    CreateTransactionInput {
                        amount: dec!(45.90) * rust_decimal::Decimal::from(index + 1),
                        description: Some(words.join(" ")),
                        kind: TransactionKind::Expense,
                        date: month_start.with_day(day).unwrap_or(month_start),
                        status: if months_back == 0 && index % 2 == 1 {
                            TransactionStatus::Pending
                        } else {
                            TransactionStatus::Executed
                        },
                        category_id: Some(category.id),
                        is_recurring: false,
                        planning_id: (months_back == 0 && category.id == home.id)
                            .then_some(planning.id),
                    },
                )
                .await?;
            count += 1;
        }
    }
    println!("Created {count} transactions");

    let goal = GoalRepository::new(db.clone())
        .create(
            scope,
            GoalInput {
                title: "Emergency fund".to_string(),
                deadline: NaiveDate::from_ymd_opt(today.year() + 1, 12, 31),
                target_amount: dec!(20000),
                initial_amount: Some(dec!(2000)),
                description: Some("Six months of expenses".to_string()),
            },
        )
        .await?;
    GoalRepository::new(db.clone())
        .add_amount(scope, goal.id, dec!(3500))
        .await?;
    println!("Created goal: {}", goal.title);

    let assets = AssetRepository::new(db.clone());
    let movements = MovementRepository::new(db.clone());
    for (ticker, name, asset_type, quantity, unit_price) in [
        ("ITSA4", "Itausa", AssetType::Stock, dec!(100), dec!(10.25)),
        ("HGLG11", "CSHG Logistica", AssetType::Reit, dec!(10), dec!(160.40)),
        ("BTC", "Bitcoin", AssetType::Crypto, dec!(0.015), dec!(350000)),
    ] {
        let asset = assets
            .create(
                scope,
                CreateAssetInput {
                    ticker: ticker.to_string(),
                    name: name.to_string(),
                    asset_type,
                },
            )
            .await?;

        movements
            .record(
                scope,
                CreateMovementInput {
                    asset_id: asset.id,
                    kind: MovementKind::Buy,
                    quantity,
                    unit_price,
                    date: first_of_month(today),
                },
            )
            .await?;
        println!("Created asset: {}", asset.ticker);
    }

    println!("Seeding complete. Sign in as {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
