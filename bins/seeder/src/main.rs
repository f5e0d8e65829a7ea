//! Database seeder for CashFlow development and testing.
//!
//! Seeds a month of sample expenses covering every payment type, with and
//! without descriptions.
//!
//! Usage: cargo run --bin seeder

use cashflow_core::expenses::{
    ExpensesReadOnlyRepository, ExpensesWriteOnlyRepository, NewExpense, PaymentType,
};
use cashflow_db::{ExpenseRepository, migration::Migrator};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;

/// Sample expenses: (title, description, day, hour, minute, amount in cents, payment type).
const SAMPLES: &[(&str, Option<&str>, u32, u32, u32, i64, PaymentType)] = &[
    ("Rent", Some("Monthly apartment rent"), 1, 9, 0, 120_000, PaymentType::ElectronicTransfer),
    ("Groceries", Some("Weekly groceries"), 3, 18, 30, 8_745, PaymentType::DebitCard),
    ("Coffee", None, 4, 8, 15, 450, PaymentType::Cash),
    ("Internet", None, 5, 10, 0, 5_990, PaymentType::CreditCard),
    ("Cinema", Some("Two tickets"), 12, 20, 45, 3_200, PaymentType::CreditCard),
    ("Taxi", None, 15, 23, 10, 1_875, PaymentType::Cash),
    ("Pharmacy", Some("   "), 21, 12, 5, 2_310, PaymentType::DebitCard),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = cashflow_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let repo = ExpenseRepository::new(db);
    let today = Utc::now().date_naive();

    println!("Seeding expenses for {}...", today.format("%B %Y"));
    seed_expenses(&repo, today.year(), today.month()).await;

    println!("Seeding complete!");
}

/// Seeds the sample expenses into the given month, skipping titles already present.
async fn seed_expenses(repo: &ExpenseRepository, year: i32, month: u32) {
    let mut inserted = 0;

    for &(title, description, day, hour, minute, cents, payment_type) in SAMPLES {
        if repo.get_by_title(title).await.ok().flatten().is_some() {
            println!("  {title} already exists, skipping...");
            continue;
        }

        let Some(date) = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
        else {
            continue;
        };

        let expense = NewExpense {
            title: title.to_string(),
            description: description.map(String::from),
            date,
            amount: Decimal::new(cents, 2),
            payment_type,
        };

        if let Err(e) = repo.add(expense).await {
            eprintln!("Failed to insert expense {title}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} expenses");
}
