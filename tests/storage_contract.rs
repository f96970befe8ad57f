//! Behaviour every storage backend must share
//!
//! SQLite always runs. PostgreSQL runs when `MEALS_TEST_POSTGRES_URL` points
//! at a scratch database.

use std::sync::Arc;

use meal_planner::{
    config::DatabaseConfig,
    database::{Database, DatabaseType},
    models::{MealDay, MealPart},
    repositories::MealRepository,
};

async fn check_contract(repo: Arc<dyn MealRepository>, date: &str, missing: &str) {
    // Schema creation is idempotent
    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();
    repo.ping().await.unwrap();

    assert_eq!(repo.get(missing).await.unwrap(), None);

    let first = MealDay::new(date, MealPart::new("Lentils", false), MealPart::default());
    repo.upsert(&first).await.unwrap();
    assert_eq!(repo.get(date).await.unwrap(), Some(first));

    let second = MealDay::new(date, MealPart::new("Soup", true), MealPart::new("Salad", false));
    repo.upsert(&second).await.unwrap();

    let stored = repo.get(date).await.unwrap().unwrap();
    assert_eq!(stored, second);
    assert!(stored.lunch.frozen);
    assert_eq!(stored.dinner.dish.as_deref(), Some("Salad"));

    // Absent dishes come back as absent, not as empty strings
    let empty = MealDay::new(date, MealPart::default(), MealPart::from_form("", true));
    repo.upsert(&empty).await.unwrap();
    let stored = repo.get(date).await.unwrap().unwrap();
    assert_eq!(stored.lunch.dish, None);
    assert_eq!(stored.dinner, MealPart { dish: None, frozen: true });

    // Earliest and latest accepted keys are storable on every backend
    for edge in ["0001-01-01", "9999-12-31"] {
        meal_planner::models::validate_date(edge).unwrap();
        let day = MealDay::new(edge, MealPart::new("Rice", false), MealPart::default());
        repo.upsert(&day).await.unwrap();
        assert_eq!(repo.get(edge).await.unwrap(), Some(day));
    }
}

#[tokio::test]
async fn test_sqlite_contract() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: None,
        path: dir.path().join("contract.db"),
        max_connections: 2,
    };

    let database = Database::connect(&config).await.unwrap();
    assert_eq!(database.database_type(), DatabaseType::SQLite);
    check_contract(database.repository(), "2024-03-01", "2099-01-01").await;
}

#[tokio::test]
async fn test_postgres_contract() {
    let Some(url) = std::env::var("MEALS_TEST_POSTGRES_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        eprintln!("MEALS_TEST_POSTGRES_URL not set, skipping PostgreSQL contract test");
        return;
    };

    let config = DatabaseConfig {
        url: Some(url),
        path: "unused.db".into(),
        max_connections: 2,
    };

    let database = Database::connect(&config).await.unwrap();
    assert_eq!(database.database_type(), DatabaseType::PostgreSQL);

    // Unique dates so repeated runs against the same database stay independent
    let year = 1000 + (uuid::Uuid::new_v4().as_u128() % 8000) as i32;
    let date = format!("{year:04}-06-15");
    let missing = format!("{year:04}-06-16");
    check_contract(database.repository(), &date, &missing).await;
}
