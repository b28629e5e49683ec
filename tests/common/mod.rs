use anyhow::Result;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use shiftdesk::auth::Claims;
use shiftdesk::config::Config;
use shiftdesk::database::init_database;
use shiftdesk::database::models::{Employee, ShiftSlot, ShiftSlotInput};
use shiftdesk::database::repositories::{EmployeeRepository, ShiftSlotRepository};

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        jwt_expiration_days: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    }
}

#[allow(dead_code)]
pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}

pub async fn create_test_employee(pool: &SqlitePool) -> Employee {
    let repo = EmployeeRepository::new(pool.clone());
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    repo.create_employee(&name, &email, None, "test-password-hash")
        .await
        .expect("Failed to create test employee")
}

#[allow(dead_code)]
pub async fn create_test_admin(pool: &SqlitePool) -> Employee {
    let repo = EmployeeRepository::new(pool.clone());
    let employee = create_test_employee(pool).await;

    repo.set_admin(employee.id, true)
        .await
        .expect("Failed to promote test employee")
        .expect("Test employee should exist")
}

pub async fn create_test_slot(pool: &SqlitePool, slots_amount: i64) -> ShiftSlot {
    let repo = ShiftSlotRepository::new(pool.clone());

    repo.create_slot(ShiftSlotInput {
        shift_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 19).unwrap(),
        start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        slots_amount,
    })
    .await
    .expect("Failed to create test slot")
}

#[allow(dead_code)]
pub async fn slot_taken(pool: &SqlitePool, slot_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT slots_taken FROM shift_slots WHERE id = ?")
        .bind(slot_id)
        .fetch_one(pool)
        .await
        .expect("Slot should exist")
}

#[allow(dead_code)]
pub async fn assignment_count_for_slot(pool: &SqlitePool, slot_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assignments WHERE slot_id = ?")
        .bind(slot_id)
        .fetch_one(pool)
        .await
        .expect("Count query should succeed")
}

#[allow(dead_code)]
pub async fn request_count_for_pair(pool: &SqlitePool, employee_id: i64, slot_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM shift_requests WHERE employee_id = ? AND slot_id = ?",
    )
    .bind(employee_id)
    .bind(slot_id)
    .fetch_one(pool)
    .await
    .expect("Count query should succeed")
}

// Authentication helpers for handler-level tests
#[allow(dead_code)]
pub fn create_test_token(employee: &Employee, config: &Config) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: employee.id.to_string(),
        email: employee.email.clone(),
        admin: employee.is_admin,
        exp: (chrono::Utc::now() + chrono::Duration::days(config.jwt_expiration_days)).timestamp()
            as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .expect("Failed to create test token")
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
