use anyhow::{Context, Result};
use sqlx::MySqlPool;

/// `employee_id` uses a binary collation so "E001" and "e001" are distinct
/// employees, matching exact string comparison everywhere else. The unique
/// key is what makes a racing second clock-in fail at insert time.
pub const ATTENDANCE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS attendance_records (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    employee_id VARCHAR(50) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    work_date DATE NOT NULL,
    clock_in_time DATETIME(6) NOT NULL,
    clock_out_time DATETIME(6) NULL,
    UNIQUE KEY uq_attendance_employee_date (employee_id, work_date)
)
"#;

pub async fn init_db(database_url: &str) -> Result<MySqlPool> {
    MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Creates `attendance_records` when missing.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(ATTENDANCE_SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create attendance_records table")?;

    Ok(())
}
