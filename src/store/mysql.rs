use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{RecordStore, StoreError};
use crate::model::attendance::AttendanceRecord;

/// `attendance_records` table backed store.
#[derive(Clone)]
pub struct MySqlRecordStore {
    pool: MySqlPool,
}

impl MySqlRecordStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records (employee_id, work_date, clock_in_time, clock_out_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.employee_id)
        .bind(record.work_date)
        .bind(record.clock_in_time)
        .bind(record.clock_out_time)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                record.id = Some(done.last_insert_id());
                debug!(id = done.last_insert_id(), employee_id = %record.employee_id, "Inserted attendance record");
                Ok(record)
            }
            Err(e) => Err(insert_error(e, record)),
        }
    }

    async fn update(&self, id: u64, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        // Only the clock-out timestamp is mutable after creation.
        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET clock_out_time = ?
            WHERE id = ?
            "#,
        )
        .bind(record.clock_out_time)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // MySQL reports 0 for an unchanged row too, so confirm it exists
            let exists: Option<(u64,)> =
                sqlx::query_as("SELECT id FROM attendance_records WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            if exists.is_none() {
                return Err(StoreError::NotFound { id });
            }
        }

        debug!(id, employee_id = %record.employee_id, "Updated attendance record");
        Ok(record)
    }
}

/// Only a duplicate key is a clock-in conflict; other integrity violations
/// (same SQLSTATE 23000) stay database errors.
fn insert_error(e: sqlx::Error, record: AttendanceRecord) -> StoreError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict {
            employee_id: record.employee_id,
            work_date: record.work_date,
        },
        e => e.into(),
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    async fn find_latest_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, work_date, clock_in_time, clock_out_time
            FROM attendance_records
            WHERE employee_id = ? AND work_date = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(work_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn exists_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let found = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM attendance_records
                WHERE employee_id = ? AND work_date = ?
            )
            "#,
        )
        .bind(employee_id)
        .bind(work_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(found != 0)
    }

    async fn find_all_by_employee_ordered_by_date_desc(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, work_date, clock_in_time, clock_out_time
            FROM attendance_records
            WHERE employee_id = ?
            ORDER BY work_date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        match record.id {
            Some(id) => self.update(id, record).await,
            None => self.insert(record).await,
        }
    }
}
