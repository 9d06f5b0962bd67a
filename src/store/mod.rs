pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Display, Error};

use crate::model::attendance::AttendanceRecord;

pub use memory::MemoryRecordStore;
pub use mysql::MySqlRecordStore;

/// Infrastructure failures raised by a [`RecordStore`].
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// Insert would create a second record for the same employee and day
    #[display(fmt = "record already exists for employee {} on {}", employee_id, work_date)]
    Conflict {
        employee_id: String,
        work_date: NaiveDate,
    },

    #[display(fmt = "attendance record {} not found", id)]
    NotFound { id: u64 },

    #[display(fmt = "database error: {}", source)]
    Database { source: sqlx::Error },
}

impl From<sqlx::Error> for StoreError {
    fn from(source: sqlx::Error) -> Self {
        StoreError::Database { source }
    }
}

/// Persistence seam for attendance records.
///
/// Implementations must reject an insert that would duplicate an
/// (employee_id, work_date) pair with [`StoreError::Conflict`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_latest_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn exists_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Most recent work date first.
    async fn find_all_by_employee_ordered_by_date_desc(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Inserts when `record.id` is `None`, updates otherwise.
    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError>;
}
