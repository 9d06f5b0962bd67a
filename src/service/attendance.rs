use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{error, info, instrument, warn};

use super::error::AttendanceError;
use crate::model::attendance::{AttendanceRecord, AttendanceState};
use crate::store::{RecordStore, StoreError};
use crate::utils::clock::{Clock, SystemClock};

pub const MAX_EMPLOYEE_ID_LEN: usize = 50;

/// Attendance rules: one record per employee per day, clock-in creates it,
/// clock-out closes it exactly once.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Opens today's record for `employee_id`.
    ///
    /// Fails with `DuplicateClockIn` if a record for today already exists,
    /// whether found up front or reported by the store as a conflicting insert.
    #[instrument(name = "attendance_clock_in", skip(self))]
    pub async fn clock_in(&self, employee_id: &str) -> Result<AttendanceRecord, AttendanceError> {
        validate_employee_id(employee_id)?;

        let now = self.clock.now();
        let today = now.date();

        let exists = self
            .store
            .exists_by_employee_and_date(employee_id, today)
            .await
            .map_err(store_failure)?;
        if exists {
            warn!(%today, "Clock-in rejected: already clocked in");
            return Err(duplicate_clock_in(employee_id, today));
        }

        match self.store.save(AttendanceRecord::clocked_in(employee_id, now)).await {
            Ok(record) => {
                info!(id = ?record.id, clock_in_time = %record.clock_in_time, "Clocked in");
                Ok(record)
            }
            Err(StoreError::Conflict {
                employee_id,
                work_date,
            }) => {
                // A concurrent clock-in won between the existence check and the insert
                warn!(%work_date, "Clock-in rejected by store uniqueness");
                Err(AttendanceError::DuplicateClockIn {
                    employee_id,
                    work_date,
                })
            }
            Err(e) => Err(store_failure(e)),
        }
    }

    /// Closes today's record for `employee_id`. Never creates a record.
    #[instrument(name = "attendance_clock_out", skip(self))]
    pub async fn clock_out(&self, employee_id: &str) -> Result<AttendanceRecord, AttendanceError> {
        validate_employee_id(employee_id)?;

        let now = self.clock.now();
        let today = now.date();

        let mut record = match self
            .store
            .find_latest_by_employee_and_date(employee_id, today)
            .await
            .map_err(store_failure)?
        {
            Some(record) => record,
            None => {
                warn!(%today, "Clock-out rejected: no clock-in today");
                return Err(AttendanceError::NoClockInRecord {
                    employee_id: employee_id.to_string(),
                    work_date: today,
                });
            }
        };

        if let Some(clock_out_time) = record.clock_out_time {
            warn!(%today, %clock_out_time, "Clock-out rejected: already clocked out");
            return Err(AttendanceError::DuplicateClockOut {
                employee_id: employee_id.to_string(),
                work_date: today,
            });
        }

        record.clock_out_time = Some(now);
        let record = self.store.save(record).await.map_err(store_failure)?;

        info!(id = ?record.id, clock_out_time = %now, "Clocked out");
        Ok(record)
    }

    /// Every record for `employee_id`, most recent work date first.
    #[instrument(name = "attendance_history", skip(self))]
    pub async fn get_attendance_history(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        validate_employee_id(employee_id)?;

        let history = self
            .store
            .find_all_by_employee_ordered_by_date_desc(employee_id)
            .await
            .map_err(store_failure)?;

        info!(count = history.len(), "Fetched attendance history");
        Ok(history)
    }

    /// Where `employee_id` stands today, with today's record if there is one.
    #[instrument(name = "attendance_today", skip(self))]
    pub async fn today_status(
        &self,
        employee_id: &str,
    ) -> Result<(NaiveDate, AttendanceState, Option<AttendanceRecord>), AttendanceError> {
        validate_employee_id(employee_id)?;

        let today = self.clock.today();
        let record = self
            .store
            .find_latest_by_employee_and_date(employee_id, today)
            .await
            .map_err(store_failure)?;

        Ok((today, AttendanceState::of(record.as_ref()), record))
    }

    /// Time between clock-in and clock-out. A clock-out earlier than the
    /// clock-in yields a negative duration.
    pub fn calculate_working_hours(
        &self,
        record: &AttendanceRecord,
    ) -> Result<Duration, AttendanceError> {
        working_duration(record)
    }
}

pub fn working_duration(record: &AttendanceRecord) -> Result<Duration, AttendanceError> {
    let clock_out_time = record
        .clock_out_time
        .ok_or_else(|| AttendanceError::invalid("record has no clock-out time"))?;

    Ok(clock_out_time - record.clock_in_time)
}

/// Employee ids must be non-blank and at most 50 characters.
pub fn validate_employee_id(employee_id: &str) -> Result<(), AttendanceError> {
    if employee_id.trim().is_empty() {
        return Err(AttendanceError::invalid("employee id must not be blank"));
    }

    if employee_id.chars().count() > MAX_EMPLOYEE_ID_LEN {
        return Err(AttendanceError::invalid(format!(
            "employee id must be at most {MAX_EMPLOYEE_ID_LEN} characters"
        )));
    }

    Ok(())
}

fn duplicate_clock_in(employee_id: &str, work_date: NaiveDate) -> AttendanceError {
    AttendanceError::DuplicateClockIn {
        employee_id: employee_id.to_string(),
        work_date,
    }
}

fn store_failure(e: StoreError) -> AttendanceError {
    error!(error = %e, "Attendance store failure");
    e.into()
}
