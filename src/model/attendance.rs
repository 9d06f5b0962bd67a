use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

/// One attendance row per employee per work date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    /// Assigned by the store on insert; `None` until persisted
    #[schema(example = 1, nullable = true)]
    pub id: Option<u64>,

    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub work_date: NaiveDate,

    #[schema(example = "2026-01-01T09:00:00", value_type = String, format = "date-time")]
    pub clock_in_time: NaiveDateTime,

    #[schema(
        example = "2026-01-01T18:00:00",
        value_type = Option<String>,
        format = "date-time",
        nullable = true
    )]
    pub clock_out_time: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// A freshly clocked-in record, not yet persisted.
    pub fn clocked_in(employee_id: &str, now: NaiveDateTime) -> Self {
        Self {
            id: None,
            employee_id: employee_id.to_string(),
            work_date: now.date(),
            clock_in_time: now,
            clock_out_time: None,
        }
    }

    pub fn state(&self) -> AttendanceState {
        if self.clock_out_time.is_some() {
            AttendanceState::ClockedOut
        } else {
            AttendanceState::ClockedIn
        }
    }
}

/// Position of an (employee, work date) pair in the attendance lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceState {
    None,
    ClockedIn,
    ClockedOut,
}

impl AttendanceState {
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        record.map_or(AttendanceState::None, AttendanceRecord::state)
    }
}
