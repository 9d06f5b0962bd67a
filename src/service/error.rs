use chrono::NaiveDate;
use derive_more::{Display, Error};

use crate::store::StoreError;

/// Why an attendance operation was refused.
///
/// Every variant except `Store` is a caller-side problem and is never retried.
#[derive(Debug, Display, Error)]
pub enum AttendanceError {
    #[display(fmt = "invalid argument: {}", reason)]
    InvalidArgument { reason: String },

    #[display(fmt = "employee {} has already clocked in on {}", employee_id, work_date)]
    DuplicateClockIn {
        employee_id: String,
        work_date: NaiveDate,
    },

    #[display(fmt = "employee {} has no clock-in record on {}", employee_id, work_date)]
    NoClockInRecord {
        employee_id: String,
        work_date: NaiveDate,
    },

    #[display(fmt = "employee {} has already clocked out on {}", employee_id, work_date)]
    DuplicateClockOut {
        employee_id: String,
        work_date: NaiveDate,
    },

    #[display(fmt = "storage failure: {}", source)]
    Store { source: StoreError },
}

impl AttendanceError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        AttendanceError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            AttendanceError::DuplicateClockIn { .. } => "DUPLICATE_CLOCK_IN",
            AttendanceError::NoClockInRecord { .. } => "NO_CLOCK_IN_RECORD",
            AttendanceError::DuplicateClockOut { .. } => "DUPLICATE_CLOCK_OUT",
            AttendanceError::Store { .. } => "STORE_FAILURE",
        }
    }
}

impl From<StoreError> for AttendanceError {
    fn from(source: StoreError) -> Self {
        AttendanceError::Store { source }
    }
}
