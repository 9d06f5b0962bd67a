use crate::api::attendance::{AttendanceHistoryResponse, AttendanceResponse, TodayStatusResponse};
use crate::model::attendance::{AttendanceRecord, AttendanceState};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chronolog Attendance API",
        version = "0.1.0",
        description = r#"
## Chronolog

Records employee **clock-in** and **clock-out** events and derives working-hours history.

### Rules
- One attendance record per employee per calendar day
- Clock-in creates the day's record; a second clock-in the same day is rejected
- Clock-out closes the day's record exactly once
- Employee IDs must be non-blank and at most 50 characters

### Response Format
- JSON bodies; errors carry `message` and a machine-readable `error` kind
"#,
    ),
    paths(
        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::history,
        crate::api::attendance::today,
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceState,
            AttendanceResponse,
            AttendanceHistoryResponse,
            TodayStatusResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
