use actix_web::{HttpResponse, Responder, ResponseError, http::StatusCode, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::{
    model::attendance::{AttendanceRecord, AttendanceState},
    service::{AttendanceError, AttendanceService, attendance::working_duration},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = 1)]
    pub id: Option<u64>,
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub work_date: NaiveDate,
    #[schema(example = "2026-01-01T09:00:00", value_type = String, format = "date-time")]
    pub clock_in_time: NaiveDateTime,
    #[schema(example = "2026-01-01T18:00:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub clock_out_time: Option<NaiveDateTime>,
    #[schema(example = "CLOCKED_OUT")]
    pub status: AttendanceState,
    /// Seconds between clock-in and clock-out, present once clocked out
    #[schema(example = 32400, nullable = true)]
    pub working_seconds: Option<i64>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        let status = record.state();
        let working_seconds = working_duration(&record).ok().map(|d| d.num_seconds());

        Self {
            id: record.id,
            employee_id: record.employee_id,
            work_date: record.work_date,
            clock_in_time: record.clock_in_time,
            clock_out_time: record.clock_out_time,
            status,
            working_seconds,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceHistoryResponse {
    #[schema(example = "E001")]
    pub employee_id: String,
    pub data: Vec<AttendanceResponse>,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodayStatusResponse {
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub work_date: NaiveDate,
    #[schema(example = "CLOCKED_IN")]
    pub status: AttendanceState,
    pub record: Option<AttendanceResponse>,
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            AttendanceError::DuplicateClockIn { .. } => StatusCode::CONFLICT,
            AttendanceError::DuplicateClockOut { .. } => StatusCode::CONFLICT,
            AttendanceError::NoClockInRecord { .. } => StatusCode::NOT_FOUND,
            AttendanceError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AttendanceError::Store { source } => {
                error!(error = %source, "Attendance request failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": message,
            "error": self.kind(),
        }))
    }
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/{employee_id}/clock-in",
    params(
        ("employee_id" = String, Path, description = "Employee ID, at most 50 characters")
    ),
    responses(
        (status = 201, description = "Clocked in", body = AttendanceResponse),
        (status = 400, description = "Invalid employee id", body = Object, example = json!({
            "message": "invalid argument: employee id must not be blank",
            "error": "INVALID_ARGUMENT"
        })),
        (status = 409, description = "Already clocked in today", body = Object, example = json!({
            "message": "employee E001 has already clocked in on 2026-01-01",
            "error": "DUPLICATE_CLOCK_IN"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<impl Responder, AttendanceError> {
    let employee_id = path.into_inner();

    let record = service.clock_in(&employee_id).await?;

    Ok(HttpResponse::Created().json(AttendanceResponse::from(record)))
}

/// Clock-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/{employee_id}/clock-out",
    params(
        ("employee_id" = String, Path, description = "Employee ID, at most 50 characters")
    ),
    responses(
        (status = 200, description = "Clocked out", body = AttendanceResponse),
        (status = 400, description = "Invalid employee id"),
        (status = 404, description = "No clock-in today", body = Object, example = json!({
            "message": "employee E001 has no clock-in record on 2026-01-01",
            "error": "NO_CLOCK_IN_RECORD"
        })),
        (status = 409, description = "Already clocked out today", body = Object, example = json!({
            "message": "employee E001 has already clocked out on 2026-01-01",
            "error": "DUPLICATE_CLOCK_OUT"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<impl Responder, AttendanceError> {
    let employee_id = path.into_inner();

    let record = service.clock_out(&employee_id).await?;

    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// Attendance history, most recent work date first
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}/history",
    params(
        ("employee_id" = String, Path, description = "Employee ID, at most 50 characters")
    ),
    responses(
        (status = 200, description = "Attendance history", body = AttendanceHistoryResponse),
        (status = 400, description = "Invalid employee id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn history(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<impl Responder, AttendanceError> {
    let employee_id = path.into_inner();

    let data: Vec<AttendanceResponse> = service
        .get_attendance_history(&employee_id)
        .await?
        .into_iter()
        .map(AttendanceResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(AttendanceHistoryResponse {
        employee_id,
        total: data.len(),
        data,
    }))
}

/// Today's attendance state
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}/today",
    params(
        ("employee_id" = String, Path, description = "Employee ID, at most 50 characters")
    ),
    responses(
        (status = 200, description = "Today's state", body = TodayStatusResponse),
        (status = 400, description = "Invalid employee id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn today(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<impl Responder, AttendanceError> {
    let employee_id = path.into_inner();

    let (work_date, status, record) = service.today_status(&employee_id).await?;

    Ok(HttpResponse::Ok().json(TodayStatusResponse {
        employee_id,
        work_date,
        status,
        record: record.map(AttendanceResponse::from),
    }))
}
