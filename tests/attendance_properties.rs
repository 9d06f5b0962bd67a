//! Property-based checks of the clock-in / clock-out rules.
//!
//! Each case builds a fresh in-memory store and drives the service on a
//! one-off actix system, reading "now" from the host clock so the recorded
//! timestamps can be bracketed by readings taken around each call.

use std::sync::Arc;

use actix_web::rt::System;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, SubsecRound};
use proptest::prelude::*;

use chronolog::service::{AttendanceError, AttendanceService};
use chronolog::store::MemoryRecordStore;
use chronolog::utils::clock::FixedClock;

fn fresh() -> (AttendanceService, Arc<MemoryRecordStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    (AttendanceService::new(store.clone()), store)
}

// Same resolution as the service's clock
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

fn employee_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,50}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_clock_in_creates_complete_record(id in employee_id()) {
        System::new().block_on(async {
            let (service, _) = fresh();

            let before = now();
            let record = service.clock_in(&id).await.unwrap();
            let after = now();

            assert_eq!(record.employee_id, id);
            assert!(record.work_date == before.date() || record.work_date == after.date());
            assert!(before <= record.clock_in_time && record.clock_in_time <= after);
            assert_eq!(record.clock_out_time, None);
        });
    }

    #[test]
    fn prop_second_clock_in_is_rejected(id in employee_id()) {
        System::new().block_on(async {
            let (service, store) = fresh();
            let first = service.clock_in(&id).await.unwrap();

            let err = service.clock_in(&id).await.unwrap_err();

            assert!(matches!(err, AttendanceError::DuplicateClockIn { .. }));
            assert_eq!(store.snapshot(), vec![first]);
        });
    }

    #[test]
    fn prop_clock_out_completes_record(id in employee_id()) {
        System::new().block_on(async {
            let (service, _) = fresh();
            let opened = service.clock_in(&id).await.unwrap();

            let before = now();
            let closed = service.clock_out(&id).await.unwrap();
            let after = now();

            let out = closed.clock_out_time.unwrap();
            assert!(before <= out && out <= after);
            assert_eq!(closed.employee_id, opened.employee_id);
            assert_eq!(closed.work_date, opened.work_date);
            assert_eq!(closed.clock_in_time, opened.clock_in_time);
        });
    }

    #[test]
    fn prop_clock_out_without_clock_in_is_rejected(id in employee_id()) {
        System::new().block_on(async {
            let (service, store) = fresh();

            let err = service.clock_out(&id).await.unwrap_err();

            assert!(matches!(err, AttendanceError::NoClockInRecord { .. }));
            assert!(store.is_empty());
        });
    }

    #[test]
    fn prop_second_clock_out_is_rejected(id in employee_id()) {
        System::new().block_on(async {
            let (service, store) = fresh();
            service.clock_in(&id).await.unwrap();
            let closed = service.clock_out(&id).await.unwrap();

            let err = service.clock_out(&id).await.unwrap_err();

            assert!(matches!(err, AttendanceError::DuplicateClockOut { .. }));
            assert_eq!(store.snapshot(), vec![closed]);
        });
    }

    #[test]
    fn prop_history_is_sorted_descending(
        id in employee_id(),
        offsets in prop::collection::btree_set(0i64..365, 1..20),
    ) {
        System::new().block_on(async {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap();
            let clock = Arc::new(FixedClock::new(start));
            let service =
                AttendanceService::with_clock(Arc::new(MemoryRecordStore::new()), clock.clone());

            // Insert out of order, interleaved with another employee
            for offset in offsets.iter().rev() {
                clock.set(start + Duration::days(*offset));
                service.clock_in(&id).await.unwrap();
                service.clock_in("someone-else").await.unwrap();
            }

            let history = service.get_attendance_history(&id).await.unwrap();

            assert_eq!(history.len(), offsets.len());
            assert!(history.windows(2).all(|w| w[0].work_date > w[1].work_date));
            assert!(history.iter().all(|r| r.employee_id == id));
        });
    }

    #[test]
    fn prop_blank_ids_are_invalid(id in "[ \t\n]{0,10}") {
        System::new().block_on(async {
            let (service, store) = fresh();

            assert!(matches!(
                service.clock_in(&id).await,
                Err(AttendanceError::InvalidArgument { .. })
            ));
            assert!(store.is_empty());
        });
    }

    #[test]
    fn prop_long_ids_are_invalid(id in "[A-Za-z0-9]{51,80}") {
        System::new().block_on(async {
            let (service, store) = fresh();

            assert!(matches!(
                service.clock_in(&id).await,
                Err(AttendanceError::InvalidArgument { .. })
            ));
            assert!(store.is_empty());
        });
    }
}
