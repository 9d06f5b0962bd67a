use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{RecordStore, StoreError};
use crate::model::attendance::AttendanceRecord;

#[derive(Default)]
struct Inner {
    records: Vec<AttendanceRecord>,
    last_id: u64,
}

/// In-process store. Uniqueness of (employee_id, work_date) is checked under
/// the same lock as the insert, so concurrent clock-ins cannot both land.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every stored record in insertion order.
    pub fn snapshot(&self) -> Vec<AttendanceRecord> {
        self.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_latest_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .lock()
            .records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.work_date == work_date)
            .max_by_key(|r| r.id)
            .cloned())
    }

    async fn exists_by_employee_and_date(
        &self,
        employee_id: &str,
        work_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self
            .lock()
            .records
            .iter()
            .any(|r| r.employee_id == employee_id && r.work_date == work_date))
    }

    async fn find_all_by_employee_ordered_by_date_desc(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut history: Vec<AttendanceRecord> = self
            .lock()
            .records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.work_date.cmp(&a.work_date));
        Ok(history)
    }

    async fn save(&self, mut record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let mut inner = self.lock();

        match record.id {
            Some(id) => {
                let slot = inner
                    .records
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or(StoreError::NotFound { id })?;
                *slot = record.clone();
            }
            None => {
                let taken = inner.records.iter().any(|r| {
                    r.employee_id == record.employee_id && r.work_date == record.work_date
                });
                if taken {
                    return Err(StoreError::Conflict {
                        employee_id: record.employee_id,
                        work_date: record.work_date,
                    });
                }

                inner.last_id += 1;
                record.id = Some(inner.last_id);
                inner.records.push(record.clone());
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn morning(d: u32) -> NaiveDateTime {
        day(d).and_hms_opt(9, 0, 0).unwrap()
    }

    #[actix_web::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryRecordStore::new();

        let first = store
            .save(AttendanceRecord::clocked_in("E001", morning(1)))
            .await
            .unwrap();
        let second = store
            .save(AttendanceRecord::clocked_in("E001", morning(2)))
            .await
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn second_insert_for_same_day_conflicts() {
        let store = MemoryRecordStore::new();
        store
            .save(AttendanceRecord::clocked_in("E001", morning(1)))
            .await
            .unwrap();

        let err = store
            .save(AttendanceRecord::clocked_in("E001", morning(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict { ref employee_id, work_date }
            if employee_id == "E001" && work_date == day(1)));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn update_replaces_existing_row() {
        let store = MemoryRecordStore::new();
        let mut saved = store
            .save(AttendanceRecord::clocked_in("E001", morning(1)))
            .await
            .unwrap();

        saved.clock_out_time = Some(day(1).and_hms_opt(17, 0, 0).unwrap());
        store.save(saved.clone()).await.unwrap();

        let found = store
            .find_latest_by_employee_and_date("E001", day(1))
            .await
            .unwrap();
        assert_eq!(found, Some(saved));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn update_of_unknown_id_fails() {
        let store = MemoryRecordStore::new();
        let mut record = AttendanceRecord::clocked_in("E001", morning(1));
        record.id = Some(42);

        let err = store.save(record).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound { id: 42 }));
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn history_is_filtered_and_sorted_descending() {
        let store = MemoryRecordStore::new();
        for d in [3, 1, 2] {
            store
                .save(AttendanceRecord::clocked_in("E001", morning(d)))
                .await
                .unwrap();
        }
        store
            .save(AttendanceRecord::clocked_in("E002", morning(4)))
            .await
            .unwrap();

        let history = store
            .find_all_by_employee_ordered_by_date_desc("E001")
            .await
            .unwrap();

        let dates: Vec<_> = history.iter().map(|r| r.work_date).collect();
        assert_eq!(dates, vec![day(3), day(2), day(1)]);
        assert!(history.iter().all(|r| r.employee_id == "E001"));
        assert!(
            !store
                .exists_by_employee_and_date("E002", day(1))
                .await
                .unwrap()
        );
    }
}
