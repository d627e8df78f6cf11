//! Per staff-and-date commit locks
//!
//! Commits touching the same staff member on the same date are
//! serialised; everything else proceeds in parallel. A commit that may
//! land on several candidates takes all of their locks in ascending
//! staff id order, so two such commits can never deadlock.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockKey = (i32, NaiveDate);

#[derive(Default)]
pub struct StaffDayLocks {
    locks: DashMap<LockKey, Arc<Mutex<()>>>,
}

/// Holds every acquired lock until dropped
pub struct StaffDayGuard {
    _held: Vec<OwnedMutexGuard<()>>,
}

impl StaffDayLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, staff_ids: &[i32], date: NaiveDate) -> StaffDayGuard {
        let mut ordered = staff_ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut held = Vec::with_capacity(ordered.len());
        for staff_id in ordered {
            let lock = self.locks.entry((staff_id, date)).or_default().clone();
            held.push(lock.lock_owned().await);
        }
        StaffDayGuard { _held: held }
    }

    /// Drop entries nobody holds or waits on
    pub fn prune_idle(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[tokio::test]
    async fn same_staff_and_date_is_exclusive() {
        let locks = Arc::new(StaffDayLocks::new());
        let guard = locks.acquire(&[1], date()).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(&[1], date()).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_staff_or_date_do_not_block() {
        let locks = StaffDayLocks::new();
        let _a = locks.acquire(&[1], date()).await;
        let _b = tokio::time::timeout(Duration::from_secs(1), locks.acquire(&[2], date()))
            .await
            .unwrap();
        let next_day = date().succ_opt().unwrap();
        let _c = tokio::time::timeout(Duration::from_secs(1), locks.acquire(&[1], next_day))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn overlapping_candidate_sets_do_not_deadlock() {
        let locks = Arc::new(StaffDayLocks::new());
        let mut tasks = Vec::new();
        for i in 0..16 {
            let locks = locks.clone();
            let ids = if i % 2 == 0 { vec![3, 1, 2] } else { vec![2, 3, 1, 1] };
            tasks.push(tokio::spawn(async move {
                let _g = locks.acquire(&ids, date()).await;
                tokio::task::yield_now().await;
            }));
        }
        for task in tasks {
            tokio::time::timeout(Duration::from_secs(2), task)
                .await
                .unwrap()
                .unwrap();
        }
    }

    #[tokio::test]
    async fn prune_removes_only_idle_entries() {
        let locks = StaffDayLocks::new();
        let held = locks.acquire(&[1], date()).await;
        drop(locks.acquire(&[2], date()).await);
        assert_eq!(locks.len(), 2);

        locks.prune_idle();
        assert_eq!(locks.len(), 1);

        drop(held);
        locks.prune_idle();
        assert!(locks.is_empty());
    }
}
