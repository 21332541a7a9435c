//! Active-job bookkeeping.
//!
//! At most one job may be in flight per `(week_id, kind)` key. A second
//! trigger for the same key is rejected until the first job's guard is
//! dropped, terminal state or not.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::{GenerationError, JobKind};

/// Shared registry of in-flight generation jobs.
#[derive(Debug, Clone, Default)]
pub struct JobTracker {
    active: Arc<Mutex<HashSet<(i64, JobKind)>>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the `(week_id, kind)` key. The returned guard releases the
    /// key on drop, so a panicking or cancelled job never wedges the slot.
    pub fn begin(&self, week_id: i64, kind: JobKind) -> Result<JobGuard, GenerationError> {
        let mut active = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !active.insert((week_id, kind)) {
            return Err(GenerationError::JobAlreadyActive { week_id, kind });
        }
        Ok(JobGuard {
            key: (week_id, kind),
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self, week_id: i64, kind: JobKind) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(week_id, kind))
    }
}

/// RAII claim on one job key.
#[derive(Debug)]
pub struct JobGuard {
    key: (i64, JobKind),
    active: Arc<Mutex<HashSet<(i64, JobKind)>>>,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_overlapping_key_until_guard_drops() {
        let tracker = JobTracker::new();

        let guard = tracker.begin(1, JobKind::Workout).expect("first claim");
        assert!(tracker.is_active(1, JobKind::Workout));
        assert!(matches!(
            tracker.begin(1, JobKind::Workout),
            Err(GenerationError::JobAlreadyActive { week_id: 1, .. })
        ));

        drop(guard);
        assert!(!tracker.is_active(1, JobKind::Workout));
        tracker.begin(1, JobKind::Workout).expect("key released");
    }

    #[test]
    fn different_kinds_and_weeks_do_not_collide() {
        let tracker = JobTracker::new();

        let _workout = tracker.begin(1, JobKind::Workout).expect("workout");
        let _diet = tracker.begin(1, JobKind::Diet).expect("same week, other kind");
        let _other = tracker.begin(2, JobKind::Workout).expect("other week");
    }

    #[test]
    fn clones_share_the_registry() {
        let tracker = JobTracker::new();
        let alias = tracker.clone();

        let _guard = tracker.begin(3, JobKind::Diet).expect("claim");
        assert!(alias.is_active(3, JobKind::Diet));
        assert!(alias.begin(3, JobKind::Diet).is_err());
    }
}
