use parking_lot::Mutex;

use crate::task::DelayedTask;

/// The wheel's slot storage: many producers append, one tick driver drains.
///
/// Each slot has its own lock, so an append only ever contends with appends
/// to the same slot or with that slot's drain. Draining swaps the slot's
/// vector for an empty one under the lock: a racing append either makes it
/// into the swapped-out snapshot or lands in the fresh vector and waits a
/// full rotation. No path loses or duplicates a task.
pub(crate) struct BucketArray {
    slots: Vec<Mutex<Vec<Box<dyn DelayedTask>>>>,
}

impl BucketArray {
    pub(crate) fn new(wheel_size: usize) -> Self {
        let slots = (0..wheel_size).map(|_| Mutex::new(Vec::new())).collect();
        Self { slots }
    }

    pub(crate) fn append(&self, slot: usize, task: Box<dyn DelayedTask>) {
        self.slots[slot].lock().push(task);
    }

    /// Take everything currently in the slot, leaving it empty.
    pub(crate) fn drain(&self, slot: usize) -> Vec<Box<dyn DelayedTask>> {
        std::mem::take(&mut *self.slots[slot].lock())
    }

    #[cfg(test)]
    pub(crate) fn len(&self, slot: usize) -> usize {
        self.slots[slot].lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ActionTask;
    use std::sync::Arc;

    fn noop() -> Box<dyn DelayedTask> {
        Box::new(ActionTask::new(0, || {}))
    }

    #[test]
    fn drain_returns_snapshot_and_empties_slot() {
        let buckets = BucketArray::new(4);
        buckets.append(2, noop());
        buckets.append(2, noop());
        buckets.append(3, noop());

        let drained = buckets.drain(2);
        assert_eq!(drained.len(), 2);
        assert_eq!(buckets.len(2), 0);
        // Sibling slot untouched.
        assert_eq!(buckets.len(3), 1);

        assert!(buckets.drain(2).is_empty());
    }

    #[test]
    fn concurrent_appends_and_drains_account_for_every_task() {
        const WRITERS: usize = 8;
        const PER_WRITER: usize = 200;

        let buckets = Arc::new(BucketArray::new(1));
        let mut handles = Vec::new();

        for _ in 0..WRITERS {
            let buckets = Arc::clone(&buckets);
            handles.push(std::thread::spawn(move || {
                for _ in 0..PER_WRITER {
                    buckets.append(0, Box::new(ActionTask::new(0, || {})));
                }
            }));
        }

        // Drain while the writers hammer the slot.
        let mut seen = 0;
        while seen < WRITERS * PER_WRITER {
            seen += buckets.drain(0).len();
            if handles.iter().all(|h| h.is_finished()) {
                seen += buckets.drain(0).len();
                break;
            }
            std::thread::yield_now();
        }

        for handle in handles {
            handle.join().expect("writer thread");
        }
        seen += buckets.drain(0).len();
        assert_eq!(seen, WRITERS * PER_WRITER);
    }
}
