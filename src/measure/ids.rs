//! Id generators for features and measurement groups.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique ids. Injected into the controller so tests can use a
/// deterministic sequence.
pub trait IdSource: Send + Sync {
    fn next_id(&mut self) -> u64;
}

static PROCESS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Process-wide monotonic counter. Every instance draws from the same sequence,
/// so ids never collide within one process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSequence;

impl IdSource for ProcessSequence {
    fn next_id(&mut self) -> u64 {
        PROCESS_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    }
}

/// Local counter starting at a fixed value.
#[allow(dead_code)] // Deterministic ids for tests
#[derive(Debug, Clone)]
pub struct MonotonicIds {
    next: u64,
}

#[allow(dead_code)]
impl MonotonicIds {
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for MonotonicIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for MonotonicIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_ids_increase() {
        let mut ids = MonotonicIds::starting_at(10);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.next_id(), 11);
        assert_eq!(ids.next_id(), 12);
    }

    #[test]
    fn test_process_sequence_shared_between_instances() {
        let mut a = ProcessSequence;
        let mut b = ProcessSequence;
        let first = a.next_id();
        let second = b.next_id();
        let third = a.next_id();
        assert!(second > first);
        assert!(third > second);
    }
}
