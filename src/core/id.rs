//! Monotonic record id generation
//!
//! Ids look like creation timestamps (milliseconds since the Unix epoch) so
//! documents written by earlier deployments stay compatible, but two records
//! created in the same millisecond still get distinct ids: the generator
//! never hands out a value lower than or equal to the previous one.

use super::entity::RecordId;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Generator of strictly increasing record ids
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator whose next id is greater than `floor`
    ///
    /// `floor` is usually the largest id already present in the document.
    pub fn seeded(floor: RecordId) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Hand out the next id
    pub fn next_id(&self) -> RecordId {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&self, now: RecordId) -> RecordId {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_the_clock() {
        let ids = IdGenerator::default();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(2_000), 2_000);
    }

    #[test]
    fn test_same_millisecond_still_unique() {
        let ids = IdGenerator::default();
        let first = ids.next_at(5_000);
        let second = ids.next_at(5_000);
        let third = ids.next_at(5_000);
        assert_eq!(first, 5_000);
        assert_eq!(second, 5_001);
        assert_eq!(third, 5_002);
    }

    #[test]
    fn test_clock_going_backwards_does_not_reuse_ids() {
        let ids = IdGenerator::default();
        ids.next_at(9_000);
        assert_eq!(ids.next_at(8_000), 9_001);
    }

    #[test]
    fn test_seed_is_respected() {
        let ids = IdGenerator::seeded(i64::MAX / 2);
        assert_eq!(ids.next_id(), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_largest_stored_id_does_not_overflow() {
        let ids = IdGenerator::seeded(i64::MAX);
        assert_eq!(ids.next_at(1_000), i64::MAX);
    }

    #[test]
    fn test_real_clock_is_strictly_increasing() {
        let ids = IdGenerator::default();
        let mut previous = ids.next_id();
        for _ in 0..1_000 {
            let next = ids.next_id();
            assert!(next > previous);
            previous = next;
        }
    }
}
