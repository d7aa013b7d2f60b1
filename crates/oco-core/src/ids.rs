//! Identifier suppliers for jobs and legs.
//!
//! Every leg and every job gets its own id. [`UuidIdGenerator`] is the
//! production supplier; [`SequentialIds`] gives predictable ids for tests and
//! dry runs.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of globally unique job and leg identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> Uuid;
}

/// Random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    #[inline]
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counts up from 1, encoding the counter as the UUID's low bits.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.saturating_sub(1)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(n as u128)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> Uuid {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_v4_and_distinct() {
        let g = UuidIdGenerator;
        let (a, b) = (g.next_id(), g.next_id());
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn sequential_ids_count_up() {
        let g = SequentialIds::default();
        assert_eq!(g.next_id(), Uuid::from_u128(1));
        assert_eq!(g.next_id(), Uuid::from_u128(2));

        let g = SequentialIds::starting_at(10);
        assert_eq!(g.next_id(), Uuid::from_u128(10));
    }
}
