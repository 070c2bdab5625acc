// =============================================================================
// Quantum Scheduling Simulator - Event Queue
// =============================================================================
// Table of Contents:
//   1. EventClass - Internal vs External event classification
//   2. Scheduled - An event paired with its ordering key
//   3. EventQueue - Priority-ordered pending event list
// =============================================================================
// Purpose: Keeps pending events ordered by (time ascending, Internal before
//          External at equal time, stable FIFO within a (time, class)
//          bucket). A binary heap alone cannot express the FIFO tie-break,
//          so each scheduled event carries a monotonically increasing
//          sequence number that participates in the ordering.
// =============================================================================

use crate::event::Event;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// =============================================================================
// 1. EventClass - Internal vs External event classification
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventClass {
    /// QuantumEnd. Settles the CPU before any External event at the same time.
    Internal,
    /// JobArrival, DeviceRequest, DeviceRelease, Display.
    External,
}

// =============================================================================
// 2. Scheduled - An event paired with its ordering key
// =============================================================================

#[derive(Debug)]
struct Scheduled {
    time: u64,
    class: EventClass,
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.class == other.class && self.seq == other.seq
    }
}
impl Eq for Scheduled {}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; we want the earliest (time, class, seq)
        // to pop first, so reverse the natural ordering.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.class.cmp(&self.class))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// 3. EventQueue - Priority-ordered pending event list
// =============================================================================

#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: u64, event: Event) {
        let class = event.class();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            time,
            class,
            seq,
            event,
        });
    }

    pub fn peek_time(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.time)
    }

    pub fn pop(&mut self) -> Option<(u64, Event)> {
        self.heap.pop().map(|s| (s.time, s.event))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(5, Event::Display { path_stem: "x".into() });
        q.schedule(1, Event::Display { path_stem: "x".into() });
        q.schedule(3, Event::Display { path_stem: "x".into() });

        let times: Vec<u64> = std::iter::from_fn(|| q.pop()).map(|(t, _)| t).collect();
        assert_eq!(times, vec![1, 3, 5]);
    }

    #[test]
    fn internal_precedes_external_at_equal_time() {
        let mut q = EventQueue::new();
        q.schedule(10, Event::Display { path_stem: "x".into() });
        q.schedule(10, Event::QuantumEnd);

        let (_, first) = q.pop().unwrap();
        assert_eq!(first.class(), EventClass::Internal);
    }

    #[test]
    fn stable_fifo_within_same_time_and_class() {
        let mut q = EventQueue::new();
        q.schedule(10, Event::DeviceRequest { job: 1, count: 1 });
        q.schedule(10, Event::DeviceRequest { job: 2, count: 1 });

        let (_, first) = q.pop().unwrap();
        match first {
            Event::DeviceRequest { job, .. } => assert_eq!(job, 1),
            _ => panic!("unexpected event"),
        }
    }
}
