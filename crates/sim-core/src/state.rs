// =============================================================================
// Quantum Scheduling Simulator - Simulation State
// =============================================================================
// Table of Contents:
//   1. Queue - The six job-lifecycle queues
//   2. SimulationState - The authoritative model
//   3. Mutation primitives (section 4.1 of the design)
//   4. Reconciliation - update_queues
//   5. Turnaround accounting
//   6. Test-only helpers
// =============================================================================
// Purpose: Owns every counter, queue, the job table, and the pending event
//          queue. Events borrow this exclusively for the duration of their
//          `process` call; reconciliation runs immediately afterward.
// =============================================================================

use crate::banker::is_safe;
use crate::error::SimError;
use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::job::Job;
use std::collections::{HashMap, VecDeque};

/// The canonical terminal time. The driver schedules an implicit Display
/// here if none was scheduled explicitly; only a snapshot at this time
/// reports system-wide turnaround averages.
pub const END_TIME: u64 = 9999;

// =============================================================================
// 1. Queue - The six job-lifecycle queues
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    Hold1,
    Hold2,
    Long,
    Ready,
    Wait,
    Complete,
}

// =============================================================================
// 2. SimulationState - The authoritative model
// =============================================================================

#[derive(Debug)]
pub struct SimulationState {
    // Fixed configuration.
    pub max_memory: u64,
    pub time_excess: u64,
    pub max_devices: u32,
    pub quantum_length: u64,

    // Mutable resource counters.
    pub allocated_memory: u64,
    pub allocated_devices: u32,
    pub current_time: u64,

    // Job table and queues.
    jobs: HashMap<u32, Job>,
    hold1: VecDeque<u32>,
    hold2: VecDeque<u32>,
    long: VecDeque<u32>,
    ready: VecDeque<u32>,
    wait: VecDeque<u32>,
    complete: VecDeque<u32>,

    // CPU slot.
    cpu: Option<u32>,
    quantum_remaining: u64,

    // Open-question flag (section 9 / DESIGN.md): set during Long drain,
    // consumed by the next reconciliation's CPU-settle step.
    can_move: bool,

    pub event_queue: EventQueue,
}

impl SimulationState {
    pub fn new(max_memory: u64, time_excess: u64, max_devices: u32, quantum_length: u64) -> Self {
        Self {
            max_memory,
            time_excess,
            max_devices,
            quantum_length,
            allocated_memory: 0,
            allocated_devices: 0,
            current_time: 0,
            jobs: HashMap::new(),
            hold1: VecDeque::new(),
            hold2: VecDeque::new(),
            long: VecDeque::new(),
            ready: VecDeque::new(),
            wait: VecDeque::new(),
            complete: VecDeque::new(),
            cpu: None,
            quantum_remaining: 0,
            can_move: false,
            event_queue: EventQueue::new(),
        }
    }

    pub fn available_memory(&self) -> u64 {
        self.max_memory - self.allocated_memory
    }

    pub fn available_devices(&self) -> u32 {
        self.max_devices - self.allocated_devices
    }

    pub fn cpu_job(&self) -> Option<u32> {
        self.cpu
    }

    pub fn quantum_remaining(&self) -> u64 {
        self.quantum_remaining
    }

    pub fn job(&self, id: u32) -> &Job {
        self.jobs.get(&id).expect("job must exist in job table")
    }

    pub fn job_mut(&mut self, id: u32) -> &mut Job {
        self.jobs.get_mut(&id).expect("job must exist in job table")
    }

    /// Fallible counterpart to `job`, guarding the invariant that every
    /// queue only ever holds numbers present in the job table. Used at
    /// boundaries outside the reconciliation pipeline, such as rendering,
    /// where a caller walks queue contents without having just populated
    /// them itself.
    pub fn try_job(&self, id: u32) -> Result<&Job, SimError> {
        self.jobs.get(&id).ok_or(SimError::UnknownQueue { job: id })
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn queue(&self, q: Queue) -> &VecDeque<u32> {
        match q {
            Queue::Hold1 => &self.hold1,
            Queue::Hold2 => &self.hold2,
            Queue::Long => &self.long,
            Queue::Ready => &self.ready,
            Queue::Wait => &self.wait,
            Queue::Complete => &self.complete,
        }
    }

    fn queue_mut(&mut self, q: Queue) -> &mut VecDeque<u32> {
        match q {
            Queue::Hold1 => &mut self.hold1,
            Queue::Hold2 => &mut self.hold2,
            Queue::Long => &mut self.long,
            Queue::Ready => &mut self.ready,
            Queue::Wait => &mut self.wait,
            Queue::Complete => &mut self.complete,
        }
    }

    /// CPU ∪ Ready ∪ Wait, in that order — the snapshot the banker's check
    /// reasons over.
    pub fn active_job_numbers(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        if let Some(j) = self.cpu {
            ids.push(j);
        }
        ids.extend(self.ready.iter().copied());
        ids.extend(self.wait.iter().copied());
        ids
    }

    // =========================================================================
    // 3. Mutation primitives (section 4.1 of the design)
    // =========================================================================

    pub fn allocate_memory(&mut self, n: u64) {
        self.allocated_memory += n;
    }

    pub fn release_memory(&mut self, n: u64) {
        self.allocated_memory -= n;
    }

    /// Sets the CPU job's requested_devices to n (overwrites any prior
    /// outstanding request).
    pub fn cpu_request_devices(&mut self, n: u32) {
        let cpu = self.cpu.expect("cpu_request_devices requires an occupied CPU slot");
        self.job_mut(cpu).requested_devices = n;
    }

    pub fn cpu_release_devices(&mut self, n: u32) {
        let cpu = self.cpu.expect("cpu_release_devices requires an occupied CPU slot");
        self.job_mut(cpu).allocated_devices -= n;
        self.allocated_devices -= n;
    }

    /// Commits a pending grant for `job_id`: moves its requested_devices
    /// into allocated_devices (both locally and in the global counter) and
    /// clears the request.
    fn allocate_requested_devices(&mut self, job_id: u32) {
        let requested = self.job(job_id).requested_devices;
        self.allocated_devices += requested;
        let job = self.job_mut(job_id);
        job.allocated_devices += requested;
        job.requested_devices = 0;
    }

    pub fn end_quantum(&mut self) {
        self.quantum_remaining = 0;
    }

    /// Advances current_time from its previous value to `t` (t >= prev). If
    /// the CPU slot is occupied, decrements its time_remaining and
    /// quantum_remaining by the elapsed delta.
    pub fn set_time(&mut self, t: u64) {
        let delta = t - self.current_time;
        self.current_time = t;
        if let Some(cpu) = self.cpu {
            let job = self.job_mut(cpu);
            job.time_remaining = job.time_remaining.saturating_sub(delta);
            self.quantum_remaining = self.quantum_remaining.saturating_sub(delta);
        }
    }

    /// Occupies (or vacates) the CPU slot. Occupying schedules the matching
    /// QuantumEnd event at current_time + quantum_remaining.
    pub fn cpu_set_job(&mut self, job_id: Option<u32>) {
        self.cpu = job_id;
        match job_id {
            None => self.quantum_remaining = 0,
            Some(id) => {
                let job = self.job(id);
                self.quantum_remaining = job.time_remaining.min(self.quantum_length);
                let at = self.current_time + self.quantum_remaining;
                self.event_queue.schedule(at, Event::QuantumEnd);
            }
        }
    }

    /// Appends to the given queue. Hold1 is kept sorted by ascending
    /// runtime (stable for ties, insertion order preserved among equals).
    pub fn schedule_job(&mut self, queue: Queue, job_id: u32) {
        match queue {
            Queue::Hold1 => {
                let runtime = self.job(job_id).runtime;
                let pos = self
                    .hold1
                    .iter()
                    .position(|&existing| self.job(existing).runtime > runtime)
                    .unwrap_or(self.hold1.len());
                self.hold1.insert(pos, job_id);
            }
            other => self.queue_mut(other).push_back(job_id),
        }
        tracing::info!(job = job_id, queue = ?queue, "job placed in queue");
    }

    pub fn add_job(&mut self, job: Job) {
        self.jobs.insert(job.number, job);
    }

    pub fn schedule_event(&mut self, time: u64, event: Event) {
        self.event_queue.schedule(time, event);
    }

    // =========================================================================
    // 4. Reconciliation - update_queues
    // =========================================================================

    /// Runs the six-step reconciliation described in section 4.5. Invoked
    /// after every event handler.
    pub fn reconcile(&mut self) -> Result<(), SimError> {
        self.settle_cpu()?;
        self.drain_wait()?;
        self.drain_hold(Queue::Hold1);
        self.drain_hold(Queue::Hold2);
        self.drain_long();
        self.dispatch();
        Ok(())
    }

    fn settle_cpu(&mut self) -> Result<(), SimError> {
        let Some(job_id) = self.cpu else { return Ok(()) };
        if self.quantum_remaining != 0 {
            return Ok(());
        }

        // Read-only: `can_move` is only ever cleared at the top of each
        // `drain_long` loop iteration, matching the original's reset inside
        // the long-queue scan rather than on every CPU settle.
        let can_move = self.can_move;

        if self.job(job_id).time_remaining == 0 {
            let max_memory = self.job(job_id).max_memory;
            let allocated_devices = self.job(job_id).allocated_devices;
            self.release_memory(max_memory);
            self.cpu_release_devices(allocated_devices);
            let now = self.current_time;
            self.job_mut(job_id).completion_time = Some(now);
            self.schedule_job(Queue::Complete, job_id);
        } else {
            let is_long = self.job(job_id).accrued_runtime() >= self.time_excess;
            let mut target = if is_long && !can_move { Queue::Long } else { Queue::Ready };

            if self.job(job_id).requested_devices > 0 {
                if is_safe(self, job_id)? {
                    self.allocate_requested_devices(job_id);
                    target = Queue::Ready;
                } else {
                    target = Queue::Wait;
                }
            }
            self.schedule_job(target, job_id);
        }

        self.cpu_set_job(None);
        Ok(())
    }

    fn drain_wait(&mut self) -> Result<(), SimError> {
        let candidates: Vec<u32> = self.wait.iter().copied().collect();
        let mut still_waiting = VecDeque::new();
        for job_id in candidates {
            if is_safe(self, job_id)? {
                self.allocate_requested_devices(job_id);
                self.schedule_job(Queue::Ready, job_id);
            } else {
                still_waiting.push_back(job_id);
            }
        }
        self.wait = still_waiting;
        Ok(())
    }

    fn drain_hold(&mut self, queue: Queue) {
        let candidates: Vec<u32> = self.queue(queue).iter().copied().collect();
        let mut remaining = VecDeque::new();
        for job_id in candidates {
            if self.job(job_id).max_memory <= self.available_memory() {
                self.allocate_memory(self.job(job_id).max_memory);
                self.schedule_job(Queue::Ready, job_id);
            } else {
                remaining.push_back(job_id);
            }
        }
        *self.queue_mut(queue) = remaining;
    }

    fn drain_long(&mut self) {
        let candidates: Vec<u32> = self.long.iter().copied().collect();
        let mut remaining = VecDeque::new();
        for job_id in candidates {
            self.can_move = false;
            let quiescent =
                self.hold1.is_empty() && self.hold2.is_empty() && self.cpu.is_none() && !self.ready.is_empty();
            if quiescent {
                self.can_move = true;
                self.schedule_job(Queue::Ready, job_id);
            } else {
                remaining.push_back(job_id);
            }
        }
        self.long = remaining;
    }

    fn dispatch(&mut self) {
        if self.cpu.is_none() {
            if let Some(job_id) = self.ready.pop_front() {
                tracing::info!(job = job_id, "job placed on the CPU");
                self.cpu_set_job(Some(job_id));
            }
        }
    }

    // =========================================================================
    // 5. Turnaround accounting
    // =========================================================================

    /// Arithmetic means of unweighted and weighted turnaround over all
    /// Complete jobs, as reported on the terminal snapshot.
    pub fn turnaround_averages(&self) -> Option<(f64, f64)> {
        if self.complete.is_empty() {
            return None;
        }
        let mut unweighted_sum = 0.0;
        let mut weighted_sum = 0.0;
        let mut count = 0.0;
        for &id in &self.complete {
            let job = self.job(id);
            if let (Some(u), Some(w)) = (job.unweighted_turnaround(), job.weighted_turnaround()) {
                unweighted_sum += u as f64;
                weighted_sum += w;
                count += 1.0;
            }
        }
        if count == 0.0 {
            return None;
        }
        Some((unweighted_sum / count, weighted_sum / count))
    }

    // =========================================================================
    // 6. Test-only helpers
    // =========================================================================

    #[cfg(test)]
    pub fn cpu_set_job_for_test(&mut self, job_id: Option<u32>) {
        self.cpu = job_id;
    }

    #[cfg(test)]
    pub fn push_ready_for_test(&mut self, job_id: u32) {
        self.ready.push_back(job_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SimulationState {
        SimulationState::new(100, 50, 4, 10)
    }

    #[test]
    fn schedule_job_keeps_hold1_sorted_by_ascending_runtime() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 0, 20, 1));
        s.add_job(Job::new(0, 2, 10, 0, 5, 1));
        s.add_job(Job::new(0, 3, 10, 0, 15, 1));

        s.schedule_job(Queue::Hold1, 1);
        s.schedule_job(Queue::Hold1, 2);
        s.schedule_job(Queue::Hold1, 3);

        let order: Vec<u32> = s.queue(Queue::Hold1).iter().copied().collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn cpu_set_job_schedules_quantum_end() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 0, 25, 1));
        s.cpu_set_job(Some(1));
        assert_eq!(s.quantum_remaining(), 10);
        assert_eq!(s.event_queue.peek_time(), Some(10));
    }

    #[test]
    fn set_time_decrements_cpu_job_counters() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 0, 25, 1));
        s.cpu_set_job(Some(1));
        s.set_time(4);
        assert_eq!(s.job(1).time_remaining, 21);
        assert_eq!(s.quantum_remaining(), 6);
    }

    #[test]
    fn dispatch_pulls_from_ready_when_cpu_empty() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 0, 5, 1));
        s.push_ready_for_test(1);
        s.dispatch();
        assert_eq!(s.cpu_job(), Some(1));
    }

    #[test]
    fn turnaround_averages_none_when_no_completions() {
        let s = state();
        assert_eq!(s.turnaround_averages(), None);
    }

    #[test]
    fn turnaround_averages_computed_over_complete_jobs() {
        let mut s = state();
        let mut j1 = Job::new(0, 1, 10, 0, 5, 1);
        j1.completion_time = Some(5);
        let mut j2 = Job::new(0, 2, 10, 0, 15, 1);
        j2.completion_time = Some(15);
        s.add_job(j1);
        s.add_job(j2);
        s.complete.push_back(1);
        s.complete.push_back(2);

        let (unweighted, weighted) = s.turnaround_averages().unwrap();
        assert_eq!(unweighted, 10.0);
        assert_eq!(weighted, 1.0);
    }
}
