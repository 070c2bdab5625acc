// =============================================================================
// Quantum Scheduling Simulator - Job
// =============================================================================
// Table of Contents:
//   1. Priority - Arrival priority, fixes which hold queue is used
//   2. Job - Mutable simulation record for one arrived job
//   3. Turnaround accounting helpers
// =============================================================================
// Purpose: The unit of work scheduled by the simulator. A Job carries its
//          immutable arrival identity alongside the mutable counters the
//          engine updates as the job moves through the queue lifecycle.
// =============================================================================

use serde::{Deserialize, Serialize};

// =============================================================================
// 1. Priority - Arrival priority, fixes which hold queue is used
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    One,
    Two,
}

impl Priority {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Priority::One),
            2 => Some(Priority::Two),
            _ => None,
        }
    }
}

// =============================================================================
// 2. Job - Mutable simulation record for one arrived job
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    // Immutable identity, fixed at arrival.
    pub arrival_time: u64,
    pub number: u32,
    pub max_memory: u64,
    pub max_devices: u32,
    pub runtime: u64,
    /// Stored as the raw arrival value, not the typed `Priority`: a job
    /// admitted directly (memory available on arrival) never has its
    /// priority validated, so an out-of-range value must still be
    /// representable. `Priority` is used only to route held jobs.
    pub priority: u32,

    // Mutable state, updated by event handlers and reconciliation.
    pub allocated_devices: u32,
    pub requested_devices: u32,
    pub time_remaining: u64,
    pub completion_time: Option<u64>,
}

impl Job {
    pub fn new(
        arrival_time: u64,
        number: u32,
        max_memory: u64,
        max_devices: u32,
        runtime: u64,
        priority: u32,
    ) -> Self {
        Self {
            arrival_time,
            number,
            max_memory,
            max_devices,
            runtime,
            priority,
            allocated_devices: 0,
            requested_devices: 0,
            time_remaining: runtime,
            completion_time: None,
        }
    }

    /// `max_devices - allocated_devices`; the job's outstanding claim as seen
    /// by the banker's safety check.
    pub fn need(&self) -> u32 {
        self.max_devices.saturating_sub(self.allocated_devices)
    }

    pub fn accrued_runtime(&self) -> u64 {
        self.runtime.saturating_sub(self.time_remaining)
    }

    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    // ---------------------------------------------------------------------
    // 3. Turnaround accounting helpers
    // ---------------------------------------------------------------------

    pub fn unweighted_turnaround(&self) -> Option<u64> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    pub fn weighted_turnaround(&self) -> Option<f64> {
        self.unweighted_turnaround()
            .map(|t| t as f64 / self.runtime as f64)
    }
}
