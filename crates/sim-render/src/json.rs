// =============================================================================
// Quantum Scheduling Simulator - Structured Snapshot
// =============================================================================
// Table of Contents:
//   1. NO_JOB - CPU-slot sentinel used on the wire
//   2. JobDto - Per-job structured record
//   3. Snapshot - The top-level structured snapshot
//   4. build_snapshot - SimulationState -> Snapshot
// =============================================================================
// Purpose: The serde-derived mirror of the text snapshot, written to
//          `{input_stem}_D{time}.json`. Field order matches the source's
//          `to_json` exactly; serde_json preserves struct declaration order
//          when serializing, so the struct below is the source of truth for
//          wire shape.
// =============================================================================

use serde::{Deserialize, Serialize};
use sim_core::error::SimError;
use sim_core::state::{Queue, SimulationState};

// =============================================================================
// 1. NO_JOB - CPU-slot sentinel used on the wire
// =============================================================================

/// The CPU slot's sentinel value on the wire, matching the source's `NoJob`.
pub const NO_JOB: i64 = -1;

// =============================================================================
// 2. JobDto - Per-job structured record
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDto {
    pub arrival_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices_allocated: Option<u32>,
    pub id: u32,
    pub remaining_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u64>,
}

// =============================================================================
// 3. Snapshot - The top-level structured snapshot
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub readyq: Vec<u32>,
    pub current_time: u64,
    pub total_memory: u64,
    pub available_memory: u64,
    pub total_devices: u32,
    pub running: i64,
    /// Always empty; kept for wire compatibility with the source, which
    /// never populates a "submit" queue distinct from the others.
    pub submitq: Vec<u32>,
    pub longq: Vec<u32>,
    pub holdq2: Vec<u32>,
    pub job: Vec<JobDto>,
    pub holdq1: Vec<u32>,
    pub available_devices: u32,
    pub quantum: u64,
    pub completeq: Vec<u32>,
    pub waitq: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_turnaround: Option<f64>,
}

// =============================================================================
// 4. build_snapshot - SimulationState -> Snapshot
// =============================================================================

pub fn build_snapshot(state: &SimulationState, include_system_turnaround: bool) -> Result<Snapshot, SimError> {
    let mut ids: Vec<u32> = state.jobs().map(|j| j.number).collect();
    ids.sort_unstable();

    let job = ids
        .into_iter()
        .map(|id| {
            let j = state.try_job(id)?;
            let on_active_queue = state.cpu_job() == Some(id)
                || state.queue(Queue::Ready).contains(&id)
                || state.queue(Queue::Wait).contains(&id);
            Ok(JobDto {
                arrival_time: j.arrival_time,
                devices_allocated: on_active_queue.then_some(j.allocated_devices),
                id,
                remaining_time: j.time_remaining,
                completion_time: j.completion_time,
            })
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    let (turnaround, weighted_turnaround) = if include_system_turnaround {
        state.turnaround_averages().map_or((None, None), |(u, w)| (Some(u), Some(w)))
    } else {
        (None, None)
    };

    Ok(Snapshot {
        readyq: state.queue(Queue::Ready).iter().copied().collect(),
        current_time: state.current_time,
        total_memory: state.max_memory,
        available_memory: state.available_memory(),
        total_devices: state.max_devices,
        running: state.cpu_job().map(|j| j as i64).unwrap_or(NO_JOB),
        submitq: Vec::new(),
        longq: state.queue(Queue::Long).iter().copied().collect(),
        holdq2: state.queue(Queue::Hold2).iter().copied().collect(),
        job,
        holdq1: state.queue(Queue::Hold1).iter().copied().collect(),
        available_devices: state.available_devices(),
        quantum: state.quantum_length,
        completeq: state.queue(Queue::Complete).iter().copied().collect(),
        waitq: state.queue(Queue::Wait).iter().copied().collect(),
        turnaround,
        weighted_turnaround,
    })
}
