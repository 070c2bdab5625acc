// =============================================================================
// Quantum Scheduling Simulator - Banker's Safety Check
// =============================================================================
// Table of Contents:
//   1. is_safe - Pure function answering "is granting this request safe?"
// =============================================================================
// Purpose: Deadlock-avoidance admission check for device requests. Forms a
//          snapshot of the active jobs (CPU, Ready, Wait, in that order),
//          trial-grants the requester's pending request, then runs the
//          classical safety scan. The trial grant is never committed here;
//          callers observing `true` are responsible for the real transfer.
// =============================================================================

use crate::error::SimError;
use crate::state::SimulationState;

// =============================================================================
// 1. is_safe - Pure function answering "is granting this request safe?"
// =============================================================================

/// Evaluates whether `requester`'s currently-recorded `requested_devices`
/// can be granted without risking deadlock.
///
/// Step 1 is a hard claim check: a request exceeding the job's declared
/// need is a fatal input error, not a scheduling decision.
pub fn is_safe(state: &SimulationState, requester: u32) -> Result<bool, SimError> {
    let active: Vec<u32> = state.active_job_numbers();

    let mut allocation = Vec::with_capacity(active.len());
    let mut need: Vec<i64> = Vec::with_capacity(active.len());
    for &id in &active {
        let job = state.job(id);
        allocation.push(job.allocated_devices);
        need.push(job.need() as i64);
    }

    let requester_idx = active
        .iter()
        .position(|&id| id == requester)
        .expect("requester must be among CPU/Ready/Wait when bankers check runs");

    let request = state.job(requester).requested_devices as i64;

    // Step 1: claim check.
    if request > need[requester_idx] {
        return Err(SimError::ClaimExceeded {
            job: requester,
            requested: request as u32,
            need: need[requester_idx].max(0) as u32,
        });
    }

    // Step 2: availability.
    let mut available = state.available_devices() as i64;
    if request > available {
        return Ok(false);
    }

    // Step 3: trial grant.
    available -= request;
    allocation[requester_idx] += request as u32;
    need[requester_idx] -= request;

    // Safety algorithm. Strict `<`, not `<=` — preserved from the source;
    // see the open-question note in DESIGN.md.
    let mut work = available;
    let mut finish = vec![false; active.len()];

    loop {
        let next = finish
            .iter()
            .enumerate()
            .find(|(i, &done)| !done && need[*i] < work);

        match next {
            Some((i, _)) => {
                work += allocation[i] as i64;
                finish[i] = true;
            }
            None => break,
        }
    }

    Ok(finish.into_iter().all(|f| f))
}
