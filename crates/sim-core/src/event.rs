// =============================================================================
// Quantum Scheduling Simulator - Events
// =============================================================================
// Table of Contents:
//   1. Event - The five event variants
//   2. Event classification and dispatch
// =============================================================================
// Purpose: Sum-typed events carrying their own payload and a `process`
//          behavior. Dispatch is uniform: the driver pops the earliest
//          event, advances time, calls `process`, then reconciles. Display
//          is included here for ordering purposes but its actual rendering
//          lives in the sim-render crate, which the driver invokes after
//          observing a Display variant — sim-core has no I/O.
// =============================================================================

use crate::error::{RecoverableNotice, SimError};
use crate::event_queue::EventClass;
use crate::job::Job;
use crate::state::{Queue, SimulationState};

// =============================================================================
// 1. Event - The five event variants
// =============================================================================

#[derive(Debug, Clone)]
pub enum Event {
    JobArrival {
        arrival_time: u64,
        job_number: u32,
        max_memory: u64,
        max_devices: u32,
        runtime: u64,
        priority: u32,
    },
    DeviceRequest {
        job: u32,
        count: u32,
    },
    DeviceRelease {
        job: u32,
        count: u32,
    },
    QuantumEnd,
    Display {
        path_stem: String,
    },
}

// =============================================================================
// 2. Event classification and dispatch
// =============================================================================

impl Event {
    pub fn class(&self) -> EventClass {
        match self {
            Event::QuantumEnd => EventClass::Internal,
            _ => EventClass::External,
        }
    }

    /// Mutates `state` according to this event's contract (section 4.3).
    /// Display is a no-op here; the driver renders it separately.
    pub fn process(&self, state: &mut SimulationState) -> Result<(), SimError> {
        match self {
            Event::JobArrival {
                job_number,
                max_memory,
                max_devices,
                runtime,
                priority,
                arrival_time,
            } => Self::process_job_arrival(
                state,
                *arrival_time,
                *job_number,
                *max_memory,
                *max_devices,
                *runtime,
                *priority,
            ),
            Event::DeviceRequest { job, count } => Self::process_device_request(state, *job, *count),
            Event::DeviceRelease { job, count } => Self::process_device_release(state, *job, *count),
            Event::QuantumEnd => {
                tracing::info!("quantum ended");
                Ok(())
            }
            Event::Display { .. } => Ok(()),
        }
    }

    fn process_job_arrival(
        state: &mut SimulationState,
        arrival_time: u64,
        job_number: u32,
        max_memory: u64,
        max_devices: u32,
        runtime: u64,
        priority: u32,
    ) -> Result<(), SimError> {
        tracing::info!(job = job_number, "job arrival");

        if max_memory > state.max_memory || max_devices > state.max_devices {
            tracing::warn!(
                "{}",
                RecoverableNotice::JobRejected { job: job_number }
            );
            return Ok(());
        }

        if max_memory > state.available_memory() {
            let queue = match priority {
                1 => Queue::Hold1,
                2 => Queue::Hold2,
                other => {
                    return Err(SimError::InvalidPriority {
                        job: job_number,
                        priority: other,
                    })
                }
            };
            let job = Job::new(arrival_time, job_number, max_memory, max_devices, runtime, priority);
            state.add_job(job);
            state.schedule_job(queue, job_number);
        } else {
            // A job admitted directly never needs its priority validated —
            // priority only ever disambiguates which hold queue is used.
            state.allocate_memory(max_memory);
            let job = Job::new(arrival_time, job_number, max_memory, max_devices, runtime, priority);
            state.add_job(job);
            state.schedule_job(Queue::Ready, job_number);
        }
        Ok(())
    }

    fn process_device_request(state: &mut SimulationState, job: u32, count: u32) -> Result<(), SimError> {
        tracing::info!(job, count, "device request");
        if state.cpu_job() != Some(job) {
            tracing::warn!("{}", RecoverableNotice::OffCpuDeviceRequest { job });
            return Ok(());
        }
        state.cpu_request_devices(count);
        state.end_quantum();
        Ok(())
    }

    fn process_device_release(state: &mut SimulationState, job: u32, count: u32) -> Result<(), SimError> {
        tracing::info!(job, count, "device release");
        if state.cpu_job() != Some(job) {
            tracing::warn!("{}", RecoverableNotice::OffCpuDeviceRelease { job });
            return Ok(());
        }
        state.cpu_release_devices(count);
        state.end_quantum();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SimulationState;

    fn state() -> SimulationState {
        SimulationState::new(100, 50, 4, 10)
    }

    #[test]
    fn arrival_rejected_when_exceeding_system_totals() {
        let mut s = state();
        let event = Event::JobArrival {
            arrival_time: 0,
            job_number: 1,
            max_memory: 1000,
            max_devices: 0,
            runtime: 10,
            priority: 1,
        };
        event.process(&mut s).unwrap();
        assert!(s.jobs().next().is_none());
    }

    #[test]
    fn arrival_routes_to_hold1_when_memory_unavailable() {
        let mut s = state();
        s.allocate_memory(100);
        let event = Event::JobArrival {
            arrival_time: 0,
            job_number: 1,
            max_memory: 10,
            max_devices: 0,
            runtime: 10,
            priority: 1,
        };
        event.process(&mut s).unwrap();
        assert_eq!(s.queue(Queue::Hold1).front(), Some(&1));
    }

    #[test]
    fn arrival_invalid_priority_in_held_branch_is_fatal() {
        let mut s = state();
        s.allocate_memory(100);
        let event = Event::JobArrival {
            arrival_time: 0,
            job_number: 1,
            max_memory: 10,
            max_devices: 0,
            runtime: 10,
            priority: 9,
        };
        assert!(event.process(&mut s).is_err());
    }

    #[test]
    fn arrival_admits_directly_when_memory_available() {
        let mut s = state();
        let event = Event::JobArrival {
            arrival_time: 0,
            job_number: 1,
            max_memory: 10,
            max_devices: 0,
            runtime: 10,
            priority: 1,
        };
        event.process(&mut s).unwrap();
        assert_eq!(s.queue(Queue::Ready).front(), Some(&1));
        assert_eq!(s.allocated_memory, 10);
    }

    #[test]
    fn device_request_off_cpu_is_a_no_op() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 4, 10, 1));
        let event = Event::DeviceRequest { job: 1, count: 2 };
        event.process(&mut s).unwrap();
        assert_eq!(s.job(1).requested_devices, 0);
    }

    #[test]
    fn device_request_on_cpu_records_request_and_ends_quantum() {
        let mut s = state();
        s.add_job(Job::new(0, 1, 10, 4, 10, 1));
        s.cpu_set_job(Some(1));
        let event = Event::DeviceRequest { job: 1, count: 2 };
        event.process(&mut s).unwrap();
        assert_eq!(s.job(1).requested_devices, 2);
        assert_eq!(s.quantum_remaining(), 0);
    }
}
