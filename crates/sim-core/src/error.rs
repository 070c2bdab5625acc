// =============================================================================
// Quantum Scheduling Simulator - Core Error Types
// =============================================================================
// Table of Contents:
//   1. SimError - Fatal errors that terminate the simulation
//   2. RecoverableNotice - Diagnostic-only conditions, never propagated
// =============================================================================
// Purpose: Error taxonomy for the scheduling engine. Fatal conditions are
//          modeled as a thiserror enum and propagate via Result; recoverable
//          conditions are plain values meant to be logged and discarded, since
//          surfacing them as Err would abort the driver loop, which the
//          engine must never do for them.
// =============================================================================

use thiserror::Error;

// =============================================================================
// 1. SimError - Fatal errors that terminate the simulation
// =============================================================================

#[derive(Debug, Error)]
pub enum SimError {
    #[error("job {job}: priority {priority} is invalid (must be 1 or 2)")]
    InvalidPriority { job: u32, priority: u32 },

    #[error("job {job}: requested {requested} devices but need is only {need}")]
    ClaimExceeded { job: u32, requested: u32, need: u32 },

    #[error("internal error: job {job} referenced from a queue but missing from the job table")]
    UnknownQueue { job: u32 },
}

// =============================================================================
// 2. RecoverableNotice - Diagnostic-only conditions, never propagated
// =============================================================================

/// Conditions that spec section 7 classifies as recoverable: the event is
/// consumed as a no-op and reconciliation proceeds. These are never
/// `std::error::Error` values — they are logged via `tracing::warn!` at the
/// call site and do not unwind the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverableNotice {
    OffCpuDeviceRequest { job: u32 },
    OffCpuDeviceRelease { job: u32 },
    JobRejected { job: u32 },
}

impl std::fmt::Display for RecoverableNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverableNotice::OffCpuDeviceRequest { job } => {
                write!(f, "device request from job {job}, which is not on the CPU")
            }
            RecoverableNotice::OffCpuDeviceRelease { job } => {
                write!(f, "device release from job {job}, which is not on the CPU")
            }
            RecoverableNotice::JobRejected { job } => {
                write!(f, "job {job} rejected: exceeds system totals")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_exceeded_message_includes_job_numbers() {
        let err = SimError::ClaimExceeded {
            job: 2,
            requested: 3,
            need: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("job 2"));
        assert!(msg.contains("requested 3"));
    }

    #[test]
    fn recoverable_notice_displays_without_panicking() {
        let notice = RecoverableNotice::OffCpuDeviceRequest { job: 7 };
        assert_eq!(
            notice.to_string(),
            "device request from job 7, which is not on the CPU"
        );
    }
}
