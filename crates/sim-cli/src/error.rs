// =============================================================================
// Quantum Scheduling Simulator - CLI Error Types
// =============================================================================
// Table of Contents:
//   1. CliError - Driver and command-parsing failures
// =============================================================================
// Purpose: Wraps sim_core's fatal errors alongside the failure modes that
//          only exist at the I/O boundary: malformed command lines, unknown
//          opcodes, and filesystem/serialization failures writing snapshots.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// 1. CliError - Driver and command-parsing failures
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error("input file not found: {0}")]
    MissingInputFile(PathBuf),

    #[error("line {line_no}: malformed input line ({reason})")]
    MalformedLine { line_no: usize, reason: String },

    #[error("line {line_no}: unknown opcode '{opcode}'")]
    UnknownOpcode { line_no: usize, opcode: String },

    #[error("command stream referenced a job or issued a command before the configuration line")]
    MissingConfiguration,

    #[error(transparent)]
    Simulation(#[from] sim_core::error::SimError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_message_includes_line_number() {
        let err = CliError::MalformedLine {
            line_no: 3,
            reason: "missing required field".into(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
