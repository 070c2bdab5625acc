// =============================================================================
// Quantum Scheduling Simulator - Command-Line Driver Crate
// =============================================================================
// Table of Contents:
//   1. Module Declarations
// =============================================================================
// Purpose: Thin I/O wrapper around sim-core/sim-render: command-record
//          parsing, the driver loop, and the process-exit error taxonomy.
//          Carries no scheduling invariants of its own.
// =============================================================================

pub mod command;
pub mod driver;
pub mod error;
