// =============================================================================
// Quantum Scheduling Simulator - Snapshot Rendering
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Converts a SimulationState into the two snapshot formats the
//          driver emits on a Display event: a bordered text table for the
//          diagnostic stream, and a structured JSON object written to disk.
// =============================================================================

pub mod json;
pub mod text;

pub mod prelude {
    pub use crate::json::*;
    pub use crate::text::*;
}
