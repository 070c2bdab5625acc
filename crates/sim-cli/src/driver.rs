// =============================================================================
// Quantum Scheduling Simulator - Driver Loop
// =============================================================================
// Table of Contents:
//   1. Driver - Owns the simulation state across a command stream
//   2. run - Reads a command file to completion
//   3. drain_through - process_events_through_time
//   4. emit_display - Text and JSON snapshot output for a Display event
// =============================================================================
// Purpose: Mirrors the source's main() loop: each command line is parsed,
//          turned into either the one-time configuration or a scheduled
//          event, and the event queue is drained up to that line's time
//          before moving to the next line. If the stream never explicitly
//          requests a display at or past the terminal time, one is
//          scheduled and drained implicitly once the input is exhausted.
// =============================================================================

use crate::command::{self, Command};
use crate::error::CliError;
use sim_core::event::Event;
use sim_core::state::{SimulationState, END_TIME};
use std::fs;
use std::path::Path;

// =============================================================================
// 1. Driver - Owns the simulation state across a command stream
// =============================================================================

pub struct Driver {
    state: SimulationState,
    input_stem: String,
    explicit_final_display: bool,
}

impl Driver {
    // =========================================================================
    // 2. run - Reads a command file to completion
    // =========================================================================

    pub fn run(path: &Path) -> Result<(), CliError> {
        if !path.is_file() {
            return Err(CliError::MissingInputFile(path.to_path_buf()));
        }
        let input_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sim".to_string());
        let contents = fs::read_to_string(path)?;

        let mut driver: Option<Driver> = None;

        for (idx, line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let cmd = command::parse_line(line, line_no)?;

            if driver.is_none() {
                let Command::Configuration {
                    time,
                    max_memory,
                    time_excess,
                    max_devices,
                    quantum_length,
                } = cmd
                else {
                    return Err(CliError::MissingConfiguration);
                };
                let mut state = SimulationState::new(max_memory, time_excess, max_devices, quantum_length);
                state.set_time(time);
                driver = Some(Driver {
                    state,
                    input_stem: input_stem.clone(),
                    explicit_final_display: false,
                });
                continue;
            }

            if matches!(cmd, Command::Configuration { .. }) {
                return Err(CliError::MalformedLine {
                    line_no,
                    reason: "duplicate configuration line; configuration must appear exactly once".into(),
                });
            }

            let d = driver.as_mut().expect("driver initialized above");
            d.apply(&cmd)?;
            let time = cmd.time();
            d.drain_through(time)?;
        }

        let Some(mut d) = driver else {
            return Err(CliError::MissingConfiguration);
        };

        if !d.explicit_final_display {
            d.state.schedule_event(
                END_TIME,
                Event::Display {
                    path_stem: d.input_stem.clone(),
                },
            );
            d.drain_through(END_TIME)?;
        }

        Ok(())
    }

    /// Applies a non-configuration command. The caller has already rejected
    /// a second `Command::Configuration`, so that variant never reaches here.
    fn apply(&mut self, cmd: &Command) -> Result<(), CliError> {
        match *cmd {
            Command::Configuration { .. } => unreachable!("duplicate configuration rejected by caller"),
            Command::JobArrival {
                time,
                job_number,
                max_memory,
                max_devices,
                runtime,
                priority,
            } => self.state.schedule_event(
                time,
                Event::JobArrival {
                    arrival_time: time,
                    job_number,
                    max_memory,
                    max_devices,
                    runtime,
                    priority,
                },
            ),
            Command::DeviceRequest { time, job, count } => {
                self.state.schedule_event(time, Event::DeviceRequest { job, count })
            }
            Command::DeviceRelease { time, job, count } => {
                self.state.schedule_event(time, Event::DeviceRelease { job, count })
            }
            Command::Display { time } => {
                if time >= END_TIME {
                    self.explicit_final_display = true;
                }
                self.state.schedule_event(
                    time,
                    Event::Display {
                        path_stem: self.input_stem.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    // =========================================================================
    // 3. drain_through - process_events_through_time
    // =========================================================================

    fn drain_through(&mut self, time: u64) -> Result<(), CliError> {
        while let Some(next_time) = self.state.event_queue.peek_time() {
            if next_time > time {
                break;
            }
            self.state.set_time(next_time);
            let (_, event) = self.state.event_queue.pop().expect("peek_time returned Some");

            if let Event::Display { .. } = &event {
                self.emit_display(next_time)?;
            } else {
                event.process(&mut self.state)?;
            }
            self.state.reconcile()?;
        }
        Ok(())
    }

    // =========================================================================
    // 4. emit_display - Text and JSON snapshot output for a Display event
    // =========================================================================

    fn emit_display(&self, time: u64) -> Result<(), CliError> {
        let include_system_turnaround = time >= END_TIME;
        let text = sim_render::text::render_text(&self.state, include_system_turnaround)?;
        println!("{text}");

        let snapshot = sim_render::json::build_snapshot(&self.state, include_system_turnaround)?;
        let out_path = format!("{}_D{}.json", self.input_stem, time);
        let file = fs::File::create(&out_path)?;
        serde_json::to_writer_pretty(file, &snapshot)?;
        Ok(())
    }
}
