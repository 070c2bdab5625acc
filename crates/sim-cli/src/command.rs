// =============================================================================
// Quantum Scheduling Simulator - Command Stream Parser
// =============================================================================
// Table of Contents:
//   1. Command - One parsed line of the input stream
//   2. parse_line - Tokenizer and field extractor
// =============================================================================
// Purpose: Parses the `OP TIME K=V K=V...` command grammar described in
//          section 9 of the design into a typed Command. Mirrors the
//          source's `parse_command_tokens`: every field token must be at
//          least three characters (`K=V`), and a line with fewer than two
//          whitespace-separated tokens, an unknown opcode, or a missing
//          required field is fatal.
// =============================================================================

use crate::error::CliError;
use std::collections::HashMap;

// =============================================================================
// 1. Command - One parsed line of the input stream
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Configuration {
        time: u64,
        max_memory: u64,
        time_excess: u64,
        max_devices: u32,
        quantum_length: u64,
    },
    JobArrival {
        time: u64,
        job_number: u32,
        max_memory: u64,
        max_devices: u32,
        runtime: u64,
        priority: u32,
    },
    DeviceRequest {
        time: u64,
        job: u32,
        count: u32,
    },
    DeviceRelease {
        time: u64,
        job: u32,
        count: u32,
    },
    Display {
        time: u64,
    },
}

impl Command {
    pub fn time(&self) -> u64 {
        match self {
            Command::Configuration { time, .. }
            | Command::JobArrival { time, .. }
            | Command::DeviceRequest { time, .. }
            | Command::DeviceRelease { time, .. }
            | Command::Display { time } => *time,
        }
    }
}

// =============================================================================
// 2. parse_line - Tokenizer and field extractor
// =============================================================================

fn malformed(line_no: usize, reason: impl Into<String>) -> CliError {
    CliError::MalformedLine {
        line_no,
        reason: reason.into(),
    }
}

fn parse_fields(tokens: &[&str], line_no: usize) -> Result<HashMap<char, u64>, CliError> {
    let mut fields = HashMap::new();
    for token in tokens {
        if token.len() < 3 {
            return Err(malformed(line_no, format!("field token '{token}' is shorter than 3 characters")));
        }
        let key = token.chars().next().unwrap();
        let value = token[2..]
            .parse::<u64>()
            .map_err(|_| malformed(line_no, format!("field '{token}' has a non-numeric value")))?;
        fields.insert(key, value);
    }
    Ok(fields)
}

fn required(fields: &HashMap<char, u64>, key: char, line_no: usize) -> Result<u64, CliError> {
    fields
        .get(&key)
        .copied()
        .ok_or_else(|| malformed(line_no, format!("missing required field '{key}'")))
}

/// Parses one non-empty command line. `line_no` is 1-based, for error messages.
pub fn parse_line(line: &str, line_no: usize) -> Result<Command, CliError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(malformed(line_no, "fewer than 2 tokens"));
    }

    let opcode = tokens[0];
    let time: u64 = tokens[1]
        .parse()
        .map_err(|_| malformed(line_no, format!("'{}' is not a valid time", tokens[1])))?;
    let fields = parse_fields(&tokens[2..], line_no)?;

    match opcode {
        "C" => Ok(Command::Configuration {
            time,
            max_memory: required(&fields, 'M', line_no)?,
            time_excess: required(&fields, 'L', line_no)?,
            max_devices: required(&fields, 'S', line_no)? as u32,
            quantum_length: required(&fields, 'Q', line_no)?,
        }),
        "A" => Ok(Command::JobArrival {
            time,
            job_number: required(&fields, 'J', line_no)? as u32,
            max_memory: required(&fields, 'M', line_no)?,
            max_devices: required(&fields, 'S', line_no)? as u32,
            runtime: required(&fields, 'R', line_no)?,
            priority: required(&fields, 'P', line_no)? as u32,
        }),
        "Q" => Ok(Command::DeviceRequest {
            time,
            job: required(&fields, 'J', line_no)? as u32,
            count: required(&fields, 'D', line_no)? as u32,
        }),
        "L" => Ok(Command::DeviceRelease {
            time,
            job: required(&fields, 'J', line_no)? as u32,
            count: required(&fields, 'D', line_no)? as u32,
        }),
        "D" => Ok(Command::Display { time }),
        other => Err(CliError::UnknownOpcode {
            line_no,
            opcode: other.to_string(),
        }),
    }
}
