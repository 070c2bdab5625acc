// =============================================================================
// Quantum Scheduling Simulator - Text Snapshot Renderer
// =============================================================================
// Table of Contents:
//   1. Table - Generic bordered table builder
//   2. job_state_label - Per-job state description
//   3. render_text - Full diagnostic-stream snapshot
// =============================================================================
// Purpose: Renders a SimulationState into the `|`/`-`/`=`-bordered text
//          format: a Jobs table with per-job turnaround columns, one table
//          per queue, and (on the terminal snapshot) two trailing system
//          average turnaround lines.
// =============================================================================

use sim_core::error::SimError;
use sim_core::state::{Queue, SimulationState};
use std::fmt::Write as _;

// =============================================================================
// 1. Table - Generic bordered table builder
// =============================================================================

const LEFT_COLUMN_BORDER: &str = "| ";
const CENTER_COLUMN_BORDER: &str = " | ";
const RIGHT_COLUMN_BORDER: &str = " |";
const TITLE_BORDER: &str = "===";

fn pad_center(contents: &str, pad_char: char, width: usize) -> String {
    if contents.len() >= width {
        return contents.to_string();
    }
    let left = (width - contents.len()) / 2;
    let right = (width - contents.len()) - left;
    format!(
        "{}{}{}",
        pad_char.to_string().repeat(left),
        contents,
        pad_char.to_string().repeat(right)
    )
}

fn pad_left(contents: &str, pad_char: char, width: usize) -> String {
    if contents.len() >= width {
        return contents.to_string();
    }
    format!("{}{}", contents, pad_char.to_string().repeat(width - contents.len()))
}

/// Renders a table from column-major string data, mirroring the source's
/// `print_table`: auto-sized columns, `|`/`-`/`=` borders, an optional
/// title and header row.
pub fn print_table(columns: &[Vec<String>], headers: &[&str], title: &str) -> String {
    let column_widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let data_width = col.iter().map(|s| s.len()).max().unwrap_or(0);
            let header_width = headers.get(i).map(|h| h.len()).unwrap_or(0);
            data_width.max(header_width)
        })
        .collect();

    let total_width = column_widths.iter().sum::<usize>()
        + LEFT_COLUMN_BORDER.len()
        + RIGHT_COLUMN_BORDER.len()
        + CENTER_COLUMN_BORDER.len() * columns.len().saturating_sub(1);

    let mut out = String::new();

    if !title.is_empty() {
        let title_string = format!("{TITLE_BORDER} {title} {TITLE_BORDER}");
        let _ = writeln!(out, "{}", pad_center(&title_string, '=', total_width));
    }

    if !headers.is_empty() {
        let _ = writeln!(out, "{}", pad_left("", '-', total_width));
        for (i, header) in headers.iter().enumerate() {
            out.push_str(if i == 0 { LEFT_COLUMN_BORDER } else { CENTER_COLUMN_BORDER });
            out.push_str(&pad_left(header, ' ', column_widths[i]));
        }
        out.push_str(RIGHT_COLUMN_BORDER);
        out.push('\n');
    }

    let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
    let _ = writeln!(out, "{}", pad_left("", '-', total_width));
    for row in 0..row_count {
        for (i, col) in columns.iter().enumerate() {
            out.push_str(if i == 0 { LEFT_COLUMN_BORDER } else { CENTER_COLUMN_BORDER });
            out.push_str(&pad_left(&col[row], ' ', column_widths[i]));
        }
        out.push_str(RIGHT_COLUMN_BORDER);
        out.push('\n');
    }
    let _ = writeln!(out, "{}", pad_left("", '-', total_width));

    out
}

fn print_queue_table(state: &SimulationState, title: &str, queue: Queue) -> String {
    let jobs: Vec<String> = state.queue(queue).iter().map(|id| id.to_string()).collect();
    print_table(&[jobs], &["Jobs"], title)
}

// =============================================================================
// 2. job_state_label - Per-job state description
// =============================================================================

fn job_state_label(state: &SimulationState, job_id: u32) -> Result<String, SimError> {
    if state.cpu_job() == Some(job_id) {
        return Ok("CPU".to_string());
    }
    for (queue, label) in [
        (Queue::Hold1, "Hold queue 1"),
        (Queue::Hold2, "Hold queue 2"),
        (Queue::Long, "Long queue"),
        (Queue::Ready, "Ready queue"),
        (Queue::Wait, "Device wait queue"),
    ] {
        if state.queue(queue).contains(&job_id) {
            return Ok(label.to_string());
        }
    }
    if state.queue(Queue::Complete).contains(&job_id) {
        let completion = state.try_job(job_id)?.completion_time.unwrap_or_default();
        return Ok(format!("Complete at time {completion}"));
    }
    Ok("???".to_string())
}

fn format_time_remaining(time_remaining: u64) -> String {
    if time_remaining == 0 {
        String::new()
    } else {
        time_remaining.to_string()
    }
}

// =============================================================================
// 3. render_text - Full diagnostic-stream snapshot
// =============================================================================

pub fn render_text(state: &SimulationState, include_system_turnaround: bool) -> Result<String, SimError> {
    let mut job_numbers = Vec::new();
    let mut job_states = Vec::new();
    let mut job_remaining = Vec::new();
    let mut job_unweighted = Vec::new();
    let mut job_weighted = Vec::new();

    let mut ids: Vec<u32> = state.jobs().map(|j| j.number).collect();
    ids.sort_unstable();
    for id in ids {
        let job = state.try_job(id)?;
        job_numbers.push(id.to_string());
        job_states.push(job_state_label(state, id)?);
        job_remaining.push(format_time_remaining(job.time_remaining));
        job_unweighted.push(job.unweighted_turnaround().map(|t| t.to_string()).unwrap_or_default());
        job_weighted.push(job.weighted_turnaround().map(|t| t.to_string()).unwrap_or_default());
    }

    let jobs_table = print_table(
        &[job_numbers, job_states, job_remaining, job_unweighted, job_weighted],
        &[
            "#",
            "State",
            "Time Remaining",
            "Turnaround Time (Unweighted)",
            "Turnaround Time (Weighted)",
        ],
        "Jobs",
    );

    let mut out = String::new();
    out.push_str(&jobs_table);
    out.push_str(&print_queue_table(state, "Hold Queue 1", Queue::Hold1));
    out.push_str(&print_queue_table(state, "Hold Queue 2", Queue::Hold2));
    out.push_str(&print_queue_table(state, "Long Queue", Queue::Long));
    out.push_str(&print_queue_table(state, "Ready Queue", Queue::Ready));
    out.push_str(&print_queue_table(state, "Device Wait Queue", Queue::Wait));
    out.push_str(&print_queue_table(state, "Complete Queue", Queue::Complete));

    if include_system_turnaround {
        if let Some((unweighted, weighted)) = state.turnaround_averages() {
            let _ = writeln!(out, "System average unweighted turnaround: {unweighted}");
            let _ = writeln!(out, "System average weighted turnaround: {weighted}");
        }
    }

    Ok(out)
}
