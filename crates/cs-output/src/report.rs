//! Human-readable console report.
//!
//! ```text
//! --- SJF ---
//! Execution Order: [P1, P2, P1]
//! P1 | Waiting = 4 | Turnaround = 12
//! P2 | Waiting = 0 | Turnaround = 4
//! Average Waiting Time = 2.00
//! Average Turnaround Time = 8.00
//! ```
//!
//! Processes are listed by name.  Results carrying a quantum history (the
//! adaptive hybrid policy) get one extra line per process:
//! `P1 | Quantum History = [7, 10, 14, 0]`.

use std::io::{self, Write};

use cs_core::SimulationResult;

/// Write the report for one policy run, preceded by a blank line.
pub fn write_report<W: Write>(out: &mut W, title: &str, result: &SimulationResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {title} ---")?;
    writeln!(out, "Execution Order: [{}]", result.execution_order.join(", "))?;

    for (name, o) in &result.process_results {
        writeln!(out, "{name} | Waiting = {} | Turnaround = {}", o.waiting_time, o.turnaround_time)?;
    }

    writeln!(out, "Average Waiting Time = {:.2}", result.average_waiting_time)?;
    writeln!(out, "Average Turnaround Time = {:.2}", result.average_turnaround_time)?;

    for (name, history) in &result.quantum_history {
        let values: Vec<String> = history.iter().map(u64::to_string).collect();
        writeln!(out, "{name} | Quantum History = [{}]", values.join(", "))?;
    }
    Ok(())
}
