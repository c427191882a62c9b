//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the scheduling core. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Pipeline activity:** Dispatch, issue, broadcast, and wakeup counts plus stall breakdown.
//! 3. **Instruction mix:** Issued instructions by execution unit.
//! 4. **Branch prediction:** Lookups, mispredictions, and accuracy.

use std::fmt;
use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total steps executed.
    pub cycles: u64,
    /// Instructions accepted into the reservation station and reorder buffer.
    pub instructions_dispatched: u64,
    /// Instructions issued to an execution unit.
    pub instructions_issued: u64,
    /// Instructions retired from the reorder buffer.
    pub instructions_retired: u64,

    /// Results delivered over the common data bus.
    pub broadcasts: u64,
    /// Operand slots resolved by broadcasts.
    pub operands_woken: u64,
    /// Operand slots resolved at dispatch from completed ROB entries.
    pub operands_forwarded: u64,
    /// Operand slots resolved at dispatch from committed results.
    pub operands_committed: u64,

    /// Count of ALU instructions issued.
    pub inst_alu: u64,
    /// Count of branch instructions issued.
    pub inst_branch: u64,

    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,

    /// Dispatch attempts held back by a full reservation station.
    pub stalls_rs_full: u64,
    /// Dispatch attempts held back by a full reorder buffer.
    pub stalls_rob_full: u64,
    /// Cycles where the oldest ROB entry was still waiting.
    pub stalls_retire: u64,
    /// Cycles where nothing in the reservation station was ready to issue.
    pub issue_idle: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_dispatched: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            broadcasts: 0,
            operands_woken: 0,
            operands_forwarded: 0,
            operands_committed: 0,
            inst_alu: 0,
            inst_branch: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_rs_full: 0,
            stalls_rob_full: 0,
            stalls_retire: 0,
            issue_idle: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "branch"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

fn percent(part: u64, whole: u64) -> f64 {
    (part as f64 / whole.max(1) as f64) * 100.0
}

impl SimStats {
    /// Branch prediction accuracy in percent, or 0 if no branch has resolved.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            percent(self.branch_predictions, total)
        }
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// Writes the requested sections to `out`.
    ///
    /// Unknown section names are ignored. An empty slice selects every section.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_sections<W: fmt::Write>(&self, out: &mut W, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        writeln!(out, "\n{BANNER}")?;
        writeln!(out, "TOMASULO CORE SIMULATION STATISTICS")?;
        writeln!(out, "{BANNER}")?;
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
            writeln!(out, "sim_cpi                  {:.4}", cyc as f64 / instr as f64)?;
            writeln!(out, "{RULE}")?;
        }
        if want("pipeline") {
            writeln!(out, "PIPELINE")?;
            writeln!(out, "  dispatched             {}", self.instructions_dispatched)?;
            writeln!(out, "  issued                 {}", self.instructions_issued)?;
            writeln!(out, "  broadcasts             {}", self.broadcasts)?;
            writeln!(out, "  operands.woken         {}", self.operands_woken)?;
            writeln!(out, "  operands.forwarded     {}", self.operands_forwarded)?;
            writeln!(out, "  operands.committed     {}", self.operands_committed)?;
            writeln!(
                out,
                "  stalls.rs_full         {} ({:.2}%)",
                self.stalls_rs_full,
                percent(self.stalls_rs_full, cyc)
            )?;
            writeln!(
                out,
                "  stalls.rob_full        {} ({:.2}%)",
                self.stalls_rob_full,
                percent(self.stalls_rob_full, cyc)
            )?;
            writeln!(
                out,
                "  stalls.retire          {} ({:.2}%)",
                self.stalls_retire,
                percent(self.stalls_retire, cyc)
            )?;
            writeln!(
                out,
                "  issue.idle             {} ({:.2}%)",
                self.issue_idle,
                percent(self.issue_idle, cyc)
            )?;
            writeln!(out, "{RULE}")?;
        }
        if want("instruction_mix") {
            let issued = self.instructions_issued;
            writeln!(out, "INSTRUCTION MIX")?;
            writeln!(
                out,
                "  op.alu                 {} ({:.2}%)",
                self.inst_alu,
                percent(self.inst_alu, issued)
            )?;
            writeln!(
                out,
                "  op.branch              {} ({:.2}%)",
                self.inst_branch,
                percent(self.inst_branch, issued)
            )?;
            writeln!(out, "{RULE}")?;
        }
        if want("branch") {
            let bp_total = self.branch_predictions + self.branch_mispredictions;
            writeln!(out, "BRANCH PREDICTION")?;
            writeln!(out, "  bp.lookups             {bp_total}")?;
            writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions)?;
            writeln!(out, "  bp.accuracy            {:.2}%", self.branch_accuracy())?;
            writeln!(out, "{RULE}")?;
        }
        writeln!(out, "{BANNER}")
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let mut report = String::new();
        if self.write_sections(&mut report, sections).is_ok() {
            print!("{report}");
        }
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
