//! Statistics Verification Tests.
//!
//! Counters are checked against a run whose every step is known, and the
//! report writer is checked for section filtering.

use pretty_assertions::assert_eq;
use tomasulo_core::config::Config;
use tomasulo_core::stats::{STATS_SECTIONS, SimStats};
use tomasulo_core::{Program, Simulator};

fn demo_stats() -> SimStats {
    let mut sim = Simulator::new(&Config::default(), Program::demo()).unwrap();
    let _ = sim.run().unwrap();
    sim.core.stats
}

#[test]
fn demo_counters() {
    let s = demo_stats();
    assert_eq!(s.cycles, 5);
    assert_eq!(s.instructions_dispatched, 3);
    assert_eq!(s.instructions_issued, 3);
    assert_eq!(s.instructions_retired, 3);
    assert_eq!(s.broadcasts, 3);
    // C's and B's flags operands.
    assert_eq!(s.operands_woken, 2);
    assert_eq!(s.operands_forwarded, 0);
    assert_eq!(s.inst_alu, 3);
    assert_eq!(s.inst_branch, 0);
    // Cycle 2: A issued but not complete.
    assert_eq!(s.stalls_retire, 1);
    // Cycles 1 and 5.
    assert_eq!(s.issue_idle, 2);
    assert_eq!(s.stalls_rs_full + s.stalls_rob_full, 0);
    assert!((s.ipc() - 0.6).abs() < 1e-9);
}

#[test]
fn accuracy_without_branches_is_zero() {
    assert!(SimStats::default().branch_accuracy().abs() < f64::EPSILON);
    let mut s = SimStats::default();
    s.branch_predictions = 3;
    s.branch_mispredictions = 1;
    assert!((s.branch_accuracy() - 75.0).abs() < 1e-9);
}

#[test]
fn sections_are_filtered() {
    let s = demo_stats();
    let mut all = String::new();
    s.write_sections(&mut all, &[]).unwrap();
    for heading in ["sim_cycles", "PIPELINE", "INSTRUCTION MIX", "BRANCH PREDICTION"] {
        assert!(all.contains(heading), "missing {heading}");
    }

    let mut branch_only = String::new();
    s.write_sections(&mut branch_only, &["branch".to_string()]).unwrap();
    assert!(branch_only.contains("bp.lookups             0"));
    assert!(!branch_only.contains("PIPELINE"));
    assert!(!branch_only.contains("sim_cycles"));
}

#[test]
fn section_names_are_known() {
    assert_eq!(STATS_SECTIONS, &["summary", "pipeline", "instruction_mix", "branch"]);
}
