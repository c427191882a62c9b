//! Simulator Run Loop Tests.

use pretty_assertions::assert_eq;
use tomasulo_core::common::SimError;
use tomasulo_core::config::Config;
use tomasulo_core::isa::opcode::AluOp;
use tomasulo_core::sim::loader::parse_program;
use tomasulo_core::{Program, Simulator};

use crate::common::harness::{alu, init_tracing, val, wait};

#[test]
fn demo_runs_in_five_cycles() {
    init_tracing();
    let mut sim = Simulator::new(&Config::default(), Program::demo()).unwrap();
    let mut steps = Vec::new();
    let cycles = sim.run_with(|r| steps.push(r.cycle)).unwrap();
    assert_eq!(cycles, 5);
    assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    assert!(sim.is_finished());

    let retired: Vec<(u16, i32)> = sim.retired.iter().map(|e| (e.tag.raw(), e.value)).collect();
    assert_eq!(retired, vec![(0, 8), (1, 3), (2, 6)]);
}

#[test]
fn empty_program_finishes_immediately() {
    let mut sim = Simulator::new(&Config::default(), Program::default()).unwrap();
    assert_eq!(sim.run(), Ok(0));
}

#[test]
fn hang_hits_cycle_limit() {
    let mut config = Config::default();
    config.general.max_cycles = 25;
    // Waits on a tag no instruction produces.
    let program = Program::new(vec![alu(AluOp::Add, 0, wait(9), val(1))]);
    let mut sim = Simulator::new(&config, program).unwrap();
    assert_eq!(sim.run(), Err(SimError::CycleLimit { cycles: 25 }));
}

#[test]
fn trace_mode_runs_the_same_program() {
    let mut config = Config::default();
    config.general.trace = true;
    init_tracing();
    let mut sim = Simulator::new(&config, Program::demo()).unwrap();
    assert_eq!(sim.run(), Ok(5));
}

#[test]
fn dependency_two_back_completes() {
    let json = r#"{ "instructions": [
        { "op": "add", "a": { "value": 5 }, "b": { "value": 3 } },
        { "op": "add", "a": { "value": 1 }, "b": { "value": 1 } },
        { "op": "add", "a": { "wait": 0 }, "b": { "value": 1 } }
    ] }"#;
    let mut config = Config::default();
    config.general.max_cycles = 200;
    let program = parse_program(json, config.pipeline.tag_space().unwrap()).unwrap();
    let mut sim = Simulator::new(&config, program).unwrap();
    assert_eq!(sim.run(), Ok(5));

    let retired: Vec<(u16, i32)> = sim.retired.iter().map(|e| (e.tag.raw(), e.value)).collect();
    assert_eq!(retired, vec![(0, 8), (1, 2), (2, 9)]);
}
