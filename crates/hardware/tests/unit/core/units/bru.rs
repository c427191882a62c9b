//! Branch Predictor Tests.
//!
//! Verifies the 2-bit saturating counter and the branch unit that wraps it.
//! The counter is also exercised through a mock to check that the branch unit
//! reads the prediction before it trains.

use mockall::Sequence;
use mockall::mock;
use tomasulo_core::common::ConfigError;
use tomasulo_core::core::units::bru::counter::SaturatingCounter;
use tomasulo_core::core::units::bru::{BranchPredictor, BranchUnit};
use tomasulo_core::isa::opcode::BranchCondition;
use tomasulo_core::isa::opcodes::FLAG_CARRY_OUT;

mock! {
    Predictor {}
    impl BranchPredictor for Predictor {
        fn predict(&self) -> bool;
        fn update(&mut self, taken: bool);
    }
}

fn train(bp: &mut SaturatingCounter, taken: bool, n: usize) {
    for _ in 0..n {
        bp.update(taken);
    }
}

#[test]
fn starts_not_taken_and_saturates_up() {
    let mut bp = SaturatingCounter::new();
    assert!(!bp.predict());
    train(&mut bp, true, 3);
    assert_eq!(bp.state(), 3);
    assert!(bp.predict());
    train(&mut bp, true, 5);
    assert_eq!(bp.state(), 3);
}

#[test]
fn returns_to_zero_and_saturates_down() {
    let mut bp = SaturatingCounter::with_state(3).unwrap();
    train(&mut bp, false, 3);
    assert_eq!(bp.state(), 0);
    assert!(!bp.predict());
    train(&mut bp, false, 2);
    assert_eq!(bp.state(), 0);
}

#[test]
fn hysteresis_survives_one_anomaly() {
    let mut bp = SaturatingCounter::with_state(3).unwrap();
    bp.update(false);
    assert!(bp.predict());
    bp.update(false);
    assert!(!bp.predict());
}

#[test]
fn rejects_out_of_range_state() {
    assert_eq!(
        SaturatingCounter::with_state(4),
        Err(ConfigError::PredictorState(4))
    );
}

#[test]
fn branch_unit_reports_prediction_and_outcome() {
    let bcs = BranchCondition {
        mask: FLAG_CARRY_OUT,
        invert: false,
    };
    let mut unit = BranchUnit::new(SaturatingCounter::with_state(2).unwrap());

    let miss = unit.resolve(bcs, 0);
    assert!(miss.predicted);
    assert!(!miss.taken);
    assert!(miss.mispredicted());
    assert_eq!(unit.predictor().state(), 1);

    let late = unit.resolve(BranchCondition::ALWAYS, 0);
    assert!(late.taken);
    assert!(late.mispredicted());
    assert_eq!(unit.predictor().state(), 2);
}

#[test]
fn branch_unit_predicts_before_training() {
    let mut seq = Sequence::new();
    let mut predictor = MockPredictor::new();
    let _ = predictor
        .expect_predict()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(true);
    let _ = predictor
        .expect_update()
        .withf(|taken| *taken)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut unit = BranchUnit::new(predictor);
    let outcome = unit.resolve(BranchCondition::ALWAYS, 0);
    assert!(!outcome.mispredicted());
}
