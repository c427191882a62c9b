//! Mock collaborators for the step driver.
//!
//! The core talks to the outside world through two traits. These mocks let a
//! test script exactly what fetch hands over and assert on exactly what
//! retirement receives.

use mockall::mock;
use tomasulo_core::core::pipeline::rob::RobEntry;
use tomasulo_core::core::pipeline::traits::{InstructionSource, RetireSink};
use tomasulo_core::isa::instruction::DecodedInstruction;

mock! {
    pub Source {}
    impl InstructionSource for Source {
        fn next_instruction(&mut self) -> Option<DecodedInstruction>;
    }
}

mock! {
    pub Sink {}
    impl RetireSink for Sink {
        fn retire(&mut self, entry: &RobEntry);
    }
}
