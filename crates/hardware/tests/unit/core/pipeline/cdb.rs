//! Common Data Bus Tests.

use pretty_assertions::assert_eq;
use tomasulo_core::common::Tag;
use tomasulo_core::core::pipeline::cdb::{BroadcastReport, broadcast};
use tomasulo_core::core::pipeline::reservation_station::ReservationStation;
use tomasulo_core::core::pipeline::rob::ReorderBuffer;
use tomasulo_core::isa::instruction::Writeback;
use tomasulo_core::isa::opcode::AluOp;

use crate::common::harness::{alu, alu_f, space8, val, wait};

fn wb(tag: u16, value: i32, flags: i32) -> Writeback {
    Writeback {
        tag: Tag(tag),
        value,
        flags,
    }
}

#[test]
fn unknown_tag_is_silent_noop() {
    let mut rs = ReservationStation::new(4, space8());
    let mut rob = ReorderBuffer::new(8);
    assert!(rs.push(&alu(AluOp::Add, 1, wait(0), val(0))));
    assert!(rob.push(AluOp::Add.into(), Tag(1)));

    let report = broadcast(&wb(7, 1, 1), &mut rs, &mut rob);
    assert_eq!(report, BroadcastReport::default());
    assert!(rs.entries().all(|e| !e.is_ready()));
    assert_eq!(rob.lookup(Tag(1)), None);
}

#[test]
fn value_and_flags_go_to_the_right_slots() {
    let mut rs = ReservationStation::new(4, space8());
    let mut rob = ReorderBuffer::new(8);
    assert!(rob.push(AluOp::Sub.into(), Tag(0)));
    assert!(rs.push(&alu(AluOp::Add, 1, wait(0), val(1))));
    assert!(rs.push(&alu_f(AluOp::Add, 2, 0, 0, 0)));

    let report = broadcast(&wb(0, -3, 2), &mut rs, &mut rob);
    assert_eq!(
        report,
        BroadcastReport {
            slots_resolved: 2,
            rob_completed: true
        }
    );

    let a = rs.issue_oldest_ready().unwrap();
    assert_eq!(a.operand_a, -3);
    let b = rs.issue_oldest_ready().unwrap();
    assert_eq!(b.operand_f, 2);
    assert_eq!(rob.retire().map(|e| (e.value, e.flags)), Some((-3, 2)));
}
