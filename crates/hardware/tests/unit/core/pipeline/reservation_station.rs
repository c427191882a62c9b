//! Reservation Station Tests.
//!
//! Covers capacity backpressure, oldest-ready selection by tag (not slot),
//! selection across a tag wraparound, and multi-consumer broadcast wakeup.

use pretty_assertions::assert_eq;
use tomasulo_core::common::Tag;
use tomasulo_core::core::pipeline::reservation_station::ReservationStation;
use tomasulo_core::isa::instruction::DecodedInstruction;
use tomasulo_core::isa::opcode::{AluOp, Opcode};

use crate::common::harness::{alu, alu_f, space, space8, val, wait};

fn rs() -> ReservationStation {
    ReservationStation::new(4, space8())
}

#[test]
fn push_fills_distinct_slots_then_rejects() {
    let mut rs = rs();
    for t in 0..4 {
        assert!(rs.push(&alu(AluOp::Add, t, val(1), val(2))));
        assert_eq!(rs.occupied(), usize::from(t) + 1);
    }
    assert!(rs.is_full());

    let before: Vec<_> = rs.slots().to_vec();
    assert!(!rs.push(&alu(AluOp::Add, 9, val(0), val(0))));
    assert_eq!(rs.slots(), before.as_slice());

    let mut tags: Vec<u16> = rs.entries().map(|e| e.tag_wb.raw()).collect();
    tags.sort_unstable();
    assert_eq!(tags, vec![0, 1, 2, 3]);
}

#[test]
fn push_copies_operands_verbatim() {
    let mut rs = rs();
    let inst = alu(AluOp::Sub, 5, wait(2), val(-4)).with_f(wait(3));
    assert!(rs.push(&inst));
    let e = rs.entries().next().unwrap();
    assert_eq!(e.operand_a, wait(2));
    assert_eq!(e.operand_b, val(-4));
    assert_eq!(e.operand_f, wait(3));
    assert!(!e.is_ready());
}

#[test]
fn nothing_ready_returns_none() {
    let mut rs = rs();
    assert!(rs.issue_oldest_ready().is_none());
    assert!(rs.push(&alu(AluOp::Add, 1, wait(0), val(0))));
    assert!(rs.issue_oldest_ready().is_none());
    assert_eq!(rs.occupied(), 1);
}

#[test]
fn oldest_by_tag_not_by_slot() {
    let mut rs = rs();
    // Slot 0 gets the youngest tag.
    assert!(rs.push(&alu(AluOp::Add, 7, val(0), val(0))));
    assert!(rs.push(&alu(AluOp::Add, 5, val(0), val(0))));
    assert!(rs.push(&alu(AluOp::Add, 6, val(0), val(0))));

    let order: Vec<u16> = std::iter::from_fn(|| rs.issue_oldest_ready())
        .map(|r| r.tag.raw())
        .collect();
    assert_eq!(order, vec![5, 6, 7]);
    assert!(rs.is_empty());
}

#[test]
fn oldest_across_wraparound() {
    let mut rs = ReservationStation::new(4, space(4));
    // Allocation order was 14, 15, 0, 1.
    for t in [1, 0, 15, 14] {
        assert!(rs.push(&alu(AluOp::Or, t, val(0), val(0))));
    }
    let order: Vec<u16> = std::iter::from_fn(|| rs.issue_oldest_ready())
        .map(|r| r.tag.raw())
        .collect();
    assert_eq!(order, vec![14, 15, 0, 1]);
}

#[test]
fn freed_slot_is_reused() {
    let mut rs = rs();
    for t in 0..4 {
        assert!(rs.push(&alu(AluOp::Add, t, val(0), val(0))));
    }
    let issued = rs.issue_oldest_ready().unwrap();
    assert_eq!(issued.tag, Tag(0));
    assert!(rs.push(&alu(AluOp::Add, 4, val(0), val(0))));
    assert_eq!(rs.slots()[0].tag_wb, Tag(4));
}

#[test]
fn broadcast_wakes_every_consumer() {
    let mut rs = rs();
    assert!(rs.push(&alu(AluOp::Add, 1, wait(0), wait(0))));
    assert!(rs.push(&alu_f(AluOp::Sub, 2, 9, 9, 0)));
    assert!(rs.push(&alu(AluOp::Xor, 3, wait(1), val(0))));

    assert_eq!(rs.broadcast(Tag(0), 42, 3), 3);

    let by_tag = |t: u16| *rs.entries().find(|e| e.tag_wb == Tag(t)).unwrap();
    assert_eq!(by_tag(1).operand_a.get(), Some(42));
    assert_eq!(by_tag(1).operand_b.get(), Some(42));
    assert_eq!(by_tag(2).operand_f.get(), Some(3));
    assert!(by_tag(1).is_ready());
    assert!(by_tag(2).is_ready());
    assert!(!by_tag(3).is_ready());

    // Re-broadcasting resolves nothing new.
    assert_eq!(rs.broadcast(Tag(0), 99, 99), 0);
    let first = rs.entries().find(|e| e.tag_wb == Tag(1)).unwrap();
    assert_eq!(first.operand_a.get(), Some(42));
}

#[test]
fn broadcast_then_issue_in_listing_order() {
    // Dispatch in listing order A(0), B(2), C(1): B waits on C, C waits on A.
    let mut rs = rs();
    assert!(rs.push(&alu(AluOp::Add, 0, val(5), val(3))));
    assert!(rs.push(&alu_f(AluOp::Sub, 2, 11, 5, 1)));
    assert!(rs.push(&alu_f(AluOp::Sub, 1, 7, 4, 0)));

    let a = rs.issue_oldest_ready().unwrap();
    assert_eq!(a.tag, Tag(0));
    assert!(rs.issue_oldest_ready().is_none());

    assert_eq!(rs.broadcast(Tag(0), 8, 0), 1);
    let c = rs.issue_oldest_ready().unwrap();
    assert_eq!((c.tag, c.operand_a, c.operand_b), (Tag(1), 7, 4));

    assert_eq!(rs.broadcast(Tag(1), 3, 0), 1);
    let b = rs.issue_oldest_ready().unwrap();
    assert_eq!((b.tag, b.operand_a, b.operand_b), (Tag(2), 11, 5));
}

#[test]
fn display_lists_every_slot() {
    let mut rs = ReservationStation::new(2, space8());
    assert!(rs.push(&alu(AluOp::Add, 0, val(1), wait(3))));
    let text = rs.to_string();
    assert!(text.contains("rs[0] [0] := 0x06000000 a=1 b=wait[3] f=0"));
    assert!(text.contains("rs[1] free"));
}

#[test]
fn peek_selects_without_freeing() {
    let mut rs = rs();
    assert!(rs.peek_oldest_ready().is_none());
    // The station does not decode; an undecodable entry is selected like any other.
    let bad = DecodedInstruction::new(Opcode(0x0100_0000), Tag(3));
    assert!(rs.push(&bad));
    assert!(rs.push(&alu(AluOp::Add, 4, val(0), val(0))));

    let peeked = *rs.peek_oldest_ready().unwrap();
    assert_eq!(peeked.tag_wb, Tag(3));
    assert_eq!(peeked.opcode, Opcode(0x0100_0000));
    assert_eq!(rs.occupied(), 2);

    assert_eq!(rs.issue_oldest_ready().unwrap().tag, peeked.tag_wb);
    assert_eq!(rs.occupied(), 1);
}
