//! Tomasulo step driver.
//!
//! [`Core`] owns the reservation station, reorder buffer, common data bus,
//! and execution units, and advances them one step at a time. Each step runs
//! four phases in a fixed order:
//! 1. **Broadcast:** The result latched on the CDB last step reaches the RS and ROB.
//! 2. **Retire:** At most one complete instruction leaves the ROB, oldest first.
//! 3. **Issue:** The oldest ready RS entry executes and latches its result on the CDB.
//! 4. **Dispatch:** At most one fetched instruction enters both the RS and the ROB.
//!
//! A result produced in step N is therefore visible to consumers in step N+1,
//! and an instruction dispatched in step N can issue no earlier than step N+1.
//!
//! A consumer can reach dispatch after its producer has already broadcast. If
//! the producer is still in the ROB its result is forwarded from there; if it
//! has retired the result comes from the committed-results table.

use std::fmt;

use tracing::{debug, trace};

use crate::common::{ConfigError, CoreError, Tag, TagSpace};
use crate::config::Config;
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchUnit;
use crate::core::units::bru::counter::SaturatingCounter;
use crate::isa::disasm::{disassemble, disassemble_request};
use crate::isa::instruction::{DecodedInstruction, ExecRequest, Writeback};
use crate::isa::opcode::Operation;
use crate::stats::SimStats;

use super::cdb::CommonDataBus;
use super::commit::CommittedResults;
use super::reservation_station::ReservationStation;
use super::rob::ReorderBuffer;
use super::traits::{InstructionSource, RetireSink};

/// Why dispatch held an instruction back this step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchStall {
    /// Every reservation station slot is occupied.
    ReservationStationFull,
    /// The reorder buffer has no free slot.
    ReorderBufferFull,
}

impl fmt::Display for DispatchStall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationStationFull => write!(f, "rs full"),
            Self::ReorderBufferFull => write!(f, "rob full"),
        }
    }
}

/// What happened during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Step number, starting at 1.
    pub cycle: u64,
    /// Tag whose result was broadcast.
    pub broadcast: Option<Tag>,
    /// Tag that retired.
    pub retired: Option<Tag>,
    /// Tag that issued to an execution unit.
    pub issued: Option<Tag>,
    /// Tag that was dispatched.
    pub dispatched: Option<Tag>,
    /// Reason the fetched instruction could not be dispatched.
    pub stall: Option<DispatchStall>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |t: Option<Tag>| t.map_or_else(|| "-".to_string(), |t| t.to_string());
        write!(
            f,
            "cycle {:>4}: broadcast {:<5} retire {:<5} issue {:<5} dispatch {:<5}",
            self.cycle,
            show(self.broadcast),
            show(self.retired),
            show(self.issued),
            show(self.dispatched),
        )?;
        if let Some(stall) = self.stall {
            write!(f, " ({stall})")?;
        }
        Ok(())
    }
}

/// The out-of-order scheduling core.
#[derive(Debug)]
pub struct Core {
    tags: TagSpace,
    rs: ReservationStation,
    rob: ReorderBuffer,
    cdb: CommonDataBus,
    committed: CommittedResults,
    bru: BranchUnit<SaturatingCounter>,
    /// Instruction fetched but not yet accepted by dispatch.
    fetch: Option<DecodedInstruction>,
    trace: bool,
    /// Performance counters.
    pub stats: SimStats,
}

impl Core {
    /// Builds an empty core sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let tags = config.pipeline.tag_space()?;
        let counter = SaturatingCounter::with_state(config.branch_predictor.initial_state)?;
        Ok(Self {
            tags,
            rs: ReservationStation::new(config.pipeline.rs_entries, tags),
            rob: ReorderBuffer::new(config.pipeline.rob_entries),
            cdb: CommonDataBus::new(),
            committed: CommittedResults::new(),
            bru: BranchUnit::new(counter),
            fetch: None,
            trace: config.general.trace,
            stats: SimStats::default(),
        })
    }

    /// Tag domain used for age ordering.
    pub const fn tag_space(&self) -> TagSpace {
        self.tags
    }

    /// The reservation station.
    pub const fn reservation_station(&self) -> &ReservationStation {
        &self.rs
    }

    /// The reorder buffer.
    pub const fn reorder_buffer(&self) -> &ReorderBuffer {
        &self.rob
    }

    /// The common data bus latch.
    pub const fn cdb(&self) -> &CommonDataBus {
        &self.cdb
    }

    /// Results of instructions that have retired.
    pub const fn committed(&self) -> &CommittedResults {
        &self.committed
    }

    /// The branch predictor.
    pub const fn predictor(&self) -> &SaturatingCounter {
        self.bru.predictor()
    }

    /// The fetched instruction waiting for dispatch, if any.
    pub const fn fetch_latch(&self) -> Option<&DecodedInstruction> {
        self.fetch.as_ref()
    }

    /// True when nothing is in flight anywhere in the core.
    pub const fn is_drained(&self) -> bool {
        self.fetch.is_none() && self.rs.is_empty() && self.rob.is_empty() && self.cdb.is_free()
    }

    /// Installs one instruction into the reservation station and reorder buffer.
    ///
    /// Room in both structures is checked before either is touched, so an
    /// instruction is never half-dispatched. Waiting operands whose producer
    /// has already completed are resolved on the way in: from the ROB if the
    /// producer is still in flight, otherwise from the committed results.
    /// Installing the instruction reclaims its tag from the committed results.
    ///
    /// Returns `Ok(None)` once installed, or the stall reason if the
    /// instruction was held back. A held-back instruction can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnrecognizedOpcode`] if no execution unit
    /// recognizes the opcode. Nothing is installed in that case.
    pub fn dispatch(
        &mut self,
        instr: &DecodedInstruction,
    ) -> Result<Option<DispatchStall>, CoreError> {
        if instr.opcode.decode().is_none() {
            return Err(CoreError::UnrecognizedOpcode {
                tag: instr.tag_wb,
                opcode: instr.opcode,
            });
        }
        if self.rs.is_full() {
            self.stats.stalls_rs_full += 1;
            trace!(tag = %instr.tag_wb, "dispatch stalled: rs full");
            return Ok(Some(DispatchStall::ReservationStationFull));
        }
        if self.rob.is_full() {
            self.stats.stalls_rob_full += 1;
            trace!(tag = %instr.tag_wb, "dispatch stalled: rob full");
            return Ok(Some(DispatchStall::ReorderBufferFull));
        }

        let mut instr = *instr;
        let [a, b, f] = instr.operands_mut();
        for (slot, is_flags) in [(a, false), (b, false), (f, true)] {
            if !slot.waiting {
                continue;
            }
            let producer = slot.tag;
            if let Some((value, flags)) = self.rob.lookup(producer) {
                let _ = slot.resolve(producer, if is_flags { flags } else { value });
                self.stats.operands_forwarded += 1;
            } else if let Some((value, flags)) = self.committed.lookup(producer) {
                let _ = slot.resolve(producer, if is_flags { flags } else { value });
                self.stats.operands_committed += 1;
            }
        }

        let in_rob = self.rob.push(instr.opcode, instr.tag_wb);
        let in_rs = self.rs.push(&instr);
        debug_assert!(in_rob && in_rs);
        self.committed.reclaim(instr.tag_wb);
        self.stats.instructions_dispatched += 1;
        debug!(tag = %instr.tag_wb, inst = %disassemble(&instr), "dispatch");
        Ok(None)
    }

    /// Runs the execution unit for an already-decoded operation.
    fn execute(&mut self, operation: Operation, req: &ExecRequest) -> Writeback {
        let (value, flags) = match operation {
            Operation::Alu(op) => {
                self.stats.inst_alu += 1;
                Alu::execute(op, req.operand_a, req.operand_b)
            }
            Operation::Branch(cond) => {
                self.stats.inst_branch += 1;
                let outcome = self.bru.resolve(cond, req.operand_f);
                if outcome.mispredicted() {
                    self.stats.branch_mispredictions += 1;
                } else {
                    self.stats.branch_predictions += 1;
                }
                debug!(
                    tag = %req.tag,
                    predicted = outcome.predicted,
                    taken = outcome.taken,
                    "branch resolved"
                );
                (i32::from(outcome.taken), 0)
            }
        };
        Writeback {
            tag: req.tag,
            value,
            flags,
        }
    }

    /// Advances the core by one step.
    ///
    /// The fetch latch is refilled from `source` only when it is empty, so a
    /// stalled instruction is retried on later steps without being fetched
    /// again. Every retired entry is handed to `sink` in program order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnrecognizedOpcode`] if the fetched instruction's
    /// opcode does not decode. The instruction is dropped from the fetch latch.
    /// The same error is returned, with the reservation station left as it
    /// was, if an undecodable entry is ever selected for issue.
    pub fn step<S, R>(&mut self, source: &mut S, sink: &mut R) -> Result<StepReport, CoreError>
    where
        S: InstructionSource + ?Sized,
        R: RetireSink + ?Sized,
    {
        self.stats.cycles += 1;
        let mut report = StepReport {
            cycle: self.stats.cycles,
            ..StepReport::default()
        };

        if let Some((wb, bus)) = self.cdb.drive(&mut self.rs, &mut self.rob) {
            self.stats.broadcasts += 1;
            self.stats.operands_woken += bus.slots_resolved as u64;
            report.broadcast = Some(wb.tag);
        }

        if let Some(entry) = self.rob.retire() {
            self.committed.commit(entry.tag, entry.value, entry.flags);
            sink.retire(&entry);
            self.stats.instructions_retired += 1;
            debug!(tag = %entry.tag, value = entry.value, flags = entry.flags, "retire");
            report.retired = Some(entry.tag);
        } else if !self.rob.is_empty() {
            self.stats.stalls_retire += 1;
        }

        // Decode before the slot is freed, so a failure leaves the RS untouched.
        let operation = self
            .rs
            .peek_oldest_ready()
            .map(|entry| {
                entry.opcode.decode().ok_or(CoreError::UnrecognizedOpcode {
                    tag: entry.tag_wb,
                    opcode: entry.opcode,
                })
            })
            .transpose()?;
        if let Some((operation, req)) = operation.zip(self.rs.issue_oldest_ready()) {
            debug!(tag = %req.tag, op = %disassemble_request(&req), "issue");
            let wb = self.execute(operation, &req);
            let latched = self.cdb.set(wb);
            debug_assert!(latched, "cdb drained at the start of the step");
            self.stats.instructions_issued += 1;
            report.issued = Some(req.tag);
        } else {
            self.stats.issue_idle += 1;
        }

        if self.fetch.is_none() {
            self.fetch = source.next_instruction();
        }
        if let Some(instr) = self.fetch.take() {
            match self.dispatch(&instr)? {
                None => report.dispatched = Some(instr.tag_wb),
                Some(stall) => {
                    self.fetch = Some(instr);
                    report.stall = Some(stall);
                }
            }
        }

        if self.trace {
            debug!(cycle = report.cycle, "\n{}{}", self.rs, self.cdb);
        }
        Ok(report)
    }
}
