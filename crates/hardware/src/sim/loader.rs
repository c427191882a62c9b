//! Program Loader.
//!
//! Reads instruction streams from JSON. It performs:
//! 1. **Parsing:** Deserializes the program file with `serde_json`.
//! 2. **Opcode resolution:** Accepts either a mnemonic (`"add"`, `"bcs"`) or a raw opcode word.
//! 3. **Tag assignment:** Fills in missing tags in program order and checks explicit ones against the tag domain.
//!
//! A program file looks like:
//!
//! ```json
//! {
//!     "instructions": [
//!         { "op": "add", "tag": 0, "a": { "value": 5 }, "b": { "value": 3 } },
//!         { "op": "sub", "a": { "value": 7 }, "b": { "value": 4 }, "f": { "wait": 0 } }
//!     ]
//! }
//! ```
//!
//! Omitted operands are resolved zeros. An omitted tag is the one after the
//! previous instruction's tag, starting from 0.
//!
//! A tag may be reused only once at least half the tag domain's worth of
//! instructions separate the two uses; closer reuse could put both in flight
//! at once and is rejected.
//!
//! An operand may wait on any earlier instruction, however far back. If the
//! producer has already retired by the time the consumer is dispatched, the
//! core resolves the operand from its committed results.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{LoadError, OperandSlot, Tag, TagAllocator, TagSpace};
use crate::isa::instruction::DecodedInstruction;
use crate::isa::opcode::{Opcode, Operation};

use super::program::Program;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProgramFile {
    instructions: Vec<InstructionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstructionRecord {
    op: OpSpec,
    #[serde(default)]
    tag: Option<u32>,
    #[serde(default)]
    a: Option<OperandSpec>,
    #[serde(default)]
    b: Option<OperandSpec>,
    #[serde(default)]
    f: Option<OperandSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpSpec {
    Raw(u32),
    Mnemonic(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OperandSpec {
    Value(i32),
    Wait(u32),
}

fn tag_in(space: TagSpace, index: usize, raw: u32) -> Result<Tag, LoadError> {
    if space.contains(raw) {
        Ok(space.tag(raw))
    } else {
        Err(LoadError::TagOutOfRange {
            index,
            tag: raw,
            bits: space.bits(),
        })
    }
}

fn opcode(index: usize, spec: OpSpec) -> Result<Opcode, LoadError> {
    match spec {
        OpSpec::Raw(raw) => {
            let opcode = Opcode(raw);
            if opcode.decode().is_none() {
                return Err(LoadError::BadOpcode { index, opcode });
            }
            Ok(opcode)
        }
        OpSpec::Mnemonic(mnemonic) => mnemonic
            .parse::<Operation>()
            .map(Opcode::from)
            .map_err(|_| LoadError::UnknownMnemonic { index, mnemonic }),
    }
}

fn operand(space: TagSpace, index: usize, spec: Option<OperandSpec>) -> Result<OperandSlot, LoadError> {
    Ok(match spec {
        None => OperandSlot::ready(0),
        Some(OperandSpec::Value(v)) => OperandSlot::ready(v),
        Some(OperandSpec::Wait(raw)) => OperandSlot::waiting_on(tag_in(space, index, raw)?),
    })
}

/// Parses a JSON program, drawing tags from `space`.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed input, and the matching
/// [`LoadError`] variant for unknown mnemonics, undecodable opcodes, tags
/// outside the domain, or a tag reused too soon.
pub fn parse_program(json: &str, space: TagSpace) -> Result<Program, LoadError> {
    let file: ProgramFile = serde_json::from_str(json)?;
    let mut alloc = TagAllocator::new(space);
    let mut instructions = Vec::with_capacity(file.instructions.len());
    let mut last_use: HashMap<Tag, usize> = HashMap::new();

    for (index, rec) in file.instructions.into_iter().enumerate() {
        let opcode = opcode(index, rec.op)?;
        let tag = match rec.tag {
            Some(raw) => {
                let tag = tag_in(space, index, raw)?;
                alloc = TagAllocator::starting_at(space, raw + 1);
                tag
            }
            None => alloc.allocate(),
        };
        let window = space.window() as usize;
        if let Some(previous) = last_use.get(&tag).copied().filter(|&p| index - p < window) {
            return Err(LoadError::DuplicateTag {
                index,
                tag: u32::from(tag.raw()),
                previous,
            });
        }
        let _ = last_use.insert(tag, index);
        instructions.push(
            DecodedInstruction::new(opcode, tag)
                .with_a(operand(space, index, rec.a)?)
                .with_b(operand(space, index, rec.b)?)
                .with_f(operand(space, index, rec.f)?),
        );
    }
    Ok(Program::new(instructions))
}

/// Reads and parses a JSON program file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise whatever
/// [`parse_program`] reports.
pub fn load_program(path: impl AsRef<Path>, space: TagSpace) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&json, space)
}
