use crate::assembler::{Instruction, Program, INST_WIDTH};
use crate::error::Error;
use crate::label::Labels;

/// Conditional branches take a word offset instead of an absolute address
pub const BRANCH_MNEMONICS: [&str; 2] = ["beq", "bne"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub mnemonic: String,
    pub operands: Vec<i32>,
}

/// Run pass 2. Every label is known by now, so forward references resolve
/// the same way as backward ones.
pub fn resolve(program: &Program) -> Result<Vec<Resolved>, Error> {
    let mut pc: u32 = 0;
    let mut resolved = Vec::with_capacity(program.instructions.len());
    for inst in &program.instructions {
        let operands = inst
            .operands
            .iter()
            .map(|op| resolve_operand(inst, op, pc, &program.labels))
            .collect::<Result<Vec<_>, _>>()?;
        resolved.push(Resolved {
            mnemonic: inst.mnemonic.clone(),
            operands,
        });
        pc = pc.wrapping_add(INST_WIDTH);
    }
    Ok(resolved)
}

fn resolve_operand(inst: &Instruction, op: &str, pc: u32, labels: &Labels) -> Result<i32, Error> {
    match labels.get(op) {
        Some(target) if is_branch(&inst.mnemonic) => Ok(displacement(pc, target)),
        Some(target) => Ok(target as i32),
        None => {
            let text = op.strip_prefix('$').unwrap_or(op);
            let text = text.strip_suffix(',').unwrap_or(text);
            parse_literal(text).ok_or_else(|| Error::InvalidOperand {
                text: text.to_string(),
                pos: inst.pos,
            })
        }
    }
}

pub fn is_branch(mnemonic: &str) -> bool {
    BRANCH_MNEMONICS.contains(&mnemonic)
}

/// Words from the instruction after `pc` to `target`
pub fn displacement(pc: u32, target: u32) -> i32 {
    let next = (pc as i32).wrapping_add(INST_WIDTH as i32);
    (target as i32).wrapping_sub(next) / INST_WIDTH as i32
}

// Signed decimal, wrapped to i32
fn parse_literal(text: &str) -> Option<i32> {
    text.parse::<i64>().ok().map(|v| v as i32)
}

#[test]
fn test() {
    assert_eq!(displacement(4, 0), -2);
    assert_eq!(displacement(0, 8), 1);
    assert_eq!(displacement(0, 4), 0);

    assert!(is_branch("beq"));
    assert!(is_branch("bne"));
    assert!(!is_branch("jal"));

    assert_eq!(parse_literal("17"), Some(17));
    assert_eq!(parse_literal("4294967295"), Some(-1));
    assert_eq!(parse_literal("-1"), Some(-1));
    assert_eq!(parse_literal("+8"), Some(8));
    assert_eq!(parse_literal("--1"), None);
    assert_eq!(parse_literal("x"), None);
    assert_eq!(parse_literal(""), None);
}
