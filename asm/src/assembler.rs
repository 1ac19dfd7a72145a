use crate::error::Error;
use crate::label::Labels;
use crate::token::{Pos, Token, TokenKind};

/// Bytes occupied by every instruction record
pub const INST_WIDTH: u32 = 4;

// ----------------------------------------------------------------------------
// Instruction record

/// Mnemonic with its operands as raw text. Labels are not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
    pub pos: Pos,
}

/// Everything pass 1 learns about the token stream
#[derive(Debug, Default)]
pub struct Program {
    pub labels: Labels,
    pub instructions: Vec<Instruction>,
}

// ----------------------------------------------------------------------------
// Pass 1

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The next identifier starts a new instruction
    AwaitingInstruction,
    /// Identifiers extend the open instruction
    AccumulatingOperands,
}

#[derive(Debug)]
pub struct Assembler {
    state: State,
    pc: u32,
    program: Program,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            state: State::AwaitingInstruction,
            pc: 0,
            program: Program::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Address the next instruction will be placed at
    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn feed(&mut self, token: Token) -> Result<(), Error> {
        let Token {
            kind,
            payload,
            trailing,
            pos,
        } = token;

        match kind {
            TokenKind::LabelDef => {
                let name = payload.strip_suffix(':').unwrap_or(&payload);
                self.program.labels.define(name.to_string(), self.pc, pos)?;
                self.state = State::AwaitingInstruction;
            }
            TokenKind::Directive => self.open(payload, trailing, pos),
            TokenKind::Identifier => match self.state {
                State::AwaitingInstruction => self.open(payload, trailing, pos),
                State::AccumulatingOperands => self.push(kind, payload, pos)?,
            },
            TokenKind::Register => {
                let reg = payload.strip_prefix('$').unwrap_or(&payload).to_string();
                self.push(kind, reg, pos)?;
            }
            TokenKind::DecimalLiteral => self.push(kind, payload, pos)?,
            TokenKind::HexLiteral => {
                let text = match payload.strip_prefix("0x") {
                    Some(digits) => u32::from_str_radix(digits, 16)
                        .map_err(|_| Error::InvalidOperand {
                            text: payload.clone(),
                            pos,
                        })?
                        .to_string(),
                    None => payload,
                };
                self.push(kind, text, pos)?;
            }
            TokenKind::Comma => {}
            TokenKind::Newline => self.state = State::AwaitingInstruction,
        }
        Ok(())
    }

    pub fn finish(self) -> Program {
        self.program
    }

    fn open(&mut self, mnemonic: String, operands: Vec<String>, pos: Pos) {
        let mnemonic = match mnemonic.as_str() {
            ".word" => "word".to_string(),
            _ => mnemonic,
        };
        self.program.instructions.push(Instruction {
            mnemonic,
            operands,
            pos,
        });
        self.state = State::AccumulatingOperands;
        self.pc = self.pc.wrapping_add(INST_WIDTH);
    }

    fn push(&mut self, kind: TokenKind, operand: String, pos: Pos) -> Result<(), Error> {
        match self.program.instructions.last_mut() {
            Some(inst) => {
                inst.operands.push(operand);
                Ok(())
            }
            None => Err(Error::NoOpenInstruction { kind, pos }),
        }
    }
}

/// Run pass 1 over a whole token stream
pub fn assemble<I>(tokens: I) -> Result<Program, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    let mut asm = Assembler::new();
    for token in tokens {
        asm.feed(token?)?;
    }
    Ok(asm.finish())
}
