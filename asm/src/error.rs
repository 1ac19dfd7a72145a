use crate::token::{Pos, TokenKind};
use color_print::ceprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Re-defined label: `{name}` (first defined at line {})", .first.line)]
    DuplicateLabel { name: String, pos: Pos, first: Pos },

    #[error("`{kind}` operand outside of any instruction")]
    NoOpenInstruction { kind: TokenKind, pos: Pos },

    #[error("Cannot parse `{text}` as operand")]
    InvalidOperand { text: String, pos: Pos },

    #[error("Failed to open file: {0}: {1}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}: {1}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}: {1}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}: {1}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::DuplicateLabel { pos, .. }
            | Error::NoOpenInstruction { pos, .. }
            | Error::InvalidOperand { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Print error as a single diagnostic line, prefixed with the input location if known
    pub fn print_diag(&self, source: &str) {
        match self.pos() {
            Some(pos) => ceprintln!(
                "<red,bold>error</>: <underline>{}:{}</>: {}",
                source,
                pos.line,
                self
            ),
            None => ceprintln!("<red,bold>error</>: {}", self),
        }
    }
}
