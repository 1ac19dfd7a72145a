pub mod assembler;
pub mod emit;
pub mod error;
pub mod label;
pub mod resolver;
pub mod token;

pub use assembler::{assemble, Assembler, Instruction, Program, State, INST_WIDTH};
pub use emit::{write_program, write_symbols};
pub use error::Error;
pub use label::Labels;
pub use resolver::{resolve, Resolved};
pub use token::{Token, TokenKind, TokenReader};
