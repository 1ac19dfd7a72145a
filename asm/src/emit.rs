use crate::label::Labels;
use crate::resolver::Resolved;
use std::fmt;
use std::io::{self, Write};

/// Operand fields per emitted record
pub const ARITY: usize = 3;

/// Added once to negative operands to fit the 16-bit immediate field.
/// Not a general modulo: values below -65536 stay negative.
pub const FIELD_MODULUS: i64 = 1 << 16;

pub fn normalize(value: i32) -> i64 {
    if value < 0 {
        value as i64 + FIELD_MODULUS
    } else {
        value as i64
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for op in &self.operands {
            write!(f, " {}", normalize(*op))?;
        }
        for _ in self.operands.len()..ARITY {
            write!(f, " 0")?;
        }
        Ok(())
    }
}

/// One `<mnemonic> <op1> <op2> <op3>` line per instruction
pub fn write_program<W: Write + ?Sized>(out: &mut W, program: &[Resolved]) -> io::Result<usize> {
    let mut count = 0;
    for inst in program.iter().filter(|inst| !inst.mnemonic.is_empty()) {
        writeln!(out, "{}", inst)?;
        count += 1;
    }
    Ok(count)
}

/// One `<name> <address>` line per label, in discovery order
pub fn write_symbols<W: Write + ?Sized>(out: &mut W, labels: &Labels) -> io::Result<()> {
    for (name, addr) in labels.iter() {
        writeln!(out, "{} {}", name, addr)?;
    }
    Ok(())
}

#[test]
fn test() {
    assert_eq!(normalize(-2), 65534);
    assert_eq!(normalize(-1), 65535);
    assert_eq!(normalize(0), 0);
    assert_eq!(normalize(70000), 70000);

    let inst = |mnemonic: &str, operands: Vec<i32>| Resolved {
        mnemonic: mnemonic.to_string(),
        operands,
    };
    assert_eq!(inst("beq", vec![1, 2, -2]).to_string(), "beq 1 2 65534");
    assert_eq!(inst("word", vec![16]).to_string(), "word 16 0 0");
    assert_eq!(inst("jr", vec![]).to_string(), "jr 0 0 0");
    assert_eq!(inst("x", vec![1, 2, 3, 4]).to_string(), "x 1 2 3 4");

    let mut out = vec![];
    let count = write_program(&mut out, &[inst("", vec![1]), inst("add", vec![1, 2, 3])]).unwrap();
    assert_eq!(count, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "add 1 2 3\n");
}
