use tokasm::{assemble, resolve, write_program, write_symbols, Error, TokenReader};

fn run(code: &str) -> Result<(String, String), Error> {
    let program = assemble(TokenReader::new(code.as_bytes()))?;
    let mut symbols = vec![];
    write_symbols(&mut symbols, &program.labels).unwrap();
    let resolved = resolve(&program)?;
    let mut out = vec![];
    write_program(&mut out, &resolved).unwrap();
    Ok((
        String::from_utf8(symbols).unwrap(),
        String::from_utf8(out).unwrap(),
    ))
}

fn case(code: &str, symbols: &str, program: &str) {
    for (idx, line) in code.lines().enumerate() {
        println!("{:>2}: {}", idx + 1, line);
    }
    let (got_symbols, got_program) = run(code).unwrap();
    println!("{}", got_symbols);
    println!("{}", got_program);
    assert_eq!(got_symbols, symbols);
    assert_eq!(got_program, program);
}

macro_rules! case {
    ($name:ident, $code:expr, $symbols:expr, $program:expr) => {
        #[test]
        fn $name() {
            case($code, $symbols, $program);
        }
    };
}

case!(
    backward_branch,
    "LABEL loop:
DIRECTIVE add
REG $1
COMMA
REG $2
COMMA
DEC 3
NEWLINE
DIRECTIVE beq
REG $1
COMMA
REG $2
COMMA
ID loop
NEWLINE
",
    "loop 0\n",
    "add 1 2 3\nbeq 1 2 65534\n"
);

case!(
    hex_word,
    "DIRECTIVE .word
HEXINT 0x10
NEWLINE
",
    "",
    "word 16 0 0\n"
);

case!(
    forward_branch,
    "ID bne
REG $4
REG $0
ID done
NEWLINE
ID add
REG $1
REG $1
REG $1
NEWLINE
LABEL done:
ID jr
REG $31
NEWLINE
",
    "done 8\n",
    "bne 4 0 1\nadd 1 1 1\njr 31 0 0\n"
);

// Non-branch label operands are absolute addresses
case!(
    absolute_label,
    "ID lis
REG $3
NEWLINE
DIRECTIVE .word
ID data
NEWLINE
LABEL data:
DIRECTIVE .word
DEC 99
NEWLINE
",
    "data 8\n",
    "lis 3 0 0\nword 8 0 0\nword 99 0 0\n"
);

// A branch to itself sits one word behind the next instruction
case!(
    self_branch,
    "ID nop
NEWLINE
LABEL spin:
ID beq
REG $0
REG $0
ID spin
NEWLINE
",
    "spin 4\n",
    "nop 0 0 0\nbeq 0 0 65535\n"
);

// Several labels at one address keep discovery order
case!(
    label_order,
    "LABEL zeta:
LABEL alpha:
ID nop
NEWLINE
LABEL mid:
ID nop
NEWLINE
",
    "zeta 0\nalpha 0\nmid 4\n",
    "nop 0 0 0\nnop 0 0 0\n"
);

// A label ends the instruction just like a newline does
case!(
    label_breaks_instruction,
    "ID jr
REG $31
LABEL next:
ID jr
REG $31
",
    "next 4\n",
    "jr 31 0 0\njr 31 0 0\n"
);

case!(
    blank_and_unknown_records,
    "
ID add
STRING ignored

REG $1
NEWLINE
",
    "",
    "add 1 0 0\n"
);

#[test]
fn duplicate_label() {
    let code = "LABEL a:\nID nop\nNEWLINE\nLABEL a:\n";
    match run(code) {
        Err(Error::DuplicateLabel { name, pos, first }) => {
            assert_eq!(name, "a");
            assert_eq!(pos.line, 4);
            assert_eq!(first.line, 1);
        }
        other => panic!("expected duplicate label, got {:?}", other),
    }
}

#[test]
fn undefined_label_is_invalid_operand() {
    let code = "ID nop\nNEWLINE\nID beq\nREG $1\nREG $2\nID nowhere\nNEWLINE\n";
    match run(code) {
        Err(Error::InvalidOperand { text, pos }) => {
            assert_eq!(text, "nowhere");
            assert_eq!(pos.line, 3);
        }
        other => panic!("expected invalid operand, got {:?}", other),
    }
}

#[test]
fn register_before_instruction() {
    let code = "REG $1\nID add\n";
    assert!(matches!(
        run(code),
        Err(Error::NoOpenInstruction { .. })
    ));
}

#[test]
fn literal_sigil_and_separator_stripped() {
    // Operands carried on the instruction record itself keep their raw text
    let code = "DIRECTIVE add $1, $2, 3\nNEWLINE\n";
    let (_, program) = run(code).unwrap();
    assert_eq!(program, "add 1 2 3\n");
}

// Signed literals wrap into the 16-bit field like resolved displacements
case!(
    negative_literal_offset,
    "ID beq
REG $1
COMMA
REG $2
COMMA
DEC -2
NEWLINE
",
    "",
    "beq 1 2 65534\n"
);
