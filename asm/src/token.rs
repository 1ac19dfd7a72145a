use crate::error::Error;
use std::io::BufRead;
use strum::{Display, EnumString};

// ----------------------------------------------------------------------------
// Token

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: String,
    /// Fields after the payload on the same record
    pub trailing: Vec<String>,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum TokenKind {
    #[strum(serialize = "LABEL")]
    LabelDef,
    #[strum(serialize = "DIRECTIVE")]
    Directive,
    #[strum(serialize = "ID")]
    Identifier,
    #[strum(serialize = "REG")]
    Register,
    #[strum(serialize = "DEC")]
    DecimalLiteral,
    #[strum(serialize = "HEXINT")]
    HexLiteral,
    #[strum(serialize = "COMMA")]
    Comma,
    #[strum(serialize = "NEWLINE")]
    Newline,
}

/// 1-based line of the record in the token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
}

impl TokenKind {
    fn needs_payload(self) -> bool {
        !matches!(self, TokenKind::Comma | TokenKind::Newline)
    }
}

impl Token {
    /// Decode one record. Blank and malformed records yield `None`.
    pub fn parse(raw: &str, line: usize) -> Option<Token> {
        let mut words = raw.split_whitespace();
        let kind = words.next()?.parse::<TokenKind>().ok()?;
        let payload = match words.next() {
            Some(word) => word.to_string(),
            None if kind.needs_payload() => return None,
            None => String::new(),
        };
        Some(Token {
            kind,
            payload,
            trailing: words.map(str::to_string).collect(),
            pos: Pos { line },
        })
    }
}

// ----------------------------------------------------------------------------
// Reader

pub struct TokenReader<R> {
    input: R,
    name: String,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        TokenReader {
            input,
            name: "<stdin>".to_string(),
            line: 0,
            buf: vec![],
        }
    }

    /// Name reported when reading fails
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.input.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(err) => return Some(Err(Error::FileRead(self.name.clone(), err))),
            }
            // Records that are not UTF-8 are malformed and skipped
            let Ok(raw) = std::str::from_utf8(&self.buf) else {
                continue;
            };
            if let Some(token) = Token::parse(raw, self.line) {
                return Some(Ok(token));
            }
        }
    }
}

#[test]
fn test() {
    use TokenKind::*;

    let tok = Token::parse("LABEL loop:", 3).unwrap();
    assert_eq!(tok.kind, LabelDef);
    assert_eq!(tok.payload, "loop:");
    assert_eq!(tok.pos.line, 3);

    let tok = Token::parse("  NEWLINE  ", 1).unwrap();
    assert_eq!(tok.kind, Newline);
    assert_eq!(tok.payload, "");

    let tok = Token::parse("DIRECTIVE .word 5 6", 1).unwrap();
    assert_eq!(tok.payload, ".word");
    assert_eq!(tok.trailing, vec!["5", "6"]);

    assert_eq!(TokenKind::HexLiteral.to_string(), "HEXINT");

    assert!(Token::parse("", 1).is_none());
    assert!(Token::parse("   ", 1).is_none());
    assert!(Token::parse("REG", 1).is_none());
    assert!(Token::parse("STRING hello", 1).is_none());
}

#[test]
fn reader_skips_blank_records() {
    let input = "ID add\n\nREG $1\nbogus\nNEWLINE\n";
    let tokens: Vec<Token> = TokenReader::new(input.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Identifier, TokenKind::Register, TokenKind::Newline]
    );
    assert_eq!(tokens[1].pos.line, 3);
    assert_eq!(tokens[2].pos.line, 5);
}

#[test]
fn reader_skips_non_utf8_records() {
    let input: &[u8] = b"ID add\nREG $1\nID \xff\xfe\nNEWLINE\n";
    let tokens: Vec<Token> = TokenReader::new(input)
        .collect::<Result<_, _>>()
        .unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Identifier, TokenKind::Register, TokenKind::Newline]
    );
    assert_eq!(tokens[2].pos.line, 4);
}
