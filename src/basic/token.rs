//! Tokenizer: turns source text into a sequence of `Token`s.
//!
//! Whitespace (other than newline) is skipped; newlines are tokens so the
//! parser can recover line-number context without a separate pass.

use crate::error::{EngineError, EngineResult, SourcePos};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    IntegerLiteral(i64),
    String(String),
    Identifier(String),
    Keyword(Keyword),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Colon,
    Newline,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Then,
    Else,
    Endif,
    For,
    To,
    Step,
    Next,
    While,
    Wend,
    Do,
    Loop,
    Until,
    Goto,
    Gosub,
    Return,
    On,
    Let,
    Dim,
    Print,
    Input,
    Read,
    Data,
    Restore,
    Open,
    Close,
    Def,
    Fn,
    Rem,
    And,
    Or,
    Not,
    Mod,
    End,
    Stop,
    Left,
    Right,
    Mid,
    Chr,
    Str,
}

impl Keyword {
    fn from_str(s: &str) -> Option<Keyword> {
        use Keyword::*;
        Some(match s {
            "IF" => If,
            "THEN" => Then,
            "ELSE" => Else,
            "ENDIF" => Endif,
            "FOR" => For,
            "TO" => To,
            "STEP" => Step,
            "NEXT" => Next,
            "WHILE" => While,
            "WEND" => Wend,
            "DO" => Do,
            "LOOP" => Loop,
            "UNTIL" => Until,
            "GOTO" => Goto,
            "GOSUB" => Gosub,
            "RETURN" => Return,
            "ON" => On,
            "LET" => Let,
            "DIM" => Dim,
            "PRINT" => Print,
            "INPUT" => Input,
            "READ" => Read,
            "DATA" => Data,
            "RESTORE" => Restore,
            "OPEN" => Open,
            "CLOSE" => Close,
            "DEF" => Def,
            "FN" => Fn,
            "REM" => Rem,
            "AND" => And,
            "OR" => Or,
            "NOT" => Not,
            "MOD" => Mod,
            "END" => End,
            "STOP" => Stop,
            "LEFT$" => Left,
            "RIGHT$" => Right,
            "MID$" => Mid,
            "CHR$" => Chr,
            "STR$" => Str,
            _ => return None,
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: SourcePos,
}

pub struct Tokenizer<'a> {
    src: &'a [u8],
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.offset + ahead).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.offset += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    /// Tokenizes the full input in one pass (the sequence is logically lazy
    /// per-token, but collecting it up front is simplest for a batch parser).
    pub fn tokenize(mut self) -> EngineResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_non_newline_whitespace();
            let pos = self.pos();
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    pos,
                });
                break;
            };
            match c {
                b'\n' => {
                    self.advance();
                    tokens.push(Token {
                        kind: TokenKind::Newline,
                        pos,
                    });
                }
                b'\'' => {
                    self.skip_to_eol();
                }
                b'0'..=b'9' | b'.' => {
                    tokens.push(self.read_number(pos)?);
                }
                b'"' => {
                    tokens.push(self.read_string(pos)?);
                }
                c if c.is_ascii_alphabetic() => {
                    tokens.push(self.read_word(pos)?);
                }
                _ => {
                    tokens.push(self.read_operator(pos)?);
                }
            }
        }
        Ok(tokens)
    }

    fn skip_non_newline_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == b' ' || c == b'\t' || c == b'\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_to_eol(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_number(&mut self, pos: SourcePos) -> EngineResult<Token> {
        let start = self.offset;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == b'.' && !is_float {
                is_float = true;
                self.advance();
            } else {
                break;
            }
        }
        if let Some(b'E') | Some(b'e') = self.peek() {
            is_float = true;
            self.advance();
            if let Some(b'+') | Some(b'-') = self.peek() {
                self.advance();
            }
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.offset]).unwrap();
        if is_float {
            let value: f64 = text.parse().map_err(|_| EngineError::SyntaxError {
                line: pos.line,
                column: pos.column,
                expected: "number".into(),
                got: text.into(),
            })?;
            Ok(Token {
                kind: TokenKind::Number(value),
                pos,
            })
        } else {
            let value: i64 = text.parse().map_err(|_| EngineError::SyntaxError {
                line: pos.line,
                column: pos.column,
                expected: "integer".into(),
                got: text.into(),
            })?;
            Ok(Token {
                kind: TokenKind::IntegerLiteral(value),
                pos,
            })
        }
    }

    fn read_string(&mut self, pos: SourcePos) -> EngineResult<Token> {
        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(b'\n') | None => {
                    return Err(EngineError::UnterminatedString {
                        line: pos.line,
                        column: pos.column,
                    })
                }
                Some(c) => {
                    s.push(c as char);
                    self.advance();
                }
            }
        }
        Ok(Token {
            kind: TokenKind::String(s),
            pos,
        })
    }

    fn read_word(&mut self, pos: SourcePos) -> EngineResult<Token> {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }
        if let Some(c @ (b'$' | b'%')) = self.peek() {
            self.advance();
            let _ = c;
        }
        let text = std::str::from_utf8(&self.src[start..self.offset])
            .unwrap()
            .to_ascii_uppercase();
        if text == "REM" {
            self.skip_to_eol();
            return Ok(Token {
                kind: TokenKind::Keyword(Keyword::Rem),
                pos,
            });
        }
        if let Some(kw) = Keyword::from_str(&text) {
            return Ok(Token {
                kind: TokenKind::Keyword(kw),
                pos,
            });
        }
        Ok(Token {
            kind: TokenKind::Identifier(text),
            pos,
        })
    }

    fn read_operator(&mut self, pos: SourcePos) -> EngineResult<Token> {
        let c = self.advance().unwrap();
        let kind = match c {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'=' => TokenKind::Equal,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'<' => match self.peek() {
                Some(b'>') => {
                    self.advance();
                    TokenKind::NotEqual
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::LessEqual
                }
                _ => TokenKind::Less,
            },
            b'>' => match self.peek() {
                Some(b'=') => {
                    self.advance();
                    TokenKind::GreaterEqual
                }
                _ => TokenKind::Greater,
            },
            other => {
                return Err(EngineError::SyntaxError {
                    line: pos.line,
                    column: pos.column,
                    expected: "operator".into(),
                    got: (other as char).to_string(),
                })
            }
        };
        Ok(Token { kind, pos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Tokenizer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_a_numbered_statement() {
        let k = kinds("10 LET X = 5\n");
        assert_eq!(
            k,
            vec![
                TokenKind::IntegerLiteral(10),
                TokenKind::Keyword(Keyword::Let),
                TokenKind::Identifier("X".into()),
                TokenKind::Equal,
                TokenKind::IntegerLiteral(5),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_suffixed_identifier_is_canonical() {
        let k = kinds("A$");
        assert_eq!(k[0], TokenKind::Identifier("A$".into()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Tokenizer::new("PRINT \"HELLO").tokenize();
        assert!(matches!(err, Err(EngineError::UnterminatedString { .. })));
    }

    #[test]
    fn scientific_notation_number() {
        let k = kinds("1.5E+2");
        assert_eq!(k[0], TokenKind::Number(150.0));
    }

    #[test]
    fn dollar_function_name_is_single_keyword() {
        let k = kinds("LEFT$(A$,3)");
        assert_eq!(k[0], TokenKind::Keyword(Keyword::Left));
    }

    #[test]
    fn apostrophe_comment_consumes_line() {
        let k = kinds("PRINT 1 ' a comment\nPRINT 2\n");
        assert_eq!(
            k,
            vec![
                TokenKind::Keyword(Keyword::Print),
                TokenKind::IntegerLiteral(1),
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Print),
                TokenKind::IntegerLiteral(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }
}
