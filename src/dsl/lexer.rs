//! Lexer (tokenizer) for the netlist format.

use crate::error::{NodalError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier (element name, node label, keyword)
    Identifier,
    /// A number, possibly with a unit suffix
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// SPICE unit suffixes and their multipliers.
fn suffix_multiplier(ch: char) -> Option<f64> {
    match ch {
        'p' => Some(1e-12),
        'n' => Some(1e-9),
        'u' | 'µ' => Some(1e-6),
        'm' => Some(1e-3),
        'k' | 'K' => Some(1e3),
        'M' => Some(1e6),
        'G' => Some(1e9),
        _ => None,
    }
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let (line, column) = (self.line, self.column);
        let make = |kind, text| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(&ch) = self.chars.peek() else {
            return Ok(make(TokenKind::Eof, String::new()));
        };

        let token = match ch {
            '\n' => {
                self.advance();
                make(TokenKind::Newline, "\n".to_string())
            }
            '.' => {
                self.advance();
                let name = self.read_word();
                if name.is_empty() {
                    return Err(NodalError::lexer(line, column, "directive name expected after '.'"));
                }
                make(TokenKind::Directive, format!(".{}", name))
            }
            '-' | '+' => {
                let text = self.read_word();
                if !looks_like_number(&text) {
                    return Err(NodalError::lexer(line, column, format!("invalid number '{}'", text)));
                }
                make(TokenKind::Number, text)
            }
            _ if ch.is_alphanumeric() || ch == '_' => {
                let text = self.read_word();
                if looks_like_number(&text) {
                    make(TokenKind::Number, text)
                } else {
                    make(TokenKind::Identifier, text)
                }
            }
            _ => {
                return Err(NodalError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while self.chars.peek().is_some_and(|&c| c != '\n') {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Read a run of word characters. Signs and decimal points are accepted
    /// so that `-1.5e-3`, `4.7k` and `node.a` each come out as one word.
    fn read_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            let sign_after_exponent = (ch == '-' || ch == '+')
                && (text.is_empty()
                    || (text.ends_with(|c: char| c == 'e' || c == 'E') && looks_like_number(&text[..text.len() - 1])));
            if ch.is_alphanumeric() || ch == '_' || ch == '.' || sign_after_exponent {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

/// Check whether `text` is a number with an optional unit suffix, such as
/// `10k`, `4.7u`, `-2.5` or `1e-9`.
pub fn looks_like_number(text: &str) -> bool {
    parse_value(text).is_some()
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || first == '-' || first == '+' || first == '.') {
        return None;
    }

    let last = text.chars().last()?;
    let (num_str, multiplier) = match suffix_multiplier(last) {
        Some(mult) => (&text[..text.len() - last.len_utf8()], mult),
        None => (text, 1.0),
    };

    // Rust's float parser also accepts "inf"/"nan"; only plain numerals count
    if !num_str.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+')) {
        return None;
    }
    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == TokenKind::Eof {
                break;
            }
            out.push((tok.kind, tok.text));
        }
        out
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("100n"), Some(100e-9)));
        assert!(approx_eq(parse_value("4.7u"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("1M"), Some(1_000_000.0)));
        assert!(approx_eq(parse_value("2.2"), Some(2.2)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value("-12"), Some(-12.0)));
        assert_eq!(parse_value("out"), None);
        assert_eq!(parse_value("n1"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn test_lexer_component_line() {
        let toks = kinds("R1 in out 10k\n");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Identifier, "R1".to_string()),
                (TokenKind::Identifier, "in".to_string()),
                (TokenKind::Identifier, "out".to_string()),
                (TokenKind::Number, "10k".to_string()),
                (TokenKind::Newline, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexer_negative_exponent() {
        let toks = kinds("V1 a 0 -1.5e-3");
        assert_eq!(toks[3], (TokenKind::Number, "-1.5e-3".to_string()));
        assert_eq!(toks[2], (TokenKind::Number, "0".to_string()));
    }

    #[test]
    fn test_lexer_directive_and_comments() {
        let toks = kinds("# header\n.ground gnd ; trailing\n");
        assert_eq!(toks[0].0, TokenKind::Newline);
        assert_eq!(toks[1], (TokenKind::Directive, ".ground".to_string()));
        assert_eq!(toks[2], (TokenKind::Identifier, "gnd".to_string()));
    }

    #[test]
    fn test_lexer_position() {
        let mut lexer = Lexer::new("R1 a b 1\n  ?");
        for _ in 0..5 {
            lexer.next_token().unwrap();
        }
        match lexer.next_token().unwrap_err() {
            NodalError::LexerError { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
