use crate::error::{CalcError, Span};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Integer,
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Integer => "INTEGER",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MULTIPLY",
            TokenType::Slash => "DIVIDE",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    /// Present only for `TokenType::Integer`.
    pub value: Option<i64>,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, span: Span) -> Self {
        Self {
            token_type,
            value: None,
            span,
        }
    }

    pub fn integer(value: i64, span: Span) -> Self {
        Self {
            token_type: TokenType::Integer,
            value: Some(value),
            span,
        }
    }

    /// Source-like rendering used in diagnostics.
    pub fn lexeme(&self) -> String {
        match self.token_type {
            TokenType::Integer => self.value.map(|v| v.to_string()).unwrap_or_default(),
            TokenType::Plus => "+".to_string(),
            TokenType::Minus => "-".to_string(),
            TokenType::Star => "*".to_string(),
            TokenType::Slash => "/".to_string(),
            TokenType::LeftParen => "(".to_string(),
            TokenType::RightParen => ")".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}:{}", self.token_type, value),
            None => write!(f, "{}", self.token_type),
        }
    }
}

/// Pull-based tokenizer over a single line of input.
///
/// Tokens are produced on demand; the first lexical error is yielded once and
/// the lexer then stays exhausted.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            failed: false,
        }
    }

    /// Eagerly collect every token, stopping at the first error.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, CalcError> {
        Lexer::new(source).collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }

    fn scan_token(&mut self) -> Option<Result<Token, CalcError>> {
        self.skip_whitespace();
        let (start, c) = self.chars.next()?;

        let token_type = match c {
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            // Literals are ASCII digits only.
            c if c.is_ascii_digit() => return Some(self.integer(start)),
            _ => {
                return Some(Err(CalcError::lexical(
                    Span::new(start, start + c.len_utf8()),
                    format!("Unexpected character: '{}'", c),
                )));
            }
        };

        Some(Ok(Token::new(token_type, Span::single(start))))
    }

    fn integer(&mut self, start: usize) -> Result<Token, CalcError> {
        let mut end = start + 1;
        while let Some(&(i, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            end = i + 1;
            self.chars.next();
        }

        let digits = &self.source[start..end];
        let value = digits.parse::<i64>().map_err(|_| {
            CalcError::lexical(
                Span::new(start, end),
                format!("Integer literal out of range: {}", digits),
            )
        })?;

        Ok(Token::integer(value, Span::new(start, end)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.scan_token();
        match &item {
            Some(Ok(token)) => trace!(token = %token, "scanned token"),
            Some(Err(_)) => self.failed = true,
            None => {}
        }
        item
    }
}
