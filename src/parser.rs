use crate::ast::Expr;
use crate::error::{CalcError, Span};
use crate::lexer::{Lexer, Token, TokenType};
use tracing::debug;

/// Deepest chain of parentheses and unary signs a line may contain. Bounds the
/// recursion of parsing and of every later walk over the tree.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser holding exactly one token of lookahead.
///
/// Grammar, lowest binding power first; binary operators are left-associative:
///
/// ```text
/// expression := term ( ('+' | '-') term )*
/// term       := factor ( ('*' | '/') factor )*
/// factor     := INTEGER | '(' expression ')' | '+' factor | '-' factor
/// ```
pub struct Parser<I> {
    tokens: I,
    current: Option<Token>,
    previous_end: usize,
    depth: usize,
}

/// Tokenize and parse a single line.
pub fn parse_line(source: &str) -> Result<Option<Expr>, CalcError> {
    Parser::new(Lexer::new(source)).parse()
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, CalcError>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            current: None,
            previous_end: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream into one tree.
    ///
    /// Returns `Ok(None)` when the stream holds no tokens at all.
    pub fn parse(&mut self) -> Result<Option<Expr>, CalcError> {
        self.advance()?;
        if self.current.is_none() {
            return Ok(None);
        }

        let expr = self.expression()?;

        if let Some(token) = &self.current {
            return Err(CalcError::syntax_with_help(
                token.span.clone(),
                format!("Unexpected token after expression: '{}'", token.lexeme()),
                "An expression must be a single term; join operands with an operator.".to_string(),
            ));
        }

        debug!(ast = %expr, "parsed expression");
        Ok(Some(expr))
    }

    fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.term()?;

        loop {
            if self.match_type(TokenType::Plus)? {
                expr = Expr::add(expr, self.term()?);
            } else if self.match_type(TokenType::Minus)? {
                expr = Expr::subtract(expr, self.term()?);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.factor()?;

        loop {
            if self.match_type(TokenType::Star)? {
                expr = Expr::multiply(expr, self.factor()?);
            } else if self.match_type(TokenType::Slash)? {
                expr = Expr::divide(expr, self.factor()?);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        let token = match &self.current {
            Some(token) => token.clone(),
            None => {
                return Err(CalcError::syntax_with_help(
                    Span::single(self.previous_end),
                    "Unexpected end of input".to_string(),
                    "Expected a number, '(', '+' or '-' here.".to_string(),
                ));
            }
        };

        match token.token_type {
            TokenType::Integer => {
                self.advance()?;
                Ok(Expr::Literal(token.value.unwrap_or_default()))
            }
            TokenType::LeftParen => {
                self.enter(&token)?;
                self.advance()?;
                let expr = self.expression()?;
                self.consume_with_help(
                    TokenType::RightParen,
                    "Expected ')' after expression",
                    "Every '(' must be closed by a matching ')'.".to_string(),
                )?;
                self.depth -= 1;
                Ok(expr)
            }
            TokenType::Plus => {
                self.enter(&token)?;
                self.advance()?;
                let operand = self.factor()?;
                self.depth -= 1;
                Ok(Expr::positive(operand))
            }
            TokenType::Minus => {
                self.enter(&token)?;
                self.advance()?;
                let operand = self.factor()?;
                self.depth -= 1;
                Ok(Expr::negative(operand))
            }
            TokenType::Star | TokenType::Slash | TokenType::RightParen => {
                let message = format!("Expected expression, found '{}'", token.lexeme());
                Err(CalcError::syntax(token.span, message))
            }
        }
    }

    fn enter(&mut self, token: &Token) -> Result<(), CalcError> {
        if self.depth >= MAX_NESTING {
            return Err(CalcError::syntax_with_help(
                token.span.clone(),
                "Expression nested too deeply".to_string(),
                format!(
                    "At most {} nested parentheses or unary signs are allowed.",
                    MAX_NESTING
                ),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Pull the next token into the lookahead slot.
    fn advance(&mut self) -> Result<(), CalcError> {
        if let Some(token) = &self.current {
            self.previous_end = token.span.end;
        }
        self.current = self.tokens.next().transpose()?;
        Ok(())
    }

    fn check(&self, token_type: TokenType) -> bool {
        matches!(&self.current, Some(token) if token.token_type == token_type)
    }

    fn match_type(&mut self, token_type: TokenType) -> Result<bool, CalcError> {
        if self.check(token_type) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        message: &str,
        help: String,
    ) -> Result<(), CalcError> {
        if self.check(token_type) {
            return self.advance();
        }

        let error_span = match &self.current {
            Some(token) => token.span.clone(),
            // At end of input, point just past the last token.
            None => Span::single(self.previous_end),
        };

        Err(CalcError::syntax_with_help(error_span, message.to_string(), help))
    }
}
