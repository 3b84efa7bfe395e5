use crate::ast::Expr;
use crate::error::{CalcError, Span};
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use tracing::debug;

/// Result of running one non-empty line through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub ast: Expr,
    pub value: i64,
}

/// Tokenize, parse and evaluate one line.
///
/// Returns `Ok(None)` when the line holds no tokens.
pub fn run_line(source: &str) -> Result<Option<Evaluation>, CalcError> {
    let mut parser = Parser::new(Lexer::new(source));
    let ast = match parser.parse()? {
        Some(ast) => ast,
        None => return Ok(None),
    };

    let line_span = Span::new(0, source.trim_end().len());
    let value = Evaluator::new(line_span).evaluate(&ast)?;
    debug!(ast = %ast, value, "evaluated line");

    Ok(Some(Evaluation { ast, value }))
}

pub fn evaluate_line(source: &str) -> Result<Option<i64>, CalcError> {
    Ok(run_line(source)?.map(|evaluation| evaluation.value))
}
