// icalc: interactive integer calculator library
//
// Each input line runs through a pull-based lexer, a recursive-descent parser
// building an expression tree, and a tree-walking evaluator.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use ast::Expr;
pub use error::{CalcError, ErrorKind, Span};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse_line, Parser};
pub use repl::{Config, Summary};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{evaluate_line, run_line, Evaluation};
