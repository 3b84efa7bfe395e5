use std::fmt;

/// Expression tree for one input line.
///
/// Every node owns its children, so a tree is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i64),
    Add(Box<Expr>, Box<Expr>),
    Subtract(Box<Expr>, Box<Expr>),
    Multiply(Box<Expr>, Box<Expr>),
    Divide(Box<Expr>, Box<Expr>),
    Positive(Box<Expr>),
    Negative(Box<Expr>),
}

impl Expr {
    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn subtract(left: Expr, right: Expr) -> Self {
        Expr::Subtract(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Expr, right: Expr) -> Self {
        Expr::Multiply(Box::new(left), Box::new(right))
    }

    pub fn divide(left: Expr, right: Expr) -> Self {
        Expr::Divide(Box::new(left), Box::new(right))
    }

    pub fn positive(operand: Expr) -> Self {
        Expr::Positive(Box::new(operand))
    }

    pub fn negative(operand: Expr) -> Self {
        Expr::Negative(Box::new(operand))
    }
}

/// Fully parenthesized rendering, e.g. `1+2*3` displays as `(1+(2*3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Add(left, right) => write!(f, "({}+{})", left, right),
            Expr::Subtract(left, right) => write!(f, "({}-{})", left, right),
            Expr::Multiply(left, right) => write!(f, "({}*{})", left, right),
            Expr::Divide(left, right) => write!(f, "({}/{})", left, right),
            Expr::Positive(operand) => write!(f, "(+{})", operand),
            Expr::Negative(operand) => write!(f, "(-{})", operand),
        }
    }
}
