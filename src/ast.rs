use crate::errors::Fault;

/// True when a token names a variable: it must start with a letter.
pub fn is_identifier(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_alphabetic())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    SquareRoot,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "_" => Some(Self::Negate),
            "#" => Some(Self::SquareRoot),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "_",
            Self::SquareRoot => "#",
        }
    }

    /// Apply the operator to an already-evaluated operand. Square root is
    /// the truncated integer root; a negative radicand is outside the
    /// language contract and not guarded.
    pub fn apply(self, operand: i64) -> i64 {
        match self {
            Self::Negate => -operand,
            Self::SquareRoot => (operand as f64).sqrt() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Apply the operator to already-evaluated operands. Division
    /// truncates toward zero and faults on a zero right operand. Both
    /// execution strategies route through here, so rounding cannot
    /// diverge between them.
    pub fn apply(self, left: i64, right: i64) -> Result<i64, Fault> {
        match self {
            Self::Add => Ok(left + right),
            Self::Subtract => Ok(left - right),
            Self::Multiply => Ok(left * right),
            Self::Divide => {
                if right == 0 {
                    return Err(Fault::DivideByZero(format!("{left}/{right}")));
                }
                Ok(left / right)
            }
        }
    }
}

/// A value-producing node of the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(i64),
    Variable(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    /// Render the expression in infix form. Unary operators are glued to
    /// their operand; binary operations are parenthesized with blanks.
    pub fn infix(&self) -> String {
        match self {
            Self::Constant(value) => value.to_string(),
            Self::Variable(name) => name.clone(),
            Self::Unary { op, operand } => format!("{}{}", op.symbol(), operand.infix()),
            Self::Binary { op, left, right } => {
                format!("( {} {} {} )", left.infix(), op.symbol(), right.infix())
            }
        }
    }
}

/// A statement-level node of the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Assignment { target: String, value: Expression },
    Print(Expression),
}

impl Action {
    /// Build an assignment, rejecting targets that do not name a variable.
    /// The identifier is kept as a plain name rather than wrapped in a
    /// Variable node: it is a destination, not a value to read.
    pub fn assignment(target: String, value: Expression) -> Result<Self, Fault> {
        if !is_identifier(&target) {
            return Err(Fault::IllegalValue(target));
        }
        Ok(Self::Assignment { target, value })
    }

    pub fn infix(&self) -> String {
        match self {
            Self::Assignment { target, value } => format!("{target} := {}", value.infix()),
            Self::Print(expression) => format!("Print {}", expression.infix()),
        }
    }
}

/// The root of a parse tree: an ordered, append-only sequence of actions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    pub actions: Vec<Action>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Infix form of every child in insertion order, one per line.
    pub fn infix(&self) -> String {
        let mut listing = String::new();
        for action in &self.actions {
            listing.push_str(&action.infix());
            listing.push('\n');
        }
        listing
    }
}
