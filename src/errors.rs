use thiserror::Error;

/// Fault taxonomy shared by the parser and both execution paths. Each
/// variant carries the offending token or expression text, so a caller can
/// present the failure without re-deriving context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("divide by zero: {0}")]
    DivideByZero(String),
    #[error("uninitialized variable: {0}")]
    UninitializedVariable(String),
    #[error("illegal value: {0}")]
    IllegalValue(String),
    #[error("extra tokens: {0}")]
    ExtraTokens(String),
    #[error("premature end of program: {0}")]
    PrematureEnd(String),
}
