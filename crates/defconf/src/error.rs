//! parse errors
//!
//! Every failure aborts the whole parse. [ParseError] names the failure site and carries the
//! offending fragment, [ErrorKind] groups the sites into the three categories users care about.

/// Coarse classification of a [ParseError]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A declaration block, dictionary item or comment does not match its grammar
    SyntaxError,
    /// A value expression matches no known value shape
    InvalidValue,
    /// A substitution names a constant that cannot be resolved
    UndefinedConstant,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::SyntaxError => f.write_str("syntax error"),
            ErrorKind::InvalidValue => f.write_str("invalid value"),
            ErrorKind::UndefinedConstant => f.write_str("undefined constant"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid syntax in block: {0}")]
    InvalidBlock(String),
    #[error("Unterminated block, expected `);`: {0}")]
    UnterminatedBlock(String),
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Invalid dictionary item: {0}")]
    InvalidItem(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Mapping nested too deep: {0}")]
    NestingTooDeep(String),
    #[error("Integer out of range: {0}")]
    IntegerOutOfRange(String),
    #[error("Undefined constant '{0}'")]
    UndefinedConstant(String),
    #[error("Constant '{0}' refers to itself")]
    ReferenceLoop(String),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidBlock(_)
            | ParseError::UnterminatedBlock(_)
            | ParseError::UnterminatedComment
            | ParseError::InvalidItem(_)
            | ParseError::NestingTooDeep(_) => ErrorKind::SyntaxError,
            ParseError::InvalidValue(_) | ParseError::IntegerOutOfRange(_) => {
                ErrorKind::InvalidValue
            }
            ParseError::UndefinedConstant(_) | ParseError::ReferenceLoop(_) => {
                ErrorKind::UndefinedConstant
            }
        }
    }
}
