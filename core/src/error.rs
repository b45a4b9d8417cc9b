use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IrratError {
    #[error("interrupted")]
    Interrupted,
    #[error("division by zero")]
    DivideByZero,
    #[error("{0} is not an integer")]
    NotAnInteger(String),
    #[error("{0} must be a positive integer")]
    NotPositive(String),
    #[error("{0} is not a finite number")]
    NotFinite(String),
    #[error("value too large")]
    TooLarge,
    #[error("exponent too large")]
    ExponentTooLarge,
    #[error("zero to the power of zero is undefined")]
    ZeroToThePowerOfZero,
    #[error("{0} is not supported yet")]
    Unsupported(&'static str),
    #[error("{0}")]
    Parse(ParseError),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    ExpectedAToken,
    ExpectedANumber,
    ExpectedChar(char),
    UnexpectedChar(char),
    UnexpectedInput,
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedAToken => write!(f, "unexpected end of input"),
            Self::ExpectedANumber => write!(f, "expected a number"),
            Self::ExpectedChar(ch) => write!(f, "expected '{}'", ch),
            Self::UnexpectedChar(ch) => write!(f, "unexpected character '{}'", ch),
            Self::UnexpectedInput => write!(f, "unexpected input found"),
            Self::InvalidNumber(s) => write!(f, "invalid number '{}'", s),
        }
    }
}

impl From<ParseError> for IrratError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
