/**
 * Errors raised while compiling a template.
 */

use thiserror::Error;

/// What went wrong while compiling a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected end of input getting quantifier")]
    UnterminatedQuantifier,

    #[error("non-digit in count: {0:?}")]
    NonDigitInCount(char),

    #[error("quantifier range must be closed")]
    OpenQuantifierRange,

    #[error("quantifier value is too large")]
    QuantifierOverflow,

    #[error("quantifier count {0} is too large")]
    RepeatTooLarge(usize),

    #[error("quantifier minimum {min} exceeds its maximum {max}")]
    InvertedQuantifier{ min: usize, max: usize },

    #[error("character range too large: {from:?} - {to:?}")]
    RangeTooLarge{ from: char, to: char },

    #[error("unexpected end of class range")]
    UnterminatedRange,

    #[error("un-escaped character in class definition: {0:?}")]
    UnescapedInClass(char),

    #[error("unterminated character class")]
    UnterminatedClass,

    #[error("character class has no characters to draw from")]
    EmptyClass,

    #[error("extra closing parenthesis")]
    ExtraClosingParenthesis,

    #[error("missing closing parenthesis")]
    MissingClosingParenthesis,

    #[error("operator {0:?} with no left operand")]
    MissingLeftOperand(char),

    #[error("operator {0:?} with no right operand")]
    MissingRightOperand(char),

    #[error("un-escaped special character: {0:?}")]
    UnescapedSpecial(char),
}

/// A grammar violation, with the character offset it was detected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} (at offset {offset})")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self{ kind, offset }
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
