/**
 * Error types for string generation.
 */

use thiserror::Error;
use sg_template_parse::SyntaxError;

/// The attempt budget ran out before enough distinct strings were rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("couldn't satisfy uniqueness: {produced} of {requested} distinct strings after {attempts} attempts")]
pub struct UniquenessError {
    pub requested: usize,
    pub produced: usize,
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Uniqueness(#[from] UniquenessError),
}

pub type Result<T> = std::result::Result<T, Error>;
