/**
 * Compiler for the string generator's template language.
 *
 * A template is a restricted, regex-like description of the strings to
 * produce. Compiling it yields a tree of `Node`s that can be rendered any
 * number of times.
 */

extern crate rand;
extern crate thiserror;

mod ast;
mod cursor;
mod error;
mod parser;
pub mod rnd;

pub use ast::{Node, Quantity};
pub use cursor::Cursor;
pub use error::{SyntaxError, SyntaxErrorKind, Result};
pub use parser::{parse, character_range, allowed_chars, is_meta_char, META_CHARS, MAX_RANGE_SPAN, MAX_REPEAT};
