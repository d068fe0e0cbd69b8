/**
 * Randomized string generation from templates.
 *
 * ```text
 * let gen = StringGenerator::new("[a-z]{10}@[a-z]{3,12}.(com|net|org)")?;
 * let one = gen.render();
 * let many = gen.render_list(20, true)?;
 * ```
 */

extern crate sg_template_parse;
extern crate rand;

mod config;
mod error;
mod render;
mod generator;

pub use config::GeneratorConfig;
pub use error::{Error, UniquenessError, Result};
pub use render::{render, render_into};
pub use generator::StringGenerator;

pub use sg_template_parse::{Node, Quantity, SyntaxError, SyntaxErrorKind};
