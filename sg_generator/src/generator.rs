/**
 * The compiled generator: compile once, render as often as needed.
 */

use std::collections::HashSet;
use std::str::FromStr;
use rand::{CryptoRng, Rng};
use rand::rngs::OsRng;
use tracing::{debug, warn};
use sg_template_parse::{self as template, Node, SyntaxError};
use crate::config::GeneratorConfig;
use crate::error::UniquenessError;
use crate::render;

/// A template compiled into its syntax tree.
///
/// The tree is never modified after construction, so a generator can be
/// shared between threads, each rendering with its own random source.
/// Only cryptographically strong sources are accepted, since the output may
/// end up as a token or a secret. The methods without an explicit source use
/// the operating system's.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    pattern: String,
    root: Node,
    config: GeneratorConfig,
}

impl StringGenerator {
    pub fn new(pattern: &str) -> Result<Self, SyntaxError> {
        Self::with_config(pattern, GeneratorConfig::default())
    }

    pub fn with_config(pattern: &str, config: GeneratorConfig) -> Result<Self, SyntaxError> {
        Self::with_config_and_rng(pattern, config, &mut OsRng)
    }

    /// Compiles `pattern`, drawing the decisions made at compile time from
    /// `rng`.
    pub fn with_config_and_rng<R>(pattern: &str, config: GeneratorConfig, rng: &mut R)
        -> Result<Self, SyntaxError> where R : Rng + CryptoRng + ?Sized {

        let root = template::parse(pattern, rng)?;
        debug!(pattern, nodes = root.node_count(), "compiled template");
        Ok(Self{ pattern: pattern.into(), root, config })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ast(&self) -> &Node {
        &self.root
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produces one string that fits the template.
    pub fn render(&self) -> String {
        self.render_with(&mut OsRng)
    }

    pub fn render_with<R>(&self, rng: &mut R) -> String where R : Rng + CryptoRng + ?Sized {
        render::render(&self.root, rng)
    }

    /// Produces `count` strings, in the order they were rendered. With
    /// `unique` set, duplicates are rejected and the whole run may take at
    /// most `count * attempts_factor` renders.
    pub fn render_list(&self, count: usize, unique: bool) -> Result<Vec<String>, UniquenessError> {
        self.render_list_with(count, unique, &mut OsRng)
    }

    #[tracing::instrument(level = "debug", skip(self, rng), fields(pattern = %self.pattern))]
    pub fn render_list_with<R>(&self, count: usize, unique: bool, rng: &mut R)
        -> Result<Vec<String>, UniquenessError> where R : Rng + CryptoRng + ?Sized {

        let budget = self.config.attempts_budget(count);
        let mut rendered = Vec::new();
        let mut seen = HashSet::new();
        let mut attempts = 0usize;

        while rendered.len() < count {
            if unique && attempts > budget {
                warn!(attempts, produced = rendered.len(), "attempt budget exhausted");
                return Err(UniquenessError{ requested: count, produced: rendered.len(), attempts });
            }

            let s = self.render_with(rng);
            attempts += 1;
            if !unique || seen.insert(s.clone()) {
                rendered.push(s);
            }
        }

        debug!(attempts, "rendered list");
        Ok(rendered)
    }
}

impl FromStr for StringGenerator {
    type Err = SyntaxError;

    fn from_str(pattern: &str) -> Result<Self, SyntaxError> {
        Self::new(pattern)
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
