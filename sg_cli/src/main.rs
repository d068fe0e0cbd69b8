/**
 * Command-line front end for the string generator.
 *
 * Usage:
 *   strgen [-n <count>] [-u] [--attempts-factor <n>] [--ast] [PATTERN]...
 *
 * Without patterns on the command line, one pattern per line is read from
 * stdin.
 */

extern crate sg_generator;

use std::io::{self, BufRead, Write};
use std::process;
use clap::{Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use sg_generator::{GeneratorConfig, StringGenerator, SyntaxError, UniquenessError};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Generator(#[from] sg_generator::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<SyntaxError> for CliError {
    fn from(e: SyntaxError) -> Self {
        CliError::Generator(e.into())
    }
}

impl From<UniquenessError> for CliError {
    fn from(e: UniquenessError) -> Self {
        CliError::Generator(e.into())
    }
}

fn cli() -> Command {
    Command::new("strgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates random strings from regex-like templates")
        .arg(
            Arg::new("pattern")
                .help("Templates to render, read from stdin when omitted")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .help("Number of strings to generate per template")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("unique")
                .long("unique")
                .short('u')
                .help("Require the generated strings to be distinct")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("attempts-factor")
                .long("attempts-factor")
                .help("Renders allowed per requested string when --unique is set")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the compiled template instead of generating strings")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// One pattern per line, blank lines skipped.
fn read_patterns<B: BufRead>(input: B) -> io::Result<Vec<String>> {
    let mut patterns = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !line.is_empty() {
            patterns.push(line.to_string());
        }
    }
    Ok(patterns)
}

fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<(), CliError> {
    let count = matches.get_one::<usize>("count").copied().unwrap_or(1);
    let unique = matches.get_flag("unique");
    let print_ast = matches.get_flag("ast");
    let config = GeneratorConfig::new().with_attempts_factor(
        matches.get_one::<usize>("attempts-factor").copied().unwrap_or(GeneratorConfig::DEFAULT_ATTEMPTS_FACTOR));

    let patterns = match matches.get_many::<String>("pattern") {
        Some(patterns) => patterns.cloned().collect(),
        None => read_patterns(io::stdin().lock())?,
    };
    debug!(patterns = patterns.len(), count, unique, "generating");

    for pattern in &patterns {
        let gen = StringGenerator::with_config(pattern, config)?;
        if print_ast {
            writeln!(out, "{}", gen.ast())?;
            continue;
        }
        for s in gen.render_list(count, unique)? {
            writeln!(out, "{}", s)?;
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    let matches = cli().get_matches();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&matches, &mut out) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
