use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;
use sg_generator::{GeneratorConfig, StringGenerator};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn compile_seeded(pattern: &str, seed: u64) -> StringGenerator {
    StringGenerator::with_config_and_rng(pattern, GeneratorConfig::default(), &mut seeded(seed))
        .unwrap_or_else(|e| panic!("{:?} failed to compile: {}", pattern, e))
}

/// Checks that `rendered` matches the template read as a regex anchored at
/// the start.
pub fn assert_matches_template(template: &str, rendered: &str) {
    let rx = Regex::new(&format!("^(?:{})", template)).unwrap();
    assert!(rx.is_match(rendered), "{:?} does not match template {:?}", rendered, template);
}
