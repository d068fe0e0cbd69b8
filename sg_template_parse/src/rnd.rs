/**
 * Random utilities.
 *
 * None of these own a generator, every draw comes from the source the caller
 * passes in.
 */

use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use crate::ast::Quantity;

/// Uniform draw from `lo..=hi`. Requires `lo <= hi`.
pub fn rand_inclusive<R>(rng: &mut R, lo: usize, hi: usize) -> usize where R : Rng + ?Sized {
    debug_assert!(lo <= hi);
    if lo == hi {
        return lo;
    }
    Uniform::new_inclusive(lo, hi).sample(rng)
}

/// Fair coin, true or false with equal chance.
pub fn coin<R>(rng: &mut R) -> bool where R : Rng + ?Sized {
    rand_inclusive(rng, 0, 1) == 1
}

pub fn sample<'a, T, R>(rng: &mut R, s: &'a [T]) -> Option<&'a T> where R : Rng + ?Sized {
    s.choose(rng)
}

/// Resolves a quantity to a concrete repeat count.
pub fn draw_count<R>(rng: &mut R, quantity: Quantity) -> usize where R : Rng + ?Sized {
    match quantity {
        Quantity::Exactly(n) => n,
        Quantity::Between(lo, hi) => rand_inclusive(rng, lo, hi),
    }
}

/// Appends `count` characters drawn independently from `charset`.
pub fn rand_chars<R>(rng: &mut R, count: usize, charset: &[char], out: &mut String) where R : Rng + ?Sized {
    for _ in 0..count {
        if let Some(c) = sample(rng, charset) {
            out.push(*c);
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
