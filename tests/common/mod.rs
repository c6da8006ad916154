#![allow(dead_code)]
use bsdiff_args::CompressorType;
use rand::distributions::uniform::{SampleUniform, Uniform};
use rand::prelude::*;
use std::collections::BTreeSet;

/// Collects compressor types into a set.
pub fn types(tys: &[CompressorType]) -> BTreeSet<CompressorType> {
    tys.iter().copied().collect()
}

/// Generates `n` bytes repeating a random chunk, with `chaos` (in [0, 1])
/// the chance of each byte being replaced by noise.
pub fn cyclic_bytes(n: usize, chunk: usize, chaos: f64) -> Vec<u8> {
    let mut rng = thread_rng();
    let pattern: Vec<u8> = (0..Ord::max(chunk, 1)).map(|_| rng.gen()).collect();
    pattern
        .iter()
        .cycle()
        .take(n)
        .map(|&x| if random_between(0.0, 1.0) < chaos { thread_rng().gen() } else { x })
        .collect()
}

/// Generates `n` random bytes.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..n).map(|_| rng.gen()).collect()
}

pub fn random_between<X: SampleUniform>(lo: X, hi: X) -> X {
    let mut rng = thread_rng();
    Uniform::new_inclusive(lo, hi).sample(&mut rng)
}
