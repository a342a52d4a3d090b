use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random fillings draw from `[0, RANDOM_LIMIT)`.
pub const RANDOM_LIMIT: i64 = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Increasing,
    Decreasing,
}

impl FillMode {
    // The menu codes of the interactive driver: 1 = random, 2 = increasing, 3 = decreasing
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(FillMode::Random),
            2 => Some(FillMode::Increasing),
            3 => Some(FillMode::Decreasing),
            _ => None,
        }
    }
}

impl FromStr for FillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(FillMode::Random),
            "increasing" => Ok(FillMode::Increasing),
            "decreasing" => Ok(FillMode::Decreasing),
            _ => Err(format!("unknown fill mode: {}", s)),
        }
    }
}

pub fn fill_values<R: Rng + ?Sized>(mode: FillMode, count: usize, rng: &mut R) -> Vec<i64> {
    (0..count as i64)
        .map(|i| match mode {
            FillMode::Random => rng.random_range(0..RANDOM_LIMIT),
            FillMode::Increasing => i,
            FillMode::Decreasing => -i,
        })
        .collect()
}

// A seeded generator gives reproducible fillings.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}
