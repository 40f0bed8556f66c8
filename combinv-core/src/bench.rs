//! Benchmark variants: direct inversion of every combination, the same work
//! spread over a rayon pool, and the incremental Sherman–Morrison pass.

use std::fmt;
use std::time::{Duration, Instant};

use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::dense::{all_finite, random_matrix};
use crate::engine::IncrementalInverse;
use crate::error::{BenchError, EngineError, SelectionError};
use crate::join::{GrayJoin, JoinConfig};
use crate::selection::Selection;

/// Settings shared by every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub iterations: usize,
    pub seed: u64,
    pub join: JoinConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            seed: 0x5eed,
            join: JoinConfig::default(),
        }
    }
}

/// Tally of successful and failed iterations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub runs: usize,
    pub failures: usize,
}

impl Outcome {
    pub fn from_success(ok: bool) -> Self {
        Self {
            runs: 1,
            failures: usize::from(!ok),
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            runs: self.runs + other.runs,
            failures: self.failures + other.failures,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failures == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Invert a fresh random matrix for every combination.
    DirectRandom,
    /// `DirectRandom` with the combinations inverted in parallel.
    DirectRandomParallel,
    /// Invert the first combination, then update incrementally.
    ShermanMorrison,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::DirectRandom,
        Variant::DirectRandomParallel,
        Variant::ShermanMorrison,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::DirectRandom => "direct_random",
            Variant::DirectRandomParallel => "direct_random_parallel",
            Variant::ShermanMorrison => "sherman_morrison",
        }
    }

    /// Run one iteration of this variant.
    pub fn run_once(
        &self,
        join: &JoinConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<Outcome, BenchError> {
        match self {
            Variant::DirectRandom => Ok(direct_random(join, rng)),
            Variant::DirectRandomParallel => Ok(direct_random_parallel(join, rng)),
            Variant::ShermanMorrison => sherman_morrison_pass(join, rng),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Universe matrix drawn from a generator seeded with `seed`.
pub fn random_universe(seed: u64, n: usize) -> DMatrix<f64> {
    random_matrix(&mut ChaCha8Rng::seed_from_u64(seed), n)
}

fn invert_random(rng: &mut ChaCha8Rng, k: usize) -> bool {
    random_matrix(rng, k)
        .try_inverse()
        .is_some_and(|inv| all_finite(&inv))
}

/// One random `k x k` inversion per joined combination.
pub fn direct_random(join: &JoinConfig, rng: &mut ChaCha8Rng) -> Outcome {
    let k = join.pick();
    let ok = (0..join.combinations()).fold(true, |ok, _| invert_random(rng, k) && ok);
    Outcome::from_success(ok)
}

/// Like [`direct_random`], but each inversion runs as its own rayon task
/// with a generator seeded from one draw of `rng` plus the task index.
pub fn direct_random_parallel(join: &JoinConfig, rng: &mut ChaCha8Rng) -> Outcome {
    let k = join.pick();
    let base: u64 = rng.gen();
    let ok = (0..join.combinations())
        .into_par_iter()
        .map(|i| {
            let mut local = ChaCha8Rng::seed_from_u64(base.wrapping_add(i));
            invert_random(&mut local, k)
        })
        .reduce(|| true, |a, b| a && b);
    Outcome::from_success(ok)
}

/// Walk every joined combination of a random universe, keeping the inverse
/// up to date with two rank-1 updates per step.
///
/// A singular first submatrix or a non-finite inverse counts as a failed
/// iteration. An enumeration that breaks the single-swap contract is an error.
pub fn sherman_morrison_pass(
    join: &JoinConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Outcome, BenchError> {
    let mut gray = GrayJoin::new(*join)?;
    let universe = random_matrix(rng, join.universe_size());
    let first = gray.next_selection();
    let mut engine = match IncrementalInverse::new(&universe, &first) {
        Ok(engine) => engine,
        Err(EngineError::Singular) => return Ok(Outcome::from_success(false)),
        Err(e) => return Err(e.into()),
    };

    let steps = gray.take(join.combinations().saturating_sub(1) as usize);
    let ok = follow_steps(&mut engine, steps)?;
    Ok(Outcome::from_success(ok))
}

/// Advance `engine` through `steps`, each of which must swap exactly one item.
/// Returns whether the inverse stayed finite throughout.
///
/// Within one pass every combination is distinct, so a repeated selection is
/// a broken enumeration just like a multi-item change.
fn follow_steps<I>(engine: &mut IncrementalInverse<'_>, steps: I) -> Result<bool, BenchError>
where
    I: IntoIterator<Item = Selection>,
{
    let mut ok = true;
    for next in steps {
        if engine.advance_to(&next)?.is_none() {
            let repeat = SelectionError::NotSingleReplacement {
                removed: 0,
                added: 0,
            };
            return Err(EngineError::from(repeat).into());
        }
        ok = ok && engine.is_finite();
    }
    Ok(ok)
}

/// Timing and tally for one variant.
#[derive(Clone, Copy, Debug)]
pub struct BenchReport {
    pub variant: Variant,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

/// Run `config.iterations` iterations of `variant` and time them.
///
/// Failed iterations are tallied and the loop carries on; only a broken
/// configuration or enumeration stops it.
pub fn time_variant(variant: Variant, config: &BenchConfig) -> Result<BenchReport, BenchError> {
    config.join.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let start = Instant::now();
    let mut outcome = Outcome::default();
    for _ in 0..config.iterations {
        outcome = outcome.merge(variant.run_once(&config.join, &mut rng)?);
    }
    Ok(BenchReport {
        variant,
        elapsed: start.elapsed(),
        outcome,
    })
}
