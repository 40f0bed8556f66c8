use clap::{Args, Parser, Subcommand, ValueEnum};
use combinv_core::bench::random_universe;
use combinv_core::{
    time_variant, BenchConfig, GeneratorConfig, GrayJoin, IncrementalInverse, JoinConfig,
    Variant,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Bench {
            iterations,
            variant,
            seed,
            join,
        } => run_bench(iterations, variant, seed, join.into()),
        Command::Sequence { limit, join } => run_sequence(limit, join.into()),
        Command::Verify {
            seed,
            tolerance,
            join,
        } => run_verify(seed, tolerance, join.into()),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(2)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "combinv",
    about = "Incremental inversion of combination submatrices (Gray code + Sherman-Morrison)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time each inversion strategy over many random universes
    Bench {
        /// Iterations per variant
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,

        /// Variants to run (multiple allowed); all of them when omitted
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        variant: Vec<VariantArg>,

        /// Seed for the random universe matrices
        #[arg(long, default_value_t = BenchConfig::default().seed)]
        seed: u64,

        #[command(flatten)]
        join: JoinArgs,
    },

    /// Print the joined combination sequence and the swap at each step
    Sequence {
        /// Number of selections to print; one full pass when omitted
        #[arg(long)]
        limit: Option<u64>,

        #[command(flatten)]
        join: JoinArgs,
    },

    /// Compare the incremental inverse with direct inversion at every step
    Verify {
        /// Seed for the random universe matrix
        #[arg(long, default_value_t = BenchConfig::default().seed)]
        seed: u64,

        /// Largest accepted relative deviation
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,

        #[command(flatten)]
        join: JoinArgs,
    },
}

/// Sizes of the two joined generators.
#[derive(Args, Debug)]
struct JoinArgs {
    /// Items in the large group
    #[arg(long, default_value_t = 7)]
    large_size: u32,

    /// Items picked from the large group
    #[arg(long, default_value_t = 4)]
    large_pick: u32,

    /// Items in the small group
    #[arg(long, default_value_t = 4)]
    small_size: u32,

    /// Items picked from the small group
    #[arg(long, default_value_t = 3)]
    small_pick: u32,
}

impl From<JoinArgs> for JoinConfig {
    fn from(args: JoinArgs) -> Self {
        JoinConfig {
            large: GeneratorConfig {
                size: args.large_size,
                pick: args.large_pick,
            },
            small: GeneratorConfig {
                size: args.small_size,
                pick: args.small_pick,
            },
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    DirectRandom,
    DirectRandomParallel,
    ShermanMorrison,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::DirectRandom => Variant::DirectRandom,
            VariantArg::DirectRandomParallel => Variant::DirectRandomParallel,
            VariantArg::ShermanMorrison => Variant::ShermanMorrison,
        }
    }
}

fn run_bench(
    iterations: usize,
    variants: Vec<VariantArg>,
    seed: u64,
    join: JoinConfig,
) -> Result<bool, String> {
    join.validate().map_err(|e| e.to_string())?;
    let variants: Vec<Variant> = if variants.is_empty() {
        Variant::ALL.to_vec()
    } else {
        variants.into_iter().map(Variant::from).collect()
    };
    let config = BenchConfig {
        iterations,
        seed,
        join,
    };

    println!(
        "[Bench] iterations={}, universe={}, pick={}, combinations={}",
        iterations,
        join.universe_size(),
        join.pick(),
        join.combinations()
    );

    let mut all_ok = true;
    for variant in variants {
        let report = time_variant(variant, &config).map_err(|e| e.to_string())?;
        let outcome = report.outcome;
        println!(
            "{:<30}{:.6}s  success={}{}",
            variant.name(),
            report.elapsed.as_secs_f64(),
            outcome.succeeded(),
            if outcome.succeeded() {
                String::new()
            } else {
                format!("  ({} of {} iterations failed)", outcome.failures, outcome.runs)
            }
        );
        all_ok = all_ok && outcome.succeeded();
    }
    Ok(all_ok)
}

fn run_sequence(limit: Option<u64>, join: JoinConfig) -> Result<bool, String> {
    let mut gray = GrayJoin::new(join).map_err(|e| e.to_string())?;
    let total = limit.unwrap_or_else(|| join.combinations());
    println!(
        "[Sequence] large={}C{}, small={}C{}, showing {} of {} per pass",
        join.large.size,
        join.large.pick,
        join.small.size,
        join.small.pick,
        total,
        join.combinations()
    );

    if total == 0 {
        return Ok(true);
    }
    let mut previous = gray.next_selection();
    println!("  {:>5}) {}", 1, previous);
    for i in 2..=total {
        let current = gray.next_selection();
        let step = previous
            .replacement_to(&current)
            .map_err(|e| format!("step {i}: {e}"))?;
        match step {
            Some(r) => println!("  {:>5}) {}  -{:<2} +{}", i, current, r.removed, r.added),
            None => println!("  {:>5}) {}  unchanged", i, current),
        }
        previous = current;
    }
    Ok(true)
}

fn run_verify(seed: u64, tolerance: f64, join: JoinConfig) -> Result<bool, String> {
    let mut gray = GrayJoin::new(join).map_err(|e| e.to_string())?;
    let universe = random_universe(seed, join.universe_size());
    let first = gray.next_selection();
    let mut engine = IncrementalInverse::new(&universe, &first).map_err(|e| e.to_string())?;

    println!(
        "[Verify] seed={}, universe={}x{}, submatrix={}x{}",
        seed,
        join.universe_size(),
        join.universe_size(),
        join.pick(),
        join.pick()
    );

    let mut worst = 0.0f64;
    let mut worst_step = 1;
    for step in 2..=join.combinations() {
        let next = gray.next_selection();
        let swap = engine
            .advance_to(&next)
            .map_err(|e| format!("step {step}: {e}"))?;
        if swap.is_none() {
            return Err(format!("step {step}: selection {next} repeats within one pass"));
        }
        match engine.max_deviation() {
            Some(dev) if dev.is_finite() => {
                if dev > worst {
                    worst = dev;
                    worst_step = step;
                }
            }
            _ => {
                eprintln!(
                    "[Verify] step {step}: submatrix {next} is singular or the inverse diverged"
                );
                return Ok(false);
            }
        }
    }

    let ok = worst <= tolerance;
    println!(
        "[Verify] steps={}  max relative deviation={:.3e} at step {}  tolerance={:.1e}{}",
        join.combinations(),
        worst,
        worst_step,
        tolerance,
        if ok { "  (OK)" } else { "  (MISMATCH)" }
    );
    Ok(ok)
}

