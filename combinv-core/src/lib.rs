// Enumeration subsystem: selections and minimal-change combination sequences
pub mod selection;
pub mod gray;
pub mod join;

// Inversion subsystem: index mapping, dense helpers, and rank-1 updates
pub mod index_map;
pub mod dense;
pub mod rank_one;
pub mod engine;

// Benchmark variants and errors
pub mod bench;
pub mod error;

mod proptests;

// Public enumeration API
pub use crate::selection::{Replacement, Selection, MAX_ITEMS};
pub use crate::gray::{
    binomial, gray, Direction, GeneratorConfig, GrayGenerator, MAX_GENERATOR_SIZE,
};
pub use crate::join::{GrayJoin, JoinConfig};

// Public inversion API
pub use crate::index_map::IndexMap;
pub use crate::rank_one::{sherman_morrison, sherman_morrison_update};
pub use crate::engine::IncrementalInverse;

// Public benchmark / error API
pub use crate::bench::{time_variant, BenchConfig, BenchReport, Outcome, Variant};
pub use crate::error::{BenchError, ConfigError, EngineError, SelectionError};
