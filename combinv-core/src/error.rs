use thiserror::Error;

/// Invalid enumerator or joiner parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pick must satisfy 0 < pick < size (size = {size}, pick = {pick})")]
    InvalidPick { size: u32, pick: u32 },

    #[error("generator size {size} exceeds the supported maximum of {max}")]
    SizeTooLarge { size: u32, max: u32 },

    #[error("joined universe of {width} items exceeds the selection capacity of {max}")]
    UniverseTooLarge { width: u32, max: u32 },
}

/// Failures when comparing or building selections.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection widths differ ({left} vs {right})")]
    WidthMismatch { left: u32, right: u32 },

    #[error("bits {bits:#b} do not fit in a selection of width {width}")]
    OutOfRange { bits: u64, width: u32 },

    /// Consecutive selections must differ by one cleared and one set bit.
    #[error("expected a single replacement, found {removed} removed and {added} added")]
    NotSingleReplacement { removed: u32, added: u32 },
}

/// Failures of the incremental inversion engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("initial submatrix is singular")]
    Singular,

    #[error("universe matrix is {rows}x{cols} but the selection has width {width}")]
    DimensionMismatch { rows: usize, cols: usize, width: u32 },

    #[error("item {0} is not in the active selection")]
    NotSelected(usize),

    #[error("item {0} is already in the active selection")]
    AlreadySelected(usize),

    #[error("item {pos} is outside a universe of {width} items")]
    OutOfUniverse { pos: usize, width: usize },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Failures that stop a benchmark run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
