//! Minimal-change enumeration of k-subsets.
//!
//! Walks the binary reflected Gray code and keeps only the codes with exactly
//! `pick` bits set. Consecutive kept codes differ in two bits: one item leaves
//! the subset and another one enters. On reaching either end of the code
//! space the walk turns around and replays the sequence backwards.

use crate::error::ConfigError;
use crate::selection::Selection;

/// Largest universe an enumerator will scan (the raw index runs up to `2^size`).
pub const MAX_GENERATOR_SIZE: u32 = 32;

/// Binary to Gray code.
pub fn gray(index: u64) -> u64 {
    index ^ (index >> 1)
}

/// Number of `pick`-subsets of a `size`-set.
pub fn binomial(size: u32, pick: u32) -> u64 {
    if pick > size {
        return 0;
    }
    let pick = pick.min(size - pick) as u64;
    let size = size as u64;
    // Each partial product is itself a binomial coefficient, so the division is exact.
    (0..pick).fold(1u64, |acc, i| acc * (size - i) / (i + 1))
}

/// Parameters of a single enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub size: u32,
    pub pick: u32,
}

impl GeneratorConfig {
    pub fn new(size: u32, pick: u32) -> Result<Self, ConfigError> {
        let config = Self { size, pick };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size > MAX_GENERATOR_SIZE {
            return Err(ConfigError::SizeTooLarge {
                size: self.size,
                max: MAX_GENERATOR_SIZE,
            });
        }
        if self.pick == 0 || self.pick >= self.size {
            return Err(ConfigError::InvalidPick {
                size: self.size,
                pick: self.pick,
            });
        }
        Ok(())
    }

    pub fn combinations(&self) -> u64 {
        binomial(self.size, self.pick)
    }
}

/// Scan direction of the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Gray-code combination generator.
#[derive(Clone, Debug)]
pub struct GrayGenerator {
    config: GeneratorConfig,
    index: u64,
    direction: Direction,
    combinations: u64,
}

impl GrayGenerator {
    /// Create a generator positioned on the first valid combination.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut generator = Self {
            config,
            index: 0,
            direction: Direction::Forward,
            combinations: config.combinations(),
        };
        // Index 0 is the empty set; move to the first code with `pick` bits.
        generator.advance();
        Ok(generator)
    }

    /// Move to the next index whose Gray code has `pick` bits set.
    ///
    /// Reaching `2^size` while scanning forward, or `0` while scanning in
    /// reverse, only flips the direction: the index (and so the current
    /// value) stays put for that call.
    pub fn advance(&mut self) {
        let end = 1u64 << self.config.size;
        let mut next = self.index;
        match self.direction {
            Direction::Forward => loop {
                next += 1;
                if next == end {
                    self.direction = Direction::Reverse;
                    break;
                }
                if self.accepts(next) {
                    self.index = next;
                    break;
                }
            },
            Direction::Reverse => loop {
                next -= 1;
                if next == 0 {
                    self.direction = Direction::Forward;
                    break;
                }
                if self.accepts(next) {
                    self.index = next;
                    break;
                }
            },
        }
    }

    fn accepts(&self, index: u64) -> bool {
        gray(index).count_ones() == self.config.pick
    }

    /// The current Gray code as a bitmask.
    pub fn value(&self) -> u64 {
        gray(self.index)
    }

    /// The current combination as a selection over `size` items.
    pub fn selection(&self) -> Selection {
        // `index < 2^size`, so the code fits in `size` bits.
        Selection::from_raw(self.value(), self.config.size)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn size(&self) -> u32 {
        self.config.size
    }

    pub fn pick(&self) -> u32 {
        self.config.pick
    }

    /// Number of distinct combinations, i.e. the length of one sweep.
    pub fn combinations(&self) -> u64 {
        self.combinations
    }
}
