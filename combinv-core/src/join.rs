//! Nested composition of two Gray-code generators.
//!
//! The large generator moves on every call; the small one moves once per full
//! sweep of the large one. That move lands on the call where the large
//! generator turns around and repeats its value, so each emitted selection
//! still differs from the previous one by a single swapped item.

use crate::error::ConfigError;
use crate::gray::{GeneratorConfig, GrayGenerator};
use crate::selection::{Selection, MAX_ITEMS};

/// Parameters of the two joined generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinConfig {
    /// Occupies the low bits of the joined universe.
    pub large: GeneratorConfig,
    /// Occupies the bits above the large universe.
    pub small: GeneratorConfig,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            large: GeneratorConfig { size: 7, pick: 4 },
            small: GeneratorConfig { size: 4, pick: 3 },
        }
    }
}

impl JoinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.large.validate()?;
        self.small.validate()?;
        let width = self.universe_size() as u32;
        if width > MAX_ITEMS {
            return Err(ConfigError::UniverseTooLarge {
                width,
                max: MAX_ITEMS,
            });
        }
        Ok(())
    }

    /// Items in the joined universe.
    pub fn universe_size(&self) -> usize {
        (self.large.size + self.small.size) as usize
    }

    /// Items in every joined selection.
    pub fn pick(&self) -> usize {
        (self.large.pick + self.small.pick) as usize
    }

    /// Distinct joined selections before the sequence starts repeating.
    pub fn combinations(&self) -> u64 {
        self.large.combinations() * self.small.combinations()
    }
}

/// Two generators joined into one selection over a combined universe.
#[derive(Clone, Debug)]
pub struct GrayJoin {
    small: GrayGenerator,
    large: GrayGenerator,
    count: u64,
}

impl GrayJoin {
    pub fn new(config: JoinConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            small: GrayGenerator::new(config.small)?,
            large: GrayGenerator::new(config.large)?,
            count: 0,
        })
    }

    /// Return the current joined selection, then advance.
    pub fn next_selection(&mut self) -> Selection {
        let bits = self.small.value() << self.large.size() | self.large.value();
        let current = Selection::from_raw(bits, self.large.size() + self.small.size());
        self.count += 1;
        if self.count % self.large.combinations() == 0 {
            self.small.advance();
        }
        self.large.advance();
        current
    }

    /// Number of selections returned so far.
    pub fn emitted(&self) -> u64 {
        self.count
    }

    /// Distinct joined selections in one pass.
    pub fn combinations(&self) -> u64 {
        self.large.combinations() * self.small.combinations()
    }
}

impl Iterator for GrayJoin {
    type Item = Selection;

    fn next(&mut self) -> Option<Selection> {
        Some(self.next_selection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_counts() {
        let config = JoinConfig::default();
        assert_eq!(config.large.combinations(), 35);
        assert_eq!(config.small.combinations(), 4);
        assert_eq!(config.combinations(), 140);
        assert_eq!(config.universe_size(), 11);
        assert_eq!(config.pick(), 7);
    }

    #[test]
    fn test_first_pass_is_distinct_single_replacements() {
        let selections: Vec<Selection> = GrayJoin::new(JoinConfig::default())
            .unwrap()
            .take(140)
            .collect();
        assert_eq!(selections.iter().collect::<HashSet<_>>().len(), 140);
        for s in &selections {
            assert_eq!(s.len(), 7);
            assert_eq!(s.width(), 11);
        }
        for pair in selections.windows(2) {
            let r = pair[0].replacement_to(&pair[1]).unwrap();
            assert!(r.is_some(), "{} repeated", pair[0]);
        }
    }

    #[test]
    fn test_small_advances_once_per_large_sweep() {
        let mut join = GrayJoin::new(JoinConfig::default()).unwrap();
        let small_parts: Vec<u64> = (0..140).map(|_| join.next_selection().bits() >> 7).collect();
        let changes: Vec<usize> = (1..small_parts.len())
            .filter(|&i| small_parts[i] != small_parts[i - 1])
            .collect();
        // Calls are 1-based: the small part changes on calls 36, 71 and 106.
        assert_eq!(changes, vec![35, 70, 105]);
        assert_eq!(join.emitted(), 140);
    }

    #[test]
    fn test_boundary_call_changes_only_small_part() {
        let mut join = GrayJoin::new(JoinConfig::default()).unwrap();
        let selections: Vec<Selection> = (0..37).map(|_| join.next_selection()).collect();
        let large_mask = (1u64 << 7) - 1;
        assert_eq!(selections[34].bits() & large_mask, selections[35].bits() & large_mask);
        assert_ne!(selections[34].bits() >> 7, selections[35].bits() >> 7);
        assert_eq!(selections[35].bits() >> 7, selections[36].bits() >> 7);
    }

    #[test]
    fn test_generator_limits() {
        let config = JoinConfig {
            large: GeneratorConfig { size: 32, pick: 2 },
            small: GeneratorConfig { size: 32, pick: 2 },
        };
        assert!(config.validate().is_ok());
        let config = JoinConfig {
            large: GeneratorConfig { size: 33, pick: 2 },
            small: GeneratorConfig { size: 4, pick: 2 },
        };
        assert!(config.validate().is_err());
    }
}
