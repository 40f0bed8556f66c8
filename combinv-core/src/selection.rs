use crate::error::SelectionError;
use std::fmt;

/// Largest universe a selection can describe.
pub const MAX_ITEMS: u32 = u64::BITS;

/// A subset of a fixed-width universe, stored as a bitmask.
/// Bit `i` set means universe item `i` is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    bits: u64,
    width: u32,
}

/// The single item swap that turns one selection into the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub removed: usize,
    pub added: usize,
}

impl Replacement {
    /// The swap that undoes this one.
    pub fn reversed(self) -> Self {
        Self {
            removed: self.added,
            added: self.removed,
        }
    }
}

impl Selection {
    pub fn new(bits: u64, width: u32) -> Result<Self, SelectionError> {
        if width > MAX_ITEMS || (width < MAX_ITEMS && bits >> width != 0) {
            return Err(SelectionError::OutOfRange { bits, width });
        }
        Ok(Self { bits, width })
    }

    pub(crate) fn from_raw(bits: u64, width: u32) -> Self {
        debug_assert!(width == MAX_ITEMS || bits >> width == 0);
        Self { bits, width }
    }

    /// Selection containing exactly the given universe positions.
    ///
    /// `width` is capped at [`MAX_ITEMS`], like [`Selection::new`].
    pub fn from_positions(positions: &[usize], width: u32) -> Result<Self, SelectionError> {
        if width > MAX_ITEMS {
            return Err(SelectionError::OutOfRange { bits: 0, width });
        }
        let mut bits = 0u64;
        for &pos in positions {
            if pos >= width as usize {
                return Err(SelectionError::OutOfRange {
                    bits: 1u64.checked_shl(pos as u32).unwrap_or(0),
                    width,
                });
            }
            bits |= 1 << pos;
        }
        Ok(Self { bits, width })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Size of the universe this selection is drawn from.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos < self.width as usize && self.bits & (1 << pos) != 0
    }

    /// Selected universe positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width as usize).filter(move |&pos| self.contains(pos))
    }

    /// Place `high` above `low`: the result has width `high.width + low.width`
    /// and `low` occupies the least significant bits.
    pub fn concat(high: Selection, low: Selection) -> Result<Self, SelectionError> {
        let width = high.width + low.width;
        let bits = high.bits.checked_shl(low.width).unwrap_or(0) | low.bits;
        if width > MAX_ITEMS || (high.bits != 0 && bits >> low.width != high.bits) {
            return Err(SelectionError::OutOfRange { bits: high.bits, width });
        }
        Ok(Self { bits, width })
    }

    /// The swap leading from `self` to `next`, or `None` if they are equal.
    ///
    /// Anything other than one cleared bit plus one set bit is a broken
    /// enumeration and is reported as `NotSingleReplacement`.
    pub fn replacement_to(&self, next: &Selection) -> Result<Option<Replacement>, SelectionError> {
        if self.width != next.width {
            return Err(SelectionError::WidthMismatch {
                left: self.width,
                right: next.width,
            });
        }
        let removed = self.bits & !next.bits;
        let added = next.bits & !self.bits;
        match (removed.count_ones(), added.count_ones()) {
            (0, 0) => Ok(None),
            (1, 1) => Ok(Some(Replacement {
                removed: removed.trailing_zeros() as usize,
                added: added.trailing_zeros() as usize,
            })),
            (r, a) => Err(SelectionError::NotSingleReplacement { removed: r, added: a }),
        }
    }
}

impl fmt::Display for Selection {
    /// Most significant item first, zero-padded to the universe width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.width as usize)
    }
}
