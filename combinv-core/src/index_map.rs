use crate::error::EngineError;
use crate::selection::{Replacement, Selection};

/// Bidirectional map between universe positions and the row/column slots of
/// the active submatrix.
///
/// Positions outside the active selection map to `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMap {
    /// Universe position -> local slot.
    forward: Vec<Option<usize>>,
    /// Local slot -> universe position.
    backward: Vec<usize>,
}

impl IndexMap {
    /// Assign local slots to the selected positions in ascending order.
    pub fn from_selection(selection: &Selection) -> Self {
        let mut forward = vec![None; selection.width() as usize];
        let mut backward = Vec::with_capacity(selection.len());
        for pos in selection.iter() {
            forward[pos] = Some(backward.len());
            backward.push(pos);
        }
        Self { forward, backward }
    }

    /// Local slot of a universe position, if it is selected.
    pub fn local(&self, pos: usize) -> Option<usize> {
        self.forward.get(pos).copied().flatten()
    }

    /// Universe position held by a local slot.
    pub fn universe(&self, slot: usize) -> usize {
        self.backward[slot]
    }

    /// Local slot -> universe position, for every slot.
    pub fn backward(&self) -> &[usize] {
        &self.backward
    }

    /// Size of the active submatrix.
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// Hand the slot of `removed` over to `added`. Returns that slot.
    pub fn swap(&mut self, replacement: Replacement) -> Result<usize, EngineError> {
        let Replacement { removed, added } = replacement;
        let slot = self.local(removed).ok_or(EngineError::NotSelected(removed))?;
        match self.forward.get(added) {
            None => {
                let width = self.forward.len();
                return Err(EngineError::OutOfUniverse { pos: added, width });
            }
            Some(Some(_)) => return Err(EngineError::AlreadySelected(added)),
            Some(None) => {}
        }
        self.forward[removed] = None;
        self.forward[added] = Some(slot);
        self.backward[slot] = added;
        Ok(slot)
    }

    /// Every selected position round-trips through both maps, and no
    /// unselected position claims a slot.
    pub fn is_consistent(&self) -> bool {
        let assigned = self.forward.iter().filter(|slot| slot.is_some()).count();
        assigned == self.backward.len()
            && self
                .backward
                .iter()
                .enumerate()
                .all(|(slot, &pos)| self.local(pos) == Some(slot))
    }

    /// The selection described by the map.
    pub fn selection(&self) -> Selection {
        let bits = self.backward.iter().fold(0u64, |acc, &pos| acc | 1 << pos);
        Selection::from_raw(bits, self.forward.len() as u32)
    }
}
