use std::collections::HashMap;
use bevy::math::IVec2;

/// An unbounded grid. Cells that were never written read back as `None`.
#[derive(Clone, Debug)]
pub struct SparseGrid<T> {
    cells: HashMap<IVec2, T>,
}

impl<T> Default for SparseGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseGrid<T> {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    pub fn set(&mut self, pos: IVec2, value: T) -> Option<T> {
        self.cells.insert(pos, value)
    }

    pub fn get(&self, pos: &IVec2) -> Option<&T> {
        self.cells.get(pos)
    }

    pub fn remove(&mut self, pos: &IVec2) -> Option<T> {
        self.cells.remove(pos)
    }

    pub fn contains(&self, pos: &IVec2) -> bool {
        self.cells.contains_key(pos)
    }

    /// Moves whatever is stored at `from` to `to`, overwriting `to`.
    /// Returns false when `from` was empty.
    pub fn relocate(&mut self, from: &IVec2, to: IVec2) -> bool {
        let Some(value) = self.cells.remove(from) else {
            return false;
        };
        self.cells.insert(to, value);
        true
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IVec2, &T)> {
        self.cells.iter()
    }
}
