use bevy::math::IVec2;
use crate::core::bounds::BoundsOriginRoot;

/// Dense storage over a fixed rectangle. Lookups outside the rectangle
/// return `None` through `get`, while indexing panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area().max(0) as usize];
        BoundedGrid { bounds, cells }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &IVec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &IVec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    /// Writes `value` if `pos` is in bounds. Returns whether anything was written.
    pub fn set(&mut self, pos: &IVec2, value: T) -> bool {
        if !self.bounds.contains(pos) {
            return false;
        }
        self[pos] = value;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        self.bounds.iter().map(move |pos| (pos, &self[&pos]))
    }

    fn offset(&self, index: &IVec2) -> usize {
        (index.y * self.bounds.extent.x + index.x) as usize
    }
}

impl<T> std::ops::Index<&IVec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &IVec2) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}

impl<T> std::ops::IndexMut<&IVec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &IVec2) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}
