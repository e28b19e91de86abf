use bevy::math::IVec2;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: IVec2,
}

impl BoundsOriginRoot {
    pub fn new(width: i32, height: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: IVec2 { x: width, y: height },
        }
    }

    pub fn width(&self) -> i32 {
        self.extent.x
    }

    pub fn height(&self) -> i32 {
        self.extent.y
    }

    pub fn contains(&self, pos: &IVec2) -> bool {
        pos.x >= 0 && pos.x < self.extent.x && pos.y >= 0 && pos.y < self.extent.y
    }

    /// true for cells on the outermost ring
    pub fn is_edge(&self, pos: &IVec2) -> bool {
        self.contains(pos)
            && (pos.x == 0 || pos.y == 0 || pos.x == self.extent.x - 1 || pos.y == self.extent.y - 1)
    }

    pub fn area(&self) -> i32 {
        self.extent.x * self.extent.y
    }

    /// Every position inside the bounds, column by column.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let extent = self.extent;
        (0..extent.x).flat_map(move |x| (0..extent.y).map(move |y| IVec2 { x, y }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_edge_detection() {
        let bounds = BoundsOriginRoot::new(5, 3);
        assert!(bounds.is_edge(&IVec2::new(0, 1)));
        assert!(bounds.is_edge(&IVec2::new(4, 1)));
        assert!(bounds.is_edge(&IVec2::new(2, 2)));
        assert!(!bounds.is_edge(&IVec2::new(2, 1)));
        assert!(!bounds.is_edge(&IVec2::new(5, 1)));
    }

    #[test]
    fn test_iter_visits_area() {
        let bounds = BoundsOriginRoot::new(4, 3);
        assert_eq!(bounds.iter().count(), bounds.area() as usize);
        assert!(bounds.iter().all(|p| bounds.contains(&p)));
    }
}
