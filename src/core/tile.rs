use bevy::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::core::models::{Layer, TileKind};

/// How grid coordinates are laid out on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    Isometric,
    Flat,
}

/// Fixed tile dimensions and the screen position of grid cell 0,0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileMetrics {
    pub tile_width: f32,
    pub tile_height: f32,
    pub origin: Vec2,
    pub projection: Projection,
}

impl TileMetrics {
    pub fn iso(&self, pos: IVec2) -> Vec2 {
        let half_width = self.tile_width / 2.0;
        let quarter_height = self.tile_height / 4.0;
        Vec2 {
            x: self.origin.x + (pos.x - pos.y) as f32 * half_width,
            y: self.origin.y + (pos.x + pos.y) as f32 * quarter_height,
        }
    }

    pub fn flat(&self, pos: IVec2) -> Vec2 {
        Vec2 {
            x: self.origin.x + pos.x as f32 * self.tile_width,
            y: self.origin.y + pos.y as f32 * self.tile_height,
        }
    }

    pub fn screen_position(&self, pos: IVec2) -> Vec2 {
        match self.projection {
            Projection::Isometric => self.iso(pos),
            Projection::Flat => self.flat(pos),
        }
    }

    /// Inverse of `screen_position`, snapping to the nearest cell.
    pub fn grid_from_screen(&self, screen: Vec2) -> IVec2 {
        let local = screen - self.origin;
        match self.projection {
            Projection::Isometric => {
                let diff = local.x / (self.tile_width / 2.0);
                let sum = local.y / (self.tile_height / 4.0);
                IVec2 {
                    x: ((sum + diff) / 2.0).round() as i32,
                    y: ((sum - diff) / 2.0).round() as i32,
                }
            }
            Projection::Flat => IVec2 {
                x: (local.x / self.tile_width).floor() as i32,
                y: (local.y / self.tile_height).floor() as i32,
            },
        }
    }
}

/// Anything that sits on the map: scenery tiles and actors alike.
pub trait Positioned {
    fn position(&self) -> IVec2;
    fn kind(&self) -> TileKind;
    fn frame(&self) -> u32;

    fn layer(&self) -> Layer {
        self.kind().layer()
    }

    fn iso_x(&self, metrics: &TileMetrics) -> f32 {
        metrics.iso(self.position()).x
    }

    fn iso_y(&self, metrics: &TileMetrics) -> f32 {
        metrics.iso(self.position()).y
    }

    fn is_street(&self) -> bool {
        matches!(self.kind(), TileKind::Street | TileKind::Intersection)
    }

    fn is_wall(&self) -> bool {
        self.kind() == TileKind::Barricade
    }

    fn is_water(&self) -> bool {
        self.kind() == TileKind::Water
    }
}

/// An empty cell is never a street, a wall or water.
pub fn is_street<T: Positioned>(cell: Option<&T>) -> bool {
    cell.is_some_and(Positioned::is_street)
}

pub fn is_wall<T: Positioned>(cell: Option<&T>) -> bool {
    cell.is_some_and(Positioned::is_wall)
}

pub fn is_water<T: Positioned>(cell: Option<&T>) -> bool {
    cell.is_some_and(Positioned::is_water)
}

/// Static scenery on the ground layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub position: IVec2,
    pub kind: TileKind,
    pub frame: u32,
}

impl Tile {
    pub fn new(position: IVec2, kind: TileKind) -> Tile {
        Tile {
            position,
            kind,
            frame: kind.default_frame(),
        }
    }

    /// Streets get a buildable slot on every second tile; the rest are intersections.
    pub fn street_at(position: IVec2) -> Tile {
        if position.x % 2 != 0 || position.y % 2 != 0 {
            Tile::new(position, TileKind::Street)
        } else {
            Tile::new(position, TileKind::Intersection)
        }
    }
}

impl Positioned for Tile {
    fn position(&self) -> IVec2 {
        self.position
    }

    fn kind(&self) -> TileKind {
        self.kind
    }

    fn frame(&self) -> u32 {
        self.frame
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn metrics(projection: Projection) -> TileMetrics {
        TileMetrics {
            tile_width: 40.0,
            tile_height: 40.0,
            origin: Vec2::new(220.0, 180.0),
            projection,
        }
    }

    #[test]
    fn test_iso_projection() {
        let m = metrics(Projection::Isometric);
        assert_eq!(m.iso(IVec2::new(0, 0)), Vec2::new(220.0, 180.0));
        assert_eq!(m.iso(IVec2::new(1, 0)), Vec2::new(240.0, 190.0));
        assert_eq!(m.iso(IVec2::new(0, 1)), Vec2::new(200.0, 190.0));
        assert_eq!(m.iso(IVec2::new(2, 2)), Vec2::new(220.0, 220.0));
    }

    #[test]
    fn test_tile_iso_coordinates() {
        let m = metrics(Projection::Isometric);
        let tile = Tile::street_at(IVec2::new(3, 1));
        assert_eq!(tile.iso_x(&m), m.iso(IVec2::new(3, 1)).x);
        assert_eq!(tile.iso_y(&m), m.iso(IVec2::new(3, 1)).y);
        assert_eq!((tile.iso_x(&m), tile.iso_y(&m)), (260.0, 220.0));
    }

    #[test]
    fn test_screen_round_trips_to_grid() {
        for projection in [Projection::Isometric, Projection::Flat] {
            let m = metrics(projection);
            for x in -3..8 {
                for y in -3..8 {
                    let pos = IVec2::new(x, y);
                    assert_eq!(m.grid_from_screen(m.screen_position(pos)), pos, "{:?}", projection);
                }
            }
        }
    }

    #[test]
    fn test_flat_tap_inside_tile_maps_to_tile() {
        let m = metrics(Projection::Flat);
        assert_eq!(m.grid_from_screen(Vec2::new(220.0 + 3.0 * 40.0 + 39.0, 180.0 + 5.0)), IVec2::new(3, 0));
    }

    #[test]
    fn test_street_parity() {
        assert_eq!(Tile::street_at(IVec2::new(0, 0)).kind, TileKind::Intersection);
        assert_eq!(Tile::street_at(IVec2::new(2, 4)).kind, TileKind::Intersection);
        assert_eq!(Tile::street_at(IVec2::new(1, 0)).kind, TileKind::Street);
        assert_eq!(Tile::street_at(IVec2::new(2, 3)).kind, TileKind::Street);
        assert!(Tile::street_at(IVec2::new(2, 2)).is_street());
    }

    #[test]
    fn test_absent_cells_satisfy_no_predicate() {
        let empty: Option<&Tile> = None;
        assert!(!is_street(empty));
        assert!(!is_wall(empty));
        assert!(!is_water(empty));

        let building = Tile::new(IVec2::ZERO, TileKind::Building);
        assert!(!is_street(Some(&building)));
        assert!(!is_wall(Some(&building)));
    }
}
