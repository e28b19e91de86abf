use bevy::math::{IVec2, Vec2};
use std::time::Duration;

use crate::core::consts::*;

/// A terrain value of the level array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Building,
    Street,
    Barricade,
    WaterBorder,
}

impl Terrain {
    pub fn code(self) -> u8 {
        match self {
            Terrain::Building => 0,
            Terrain::Street => 1,
            Terrain::Barricade => 2,
            Terrain::WaterBorder => 3,
        }
    }

    /// Anything but a building has a street underneath it.
    pub fn has_street(self) -> bool {
        self != Terrain::Building
    }
}

impl TryFrom<u8> for Terrain {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Terrain::Building),
            1 => Ok(Terrain::Street),
            2 => Ok(Terrain::Barricade),
            3 => Ok(Terrain::WaterBorder),
            other => Err(other),
        }
    }
}

impl From<Terrain> for u8 {
    fn from(value: Terrain) -> Self {
        value.code()
    }
}

/// The z coordinate of a tile. The dozer and walls share `Actor`, water sits
/// above them on its own layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Ground = 0,
    Actor = 1,
    Water = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Building,
    Street,
    Intersection,
    Barricade,
    Dozer,
    Water,
}

impl TileKind {
    pub fn layer(self) -> Layer {
        match self {
            TileKind::Building | TileKind::Street | TileKind::Intersection => Layer::Ground,
            TileKind::Barricade | TileKind::Dozer => Layer::Actor,
            TileKind::Water => Layer::Water,
        }
    }

    pub fn default_frame(self) -> u32 {
        match self {
            TileKind::Building => FRAME_BUILDING,
            TileKind::Street | TileKind::Intersection => FRAME_STREET,
            TileKind::Barricade => FRAME_BARRICADE,
            TileKind::Dozer => FRAME_DOZER_DOWN,
            TileKind::Water => FRAME_WATER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2 { x: 0, y: -1 },
            Direction::Down => IVec2 { x: 0, y: 1 },
            Direction::Left => IVec2 { x: -1, y: 0 },
            Direction::Right => IVec2 { x: 1, y: 0 },
        }
    }

    pub fn dozer_frame(self) -> u32 {
        match self {
            Direction::Up => FRAME_DOZER_UP,
            Direction::Down => FRAME_DOZER_DOWN,
            Direction::Left => FRAME_DOZER_LEFT,
            Direction::Right => FRAME_DOZER_RIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UserAction {
    Move(Direction),
    BuildBarricade(IVec2),
    /// A tap or click at a screen position.
    Tap(Vec2),
    Tick(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Building,
    Flooding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    DozerMove,
    DozerAndWallMove,
    BarricadeBuilt,
    FloodStarted,
    TimePassed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    Changed(GameChangeType),
    Ignored,
}
