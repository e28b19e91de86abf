mod actor;
mod bounded_grid;
mod bounds;
mod consts;
mod events;
mod flood;
mod level;
mod map;
mod models;
mod sparse_grid;
mod tile;
mod update;
mod world;

pub use actor::Actor;
pub use bounded_grid::BoundedGrid;
pub use bounds::BoundsOriginRoot;
pub use consts::*;
pub use events::{Easing, PresentationEvent, RenderGroup};
pub use flood::{border_seed_positions, FloodTimer};
pub use level::{Level, LevelEntry, LevelError};
pub use map::TileMap;
pub use models::{ActorId, Direction, GameChangeType, GamePhase, GameUpdate, Layer, Terrain, TileKind, UserAction};
pub use sparse_grid::SparseGrid;
pub use tile::{Positioned, Projection, Tile, TileMetrics};
pub use update::step;
pub use world::World;
