use bevy::math::IVec2;

use crate::core::models::{ActorId, Layer};
use crate::core::sparse_grid::SparseGrid;
use crate::core::tile::Tile;

/// Occupancy of every layer. Ground tiles are stored by value; the upper
/// layers only hold handles into the world's actor list.
#[derive(Clone, Debug, Default)]
pub struct TileMap {
    ground: SparseGrid<Tile>,
    actors: SparseGrid<ActorId>,
    water: SparseGrid<ActorId>,
}

impl TileMap {
    pub fn new() -> TileMap {
        TileMap::default()
    }

    pub fn ground(&self, pos: &IVec2) -> Option<&Tile> {
        self.ground.get(pos)
    }

    pub fn set_ground(&mut self, tile: Tile) {
        self.ground.set(tile.position, tile);
    }

    pub fn ground_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.ground.iter().map(|(_, tile)| tile)
    }

    /// Actor layers only; the ground holds tiles, not actors.
    fn layer(&self, layer: Layer) -> Option<&SparseGrid<ActorId>> {
        match layer {
            Layer::Ground => None,
            Layer::Actor => Some(&self.actors),
            Layer::Water => Some(&self.water),
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> Option<&mut SparseGrid<ActorId>> {
        match layer {
            Layer::Ground => None,
            Layer::Actor => Some(&mut self.actors),
            Layer::Water => Some(&mut self.water),
        }
    }

    pub fn occupant(&self, layer: Layer, pos: &IVec2) -> Option<ActorId> {
        self.layer(layer).and_then(|grid| grid.get(pos)).copied()
    }

    pub fn place(&mut self, layer: Layer, pos: IVec2, actor: ActorId) -> bool {
        let Some(grid) = self.layer_mut(layer) else {
            return false;
        };
        grid.set(pos, actor);
        true
    }

    pub fn move_occupant(&mut self, layer: Layer, from: &IVec2, to: IVec2) -> bool {
        self.layer_mut(layer)
            .is_some_and(|grid| grid.relocate(from, to))
    }

    pub fn occupied_count(&self, layer: Layer) -> usize {
        match layer {
            Layer::Ground => self.ground.len(),
            _ => self.layer(layer).map_or(0, SparseGrid::len),
        }
    }
}
