use std::time::Duration;

use bevy::math::IVec2;
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::core::actor::Actor;
use crate::core::events::{PresentationEvent, RenderGroup};
use crate::core::flood::FloodTimer;
use crate::core::level::Level;
use crate::core::map::TileMap;
use crate::core::models::{ActorId, Direction, GamePhase, Layer, Terrain, TileKind};
use crate::core::tile::{self, Positioned, Tile, TileMetrics};

/// Everything a running level needs. The host loop owns one and passes it
/// by reference into every operation.
#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    initial_level: Level,
    level: Level,
    map: TileMap,
    actors: Vec<Actor>,
    dozer: Option<ActorId>,
    phase: GamePhase,
    timer: FloodTimer,
    clock: Duration,
    barricades: u32,
    last_wall_movement: Option<u64>,
    events: Vec<PresentationEvent>,
}

impl World {
    pub fn new(level: Level, config: GameConfig) -> World {
        let mut world = World {
            timer: FloodTimer::new(config.build_time()),
            barricades: config.barricades,
            config,
            initial_level: level.clone(),
            level,
            map: TileMap::new(),
            actors: Vec::new(),
            dozer: None,
            phase: GamePhase::Building,
            clock: Duration::ZERO,
            last_wall_movement: None,
            events: Vec::new(),
        };
        world.populate();
        world
    }

    /// Rebuilds the level from its starting terrain.
    pub fn reset(&mut self) {
        debug!("resetting level");
        *self = World::new(self.initial_level.clone(), self.config.clone());
    }

    fn populate(&mut self) {
        let terrain: Vec<(IVec2, Terrain)> = self.level.iter().collect();
        for (pos, terrain) in terrain {
            let tile = if terrain.has_street() {
                Tile::street_at(pos)
            } else {
                Tile::new(pos, TileKind::Building)
            };
            self.map.set_ground(tile);
            self.emit(PresentationEvent::SpawnTile {
                actor: None,
                position: pos,
                layer: Layer::Ground,
                frame: tile.frame,
                screen: self.metrics().screen_position(pos),
                group: if tile.is_street() { RenderGroup::Streets } else { RenderGroup::Buildings },
            });

            match terrain {
                Terrain::Barricade => {
                    self.spawn_actor(TileKind::Barricade, pos);
                }
                Terrain::WaterBorder => {
                    self.spawn_actor(TileKind::Water, pos);
                }
                Terrain::Building | Terrain::Street => {}
            }
        }

        if let Some(start) = self.level.dozer_start() {
            if self.map.occupant(Layer::Actor, &start).is_none() {
                self.dozer = Some(self.spawn_actor(TileKind::Dozer, start));
            }
        }
        debug!(
            width = self.level.width(),
            height = self.level.height(),
            actors = self.actors.len(),
            "world populated"
        );
    }

    pub(crate) fn spawn_actor(&mut self, kind: TileKind, pos: IVec2) -> ActorId {
        let id = ActorId(self.actors.len());
        let actor = Actor::new(pos, kind);
        self.actors.push(actor);
        self.map.place(actor.layer(), pos, id);
        self.emit(PresentationEvent::SpawnTile {
            actor: Some(id),
            position: pos,
            layer: actor.layer(),
            frame: actor.frame(),
            screen: self.metrics().screen_position(pos),
            group: match kind {
                TileKind::Barricade => RenderGroup::Buildings,
                TileKind::Water => RenderGroup::Water,
                _ => RenderGroup::Scene,
            },
        });
        id
    }

    /// Puts a barricade on a free street tile during the build phase.
    /// Intersections cannot hold one. Returns whether it was built.
    pub fn build_barricade(&mut self, pos: IVec2) -> bool {
        if self.phase != GamePhase::Building || self.barricades == 0 {
            trace!(x = pos.x, y = pos.y, "barricade rejected: not buildable now");
            return false;
        }
        let buildable = self.map.ground(&pos).is_some_and(|t| t.kind == TileKind::Street);
        let free = self.map.occupant(Layer::Actor, &pos).is_none() && !self.is_water_at(&pos);
        if !buildable || !free {
            trace!(x = pos.x, y = pos.y, "barricade rejected: not a free street");
            return false;
        }

        self.spawn_actor(TileKind::Barricade, pos);
        self.level.set(&pos, Terrain::Barricade);
        self.emit(PresentationEvent::BringToTop(RenderGroup::Buildings));

        self.barricades -= 1;
        self.emit(PresentationEvent::BarricadesChanged(self.barricades));
        if self.barricades == 0 {
            self.emit(PresentationEvent::StreetsDisabled);
        }
        debug!(x = pos.x, y = pos.y, remaining = self.barricades, "barricade built");
        true
    }

    pub fn move_dozer(&mut self, direction: Direction) -> bool {
        let Some(dozer) = self.dozer else {
            return false;
        };
        self.move_actor(dozer, direction.delta(), Some(direction.dozer_frame()))
    }

    /// Advances the clock and the flood timer. Returns true when this tick
    /// started the flood.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.clock += delta;
        if self.timer.tick(delta) {
            self.flood();
            return true;
        }
        false
    }

    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: PresentationEvent) {
        self.events.push(event);
    }

    pub fn is_street_at(&self, pos: &IVec2) -> bool {
        tile::is_street(self.map.ground(pos))
    }

    pub fn is_water_at(&self, pos: &IVec2) -> bool {
        tile::is_water(self.actor_at(Layer::Water, pos))
    }

    pub fn is_wall_at(&self, pos: &IVec2) -> bool {
        tile::is_wall(self.actor_at(Layer::Actor, pos))
    }

    pub fn actor_at(&self, layer: Layer, pos: &IVec2) -> Option<&Actor> {
        self.map.occupant(layer, pos).and_then(|id| self.actor(id))
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter().enumerate().map(|(i, actor)| (ActorId(i), actor))
    }

    pub fn dozer(&self) -> Option<ActorId> {
        self.dozer
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub(crate) fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub(crate) fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn metrics(&self) -> TileMetrics {
        self.config.metrics()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.emit(PresentationEvent::PhaseChanged(phase));
    }

    pub fn timer(&self) -> &FloodTimer {
        &self.timer
    }

    pub(crate) fn timer_mut(&mut self) -> &mut FloodTimer {
        &mut self.timer
    }

    pub fn barricades_left(&self) -> u32 {
        self.barricades
    }

    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn elapsed_secs_ceil(&self) -> u64 {
        self.clock.as_millis().div_ceil(1000) as u64
    }

    /// Second (rounded up) at which a wall last moved.
    pub fn last_wall_movement(&self) -> Option<u64> {
        self.last_wall_movement
    }

    pub(crate) fn set_last_wall_movement(&mut self, secs: u64) {
        self.last_wall_movement = Some(secs);
    }
}
