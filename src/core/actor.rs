use bevy::math::IVec2;
use tracing::trace;

use crate::core::events::{Easing, PresentationEvent};
use crate::core::models::{ActorId, Layer, TileKind};
use crate::core::tile::{Positioned, Tile};
use crate::core::world::World;

/// A tile that can move around and push walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    tile: Tile,
}

impl Actor {
    pub fn new(position: IVec2, kind: TileKind) -> Actor {
        Actor {
            tile: Tile::new(position, kind),
        }
    }

    pub fn set_frame(&mut self, frame: u32) {
        self.tile.frame = frame;
    }

    fn set_position(&mut self, position: IVec2) {
        self.tile.position = position;
    }
}

impl Positioned for Actor {
    fn position(&self) -> IVec2 {
        self.tile.position
    }

    fn kind(&self) -> TileKind {
        self.tile.kind
    }

    fn frame(&self) -> u32 {
        self.tile.frame
    }
}

impl World {
    /// Moves an actor one step by `delta`, pushing any wall in the way.
    /// Only actor-layer tiles move; water stays where it was seeded.
    ///
    /// Every check on the mover runs before anything changes. A pushed wall
    /// moves first and the mover follows, so a blocked chain leaves the
    /// whole map untouched. Returns whether the actor moved.
    pub fn move_actor(&mut self, id: ActorId, delta: IVec2, frame: Option<u32>) -> bool {
        let Some(&mover) = self.actor(id) else {
            return false;
        };
        if mover.layer() != Layer::Actor {
            trace!(actor = id.0, "move rejected: not on the actor layer");
            return false;
        }
        let from = mover.position();
        let destination = from + delta;

        if !self.is_street_at(&destination) {
            trace!(x = destination.x, y = destination.y, "move rejected: not a street");
            return false;
        }

        if self.is_water_at(&destination) {
            trace!(x = destination.x, y = destination.y, "move rejected: water");
            return false;
        }

        if let Some(blocker) = self.map().occupant(Layer::Actor, &destination) {
            let blocker_is_wall = self.actor(blocker).is_some_and(Positioned::is_wall);
            if blocker_is_wall {
                if mover.is_wall() {
                    trace!(x = destination.x, y = destination.y, "move rejected: walls cannot push walls");
                    return false;
                }
                if !self.move_actor(blocker, delta, None) {
                    return false;
                }
            } else {
                trace!(x = destination.x, y = destination.y, "move rejected: occupied");
                return false;
            }
        }

        self.commit_move(id, from, destination, frame);
        true
    }

    fn commit_move(&mut self, id: ActorId, from: IVec2, to: IVec2, frame: Option<u32>) {
        let metrics = self.metrics();
        let duration = self.config().move_tween();
        let elapsed_secs = self.elapsed_secs_ceil();

        let Some(actor) = self.actor_mut(id) else {
            return;
        };
        actor.set_position(to);
        if let Some(frame) = frame {
            actor.set_frame(frame);
        }
        let actor = *actor;

        self.map_mut().move_occupant(actor.layer(), &from, to);
        self.emit(PresentationEvent::Animate {
            actor: id,
            frame: actor.frame(),
            target: metrics.screen_position(to),
            duration,
            easing: Easing::Linear,
        });

        if actor.is_wall() {
            self.set_last_wall_movement(elapsed_secs);
        }
        trace!(actor = id.0, x = to.x, y = to.y, "actor moved");
    }
}
