use tracing::trace;

use crate::core::models::{GameChangeType, GameUpdate, UserAction};
use crate::core::tile::Positioned;
use crate::core::world::World;

/// Applies one user action to the world. Rejected actions leave the world
/// untouched and come back as `GameUpdate::Ignored`.
pub fn step(world: &mut World, action: UserAction) -> GameUpdate {
    let change = match action {
        UserAction::Move(direction) => {
            let Some(dozer) = world.dozer().and_then(|id| world.actor(id)) else {
                return GameUpdate::Ignored;
            };
            let pushing = world.is_wall_at(&(dozer.position() + direction.delta()));
            if !world.move_dozer(direction) {
                return GameUpdate::Ignored;
            }
            if pushing {
                GameChangeType::DozerAndWallMove
            } else {
                GameChangeType::DozerMove
            }
        }
        UserAction::BuildBarricade(pos) => {
            if !world.build_barricade(pos) {
                return GameUpdate::Ignored;
            }
            GameChangeType::BarricadeBuilt
        }
        UserAction::Tap(screen) => {
            let pos = world.metrics().grid_from_screen(screen);
            trace!(x = pos.x, y = pos.y, "tap");
            if !world.build_barricade(pos) {
                return GameUpdate::Ignored;
            }
            GameChangeType::BarricadeBuilt
        }
        UserAction::Tick(delta) => {
            if world.advance(delta) {
                GameChangeType::FloodStarted
            } else {
                GameChangeType::TimePassed
            }
        }
    };
    GameUpdate::Changed(change)
}
