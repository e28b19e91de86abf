use std::time::Duration;

use bevy::math::{IVec2, Vec2};

use crate::core::models::{ActorId, GamePhase, Layer};

/// Display groups, in the order the host should stack them by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderGroup {
    Streets,
    Buildings,
    Scene,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
}

/// Requests the core hands to whatever is drawing the game. None of them
/// are awaited; the logical state has already changed when they are emitted.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
    SpawnTile {
        actor: Option<ActorId>,
        position: IVec2,
        layer: Layer,
        frame: u32,
        screen: Vec2,
        group: RenderGroup,
    },
    Animate {
        actor: ActorId,
        frame: u32,
        target: Vec2,
        duration: Duration,
        easing: Easing,
    },
    BringToTop(RenderGroup),
    BarricadesChanged(u32),
    StreetsDisabled,
    PhaseChanged(GamePhase),
}
