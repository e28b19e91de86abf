use bevy::math::IVec2;
use crate::core::{GameChangeType, World};

pub struct GameRenderState<'a> {
    pub world: &'a World,
    pub cursor: IVec2,
    pub last_change: Option<GameChangeType>,
}
