use std::time::Duration;

/// Tileset frame indices.
pub const FRAME_BUILDING: u32 = 0;
pub const FRAME_STREET: u32 = 1;
pub const FRAME_BARRICADE: u32 = 18;
pub const FRAME_WATER: u32 = 19;
pub const FRAME_DOZER_UP: u32 = 20;
pub const FRAME_DOZER_RIGHT: u32 = 21;
pub const FRAME_DOZER_DOWN: u32 = 22;
pub const FRAME_DOZER_LEFT: u32 = 23;

pub const MOVE_TWEEN: Duration = Duration::from_millis(200);
pub const BORDER_STRIDE: usize = 2;
