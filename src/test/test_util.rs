use bevy::math::IVec2;
pub use dissimilar::diff as __diff;
use crate::config::GameConfig;
use crate::console_interface::{parse_level, render_level_codes, render_world_to_string};
use crate::core::{step, ActorId, Direction, GameUpdate, Layer, Positioned, UserAction, World};

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

pub struct GameTestState {
    pub world: World,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        Self::with_config(level, GameConfig::default())
    }

    pub fn with_config(level: &str, config: GameConfig) -> Self {
        let mut world = World::new(parse_level(level), config);
        world.drain_events();
        Self { world }
    }

    pub fn game_to_string(&self) -> String {
        render_world_to_string(&self.world).trim_matches('\n').into()
    }

    pub fn assert_move(&mut self, direction: Direction) -> GameUpdate {
        self.assert_step(UserAction::Move(direction))
    }

    pub fn assert_moves(&mut self, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(dir);
        }
    }

    pub fn assert_step(&mut self, action: UserAction) -> GameUpdate {
        let update = step(&mut self.world, action);
        if update == GameUpdate::Ignored {
            panic!("Expected a change from {:?}, in map\n{}", action, self.game_to_string());
        }
        update
    }

    pub fn try_step(&mut self, action: UserAction) -> GameUpdate {
        step(&mut self.world, action)
    }

    pub fn assert_matches(&self, expected: &str) {
        let actual = self.game_to_string();
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }

    pub fn assert_level_codes(&self, expected: &str) {
        let actual = render_level_codes(self.world.level());
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }

    pub fn dozer_position(&self) -> IVec2 {
        let dozer = self.world.dozer().expect("level has no dozer");
        self.position_of(dozer)
    }

    pub fn position_of(&self, id: ActorId) -> IVec2 {
        self.world.actor(id).expect("unknown actor").position()
    }

    pub fn wall_at(&self, pos: IVec2) -> ActorId {
        let id = self.world.map().occupant(Layer::Actor, &pos).expect("no actor there");
        assert!(self.world.is_wall_at(&pos), "actor at {:?} is not a wall", pos);
        id
    }
}
