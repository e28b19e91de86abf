
mod test {
    use std::time::Duration;
    use bevy::math::IVec2;
    use crate::config::GameConfig;
    use crate::core::*;
    use crate::test::test_util::GameTestState;

    const CITY: &str = r#"
.....
.@...
.....
"#;

    #[test]
    fn tap_on_street_builds_barricade() {
        let mut game = GameTestState::new(CITY);
        let screen = game.world.metrics().screen_position(IVec2::new(3, 0));

        let update = game.assert_step(UserAction::Tap(screen));

        assert_eq!(update, GameUpdate::Changed(GameChangeType::BarricadeBuilt));
        assert!(game.world.is_wall_at(&IVec2::new(3, 0)));
    }

    #[test]
    fn tap_with_flat_layout_uses_tile_scaling() {
        let config = GameConfig {
            projection: Projection::Flat,
            ..GameConfig::default()
        };
        let mut game = GameTestState::with_config(CITY, config);

        // somewhere inside the tile at 3,2
        let update = game.try_step(UserAction::Tap(bevy::math::Vec2::new(220.0 + 125.0, 180.0 + 95.0)));

        assert_eq!(update, GameUpdate::Changed(GameChangeType::BarricadeBuilt));
        assert!(game.world.is_wall_at(&IVec2::new(3, 2)));
    }

    #[test]
    fn tap_outside_city_is_ignored() {
        let mut game = GameTestState::new(CITY);
        let update = game.try_step(UserAction::Tap(bevy::math::Vec2::new(-5000.0, -5000.0)));
        assert_eq!(update, GameUpdate::Ignored);
        assert_eq!(game.world.barricades_left(), 3);
    }

    #[test]
    fn move_reports_plain_dozer_move() {
        let mut game = GameTestState::new(CITY);
        let update = game.assert_step(UserAction::Move(Direction::Right));
        assert_eq!(update, GameUpdate::Changed(GameChangeType::DozerMove));
    }

    #[test]
    fn move_without_dozer_is_ignored() {
        let mut game = GameTestState::new(".....");
        assert_eq!(game.try_step(UserAction::Move(Direction::Right)), GameUpdate::Ignored);
    }

    #[test]
    fn tick_reports_when_flood_starts() {
        let mut game = GameTestState::new(CITY);

        let update = game.assert_step(UserAction::Tick(Duration::from_millis(5999)));
        assert_eq!(update, GameUpdate::Changed(GameChangeType::TimePassed));
        assert_eq!(game.world.timer().remaining_secs_ceil(), 1);

        let update = game.assert_step(UserAction::Tick(Duration::from_millis(1)));
        assert_eq!(update, GameUpdate::Changed(GameChangeType::FloodStarted));
        assert_eq!(game.world.phase(), GamePhase::Flooding);
    }

    #[test]
    fn configured_build_time_and_budget_are_used() {
        let config = GameConfig {
            barricades: 1,
            build_seconds: 2.0,
            ..GameConfig::default()
        };
        let mut game = GameTestState::with_config(CITY, config);

        game.assert_step(UserAction::BuildBarricade(IVec2::new(1, 0)));
        assert_eq!(game.try_step(UserAction::BuildBarricade(IVec2::new(3, 0))), GameUpdate::Ignored);

        let update = game.assert_step(UserAction::Tick(Duration::from_secs(2)));
        assert_eq!(update, GameUpdate::Changed(GameChangeType::FloodStarted));
    }

    #[test]
    fn spawned_tiles_cover_the_whole_city() {
        let world = World::new(crate::console_interface::parse_level(CITY), GameConfig::default());
        let ground = world.map().ground_tiles().count();
        assert_eq!(ground, 15);
        assert_eq!(world.map().occupied_count(Layer::Ground), 15);
        assert_eq!(world.actors().count(), 1);
    }
}
