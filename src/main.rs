// Terminal Floodgate.
// Build phase: arrow keys pick a street, Space builds a barricade. When the
// countdown ends water pours in from the city edges.
// W/A/S/D drive the dozer, which pushes barricades along the streets.
// Tiles: '#' building, ' ' street, '@' dozer, '$' barricade, '~' water.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use bevy::math::IVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, trace, warn};

use Floodgate::config::GameConfig;
use Floodgate::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, parse_level, render_game, render_level_codes,
    render_world_to_string, setup_terminal,
};
use Floodgate::core::{step, GameChangeType, GameUpdate, Level, TileKind, UserAction, World};
use Floodgate::models::GameRenderState;
use Floodgate::utils::generate_city;

const DEFAULT_LEVEL: &str = r#"
.....#.....
.#.#.#.#.#.
...#...@...
.#.#.#.###.
.....$.....
.###.#.#.#.
.......#...
.#.#.#.#.#.
...#.......
"#;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let switch = args.next().unwrap_or("interactive".to_string());
    let level_arg = args.next();

    let config = GameConfig::discover().context("failed to load config")?;

    match switch.as_str() {
        "interactive" => {
            init_file_tracing()?;
            let level = load_level(level_arg.as_deref(), &config)?;
            run_interactive(World::new(level, config))
        }
        "random" => {
            init_file_tracing()?;
            let seed: u64 = match level_arg {
                Some(seed) => seed.parse().context("random seed must be a number")?,
                None => rand::random(),
            };
            info!(seed, "generating city");
            let level = generate_city(11, 9, 0.3, &mut StdRng::seed_from_u64(seed));
            run_interactive(World::new(level, config))
        }
        "flood" => {
            init_tracing();
            let level = load_level(level_arg.as_deref(), &config)?;
            run_flood_preview(World::new(level, config));
            Ok(())
        }
        _ => {
            println!(
                "Unknown mode: {}. Use 'interactive', 'random' or 'flood'.",
                switch
            );
            Err(anyhow!("unknown mode {switch}"))
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// The terminal is in raw mode while playing, so logs go to a file instead.
fn init_file_tracing() -> Result<()> {
    std::fs::create_dir_all("exports").context("failed to create exports directory")?;
    let log_out = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open("exports/floodgate.log")
        .context("failed to open exports/floodgate.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(log_out))
        .try_init();
    Ok(())
}

/// A `.json` path is read as a levels file, anything else as an ASCII map.
fn load_level(path: Option<&str>, config: &GameConfig) -> Result<Level> {
    let Some(path) = path else {
        return Ok(parse_level(DEFAULT_LEVEL));
    };
    let path = Path::new(path);
    if path.extension().is_some_and(|ext| ext == "json") {
        return Level::load(path, config.level_index)
            .with_context(|| format!("failed to load level {}", path.display()));
    }
    let ascii = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_level(&ascii))
}

fn run_flood_preview(mut world: World) {
    println!("{}", render_world_to_string(&world));
    println!("{}", render_level_codes(world.level()));

    let seeded = world.flood();
    let events = world.drain_events();
    info!(seeded = seeded.len(), events = events.len(), "flood preview");

    println!("{}", render_world_to_string(&world));
    println!("{}", render_level_codes(world.level()));
}

fn run_interactive(mut world: World) -> Result<()> {
    let mut terminal = setup_terminal().map_err(|e| anyhow!("{e}"))?;
    let result = interactive_loop(&mut world, &mut terminal);
    if let Err(err) = cleanup_terminal() {
        warn!(%err, "failed to restore terminal");
    }
    result
}

fn interactive_loop(
    world: &mut World,
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
) -> Result<()> {
    let mut cursor = first_buildable(world);
    let mut last_change = None;
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        let tick = step(world, UserAction::Tick(now - last_frame));
        if tick == GameUpdate::Changed(GameChangeType::FloodStarted) {
            info!("the flood reached the city");
            last_change = Some(GameChangeType::FloodStarted);
        }
        last_frame = now;

        let input = handle_input(std::time::Duration::from_millis(50)).map_err(|e| anyhow!("{e}"))?;
        match input {
            ConsoleInput::Quit => break,
            ConsoleInput::Restart => {
                world.reset();
                cursor = first_buildable(world);
                last_change = None;
                last_frame = Instant::now();
            }
            ConsoleInput::UserAction(action) => {
                if let GameUpdate::Changed(change) = step(world, action) {
                    last_change = Some(change);
                }
            }
            ConsoleInput::Cursor(direction) => {
                let next = cursor + direction.delta();
                if world.level().bounds().contains(&next) {
                    cursor = next;
                }
            }
            ConsoleInput::Build => {
                if let GameUpdate::Changed(change) = step(world, UserAction::BuildBarricade(cursor)) {
                    last_change = Some(change);
                }
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => {}
        }

        // No sprites to animate in the terminal; the next frame redraws everything.
        for event in world.drain_events() {
            trace!(?event, "presentation event");
        }

        render_game(terminal, &GameRenderState {
            world,
            cursor,
            last_change,
        })
        .map_err(|e| anyhow!("{e}"))?;
    }

    Ok(())
}

fn first_buildable(world: &World) -> IVec2 {
    world
        .level()
        .bounds()
        .iter()
        .find(|pos| world.map().ground(pos).is_some_and(|t| t.kind == TileKind::Street))
        .unwrap_or(IVec2::ZERO)
}
