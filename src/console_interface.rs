use crate::core::{Direction, GamePhase, Layer, Level, Positioned, Terrain, TileKind, UserAction, World};
use crate::models::GameRenderState;
use bevy::math::IVec2;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::io;

/// Parses an ASCII city, one row per line:
/// '#' building, ' ' or '.' street, '@' dozer, '$' barricade, '~' water border.
pub fn parse_level(s: &str) -> Level {
    let rows: Vec<&str> = s
        .lines()
        .map(|line| line.trim_matches('\n'))
        .filter(|line| !line.is_empty())
        .collect();
    let height = rows.len() as i32;
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;

    // rows shorter than the widest one are padded with buildings
    let mut level = Level::new_filled(width, height, Terrain::Building);
    let mut dozer = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let pos = IVec2 { x: x as i32, y: y as i32 };
            let terrain = match ch {
                '#' => Terrain::Building,
                '$' => Terrain::Barricade,
                '~' => Terrain::WaterBorder,
                '@' => {
                    dozer = Some(pos);
                    Terrain::Street
                }
                _ => Terrain::Street,
            };
            level.set(&pos, terrain);
        }
    }

    match dozer {
        Some(start) => level.clone().with_dozer(start).unwrap_or(level),
        None => level,
    }
}

pub fn render_world_to_string(world: &World) -> String {
    render_world_with_cursor(world, None)
}

pub fn render_world_with_cursor(world: &World, cursor: Option<IVec2>) -> String {
    let mut result = String::new();
    for y in 0..world.level().height() {
        for x in 0..world.level().width() {
            let pos = IVec2 { x, y };
            let ch = if cursor == Some(pos) {
                '+'
            } else {
                cell_symbol(world, &pos)
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

fn cell_symbol(world: &World, pos: &IVec2) -> char {
    if world.is_water_at(pos) {
        return '~';
    }
    if let Some(actor) = world.actor_at(Layer::Actor, pos) {
        return match actor.kind() {
            TileKind::Dozer => '@',
            _ => '$',
        };
    }
    if world.is_street_at(pos) { ' ' } else { '#' }
}

/// Terrain codes only, as the level array holds them.
pub fn render_level_codes(level: &Level) -> String {
    let mut result = String::new();
    for y in 0..level.height() {
        for x in 0..level.width() {
            let code = level.get(&IVec2 { x, y }).map_or(0, Terrain::code);
            result.push(char::from(b'0' + code));
        }
        result.push('\n');
    }
    result
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    let world = state.world;
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let header = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(0), Constraint::Length(16)])
            .split(chunks[0]);

        let countdown = Paragraph::new(countdown_text(world))
            .block(Block::default().borders(Borders::ALL).title("Flood"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Right);
        f.render_widget(countdown, header[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
            .ratio(f64::from(world.timer().progress()));
        f.render_widget(gauge, header[1]);

        let barricades = Paragraph::new(format!("{} $", world.barricades_left()))
            .block(Block::default().borders(Borders::ALL).title("Barricades"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Right);
        f.render_widget(barricades, header[2]);

        let cursor = match world.phase() {
            GamePhase::Building => Some(state.cursor),
            GamePhase::Flooding => None,
        };
        let game_paragraph = Paragraph::new(render_world_with_cursor(world, cursor))
            .block(Block::default().borders(Borders::ALL).title("Floodgate"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[1]);

        let instructions = match world.phase() {
            GamePhase::Building => "WASD drive | Arrows pick a street | Space build | R restart | Q quit",
            GamePhase::Flooding => "The flood is here! WASD drive | R restart | Q quit",
        };
        let instructions = if let Some(change_type) = &state.last_change {
            format!("{} | Last: {:?}", instructions, change_type)
        } else {
            instructions.to_string()
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub fn countdown_text(world: &World) -> String {
    let secs = world.timer().remaining_secs_ceil();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Cursor(Direction),
    Build,
    Restart,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input(poll: std::time::Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(poll)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
                KeyCode::Char('w') | KeyCode::Char('W') => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Up))
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Down))
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Left))
                }
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Right))
                }
                KeyCode::Up => ConsoleInput::Cursor(Direction::Up),
                KeyCode::Down => ConsoleInput::Cursor(Direction::Down),
                KeyCode::Left => ConsoleInput::Cursor(Direction::Left),
                KeyCode::Right => ConsoleInput::Cursor(Direction::Right),
                KeyCode::Char(' ') | KeyCode::Enter => ConsoleInput::Build,
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_parse_then_render_matches() {
        let level = "\
#####
#@$ #
# ~ #
#####";
        let world = World::new(parse_level(level), GameConfig::default());
        assert_eq!(render_world_to_string(&world).trim_end(), level);
    }

    #[test]
    fn test_short_rows_are_padded_with_buildings() {
        let level = parse_level("   \n ");
        assert_eq!(level.width(), 3);
        assert_eq!(level.get(&IVec2::new(2, 1)), Some(Terrain::Building));
        assert_eq!(level.get(&IVec2::new(0, 1)), Some(Terrain::Street));
    }

    #[test]
    fn test_level_codes() {
        let level = parse_level("#@$~");
        assert_eq!(render_level_codes(&level), "0123\n");
    }

    #[test]
    fn test_countdown_text() {
        let world = World::new(parse_level(" "), GameConfig::default());
        assert_eq!(countdown_text(&world), "0:06");
    }
}
