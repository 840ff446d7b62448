use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use rand::Rng;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use cookie_chase::{Dir, Game, GameConfig, GameEvent, GhostColor, LossCause, Phase, Pos, Snapshot};

const CELL_W: usize = 2;
const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Agent,
    Ghost,
    Cookie,
    Wall,
    Empty,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let config = read_game_config();
    let (board_w, board_h) = (config.maze.width(), config.maze.height());
    let mut game = Game::new(config);
    start_game(&mut game, &mut rng)?;

    let mut renderer = Renderer::new(board_w, board_h);
    let render_fps = read_render_fps();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_advance = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => game.dismiss(),
                        KeyCode::Char('r' | 'R') => start_game(&mut game, &mut rng)?,
                        KeyCode::Up | KeyCode::Char('w' | 'W') => game.apply_direction(Dir::Up),
                        KeyCode::Down | KeyCode::Char('s' | 'S') => game.apply_direction(Dir::Down),
                        KeyCode::Left | KeyCode::Char('a' | 'A') => game.apply_direction(Dir::Left),
                        KeyCode::Right | KeyCode::Char('d' | 'D') => {
                            game.apply_direction(Dir::Right)
                        }
                        _ => {}
                    }
                }
            }
        }

        let now = Instant::now();
        game.advance(now - last_advance, &mut rng);
        last_advance = now;

        for GameEvent::PhaseChanged(phase) in game.take_events() {
            if phase == Phase::Closed {
                return Ok(());
            }
        }

        render(stdout, &game.snapshot(), &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn start_game(game: &mut Game, rng: &mut impl Rng) -> io::Result<()> {
    game.start(rng)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

fn read_game_config() -> GameConfig {
    match std::env::var("COOKIE_MODE").as_deref() {
        Ok("grid") => GameConfig::cookie_grid(),
        _ => GameConfig::maze_chase(),
    }
}

fn read_render_fps() -> u64 {
    std::env::var("COOKIE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS)
}

fn render(stdout: &mut Stdout, snap: &Snapshot<'_>, renderer: &mut Renderer) -> io::Result<()> {
    let board_w = snap.maze.width();
    let board_h = snap.maze.height();
    let needed_h = (board_h + 3) as u16;
    let needed_w = (board_w * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let eaten = snap.initial_cookies - snap.cookies.len();
    let hud = format!(
        "Cookies: {}/{}  Time: {:02}  Score: {}",
        eaten, snap.initial_cookies, snap.time_left, snap.score
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..board_h {
        for x in 0..board_w {
            let cell = cell_for(snap, Pos::new(x, y));
            let idx = y * board_w + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    let status = status_line(snap);
    if renderer.needs_full || status != renderer.last_status {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + board_h as u16))?;
        stdout.queue(SetForegroundColor(Color::Cyan))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&status))?;
        stdout.queue(ResetColor)?;
        renderer.last_status = status;
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn status_line(snap: &Snapshot<'_>) -> String {
    match (snap.phase, snap.loss_cause) {
        (Phase::Won, _) => "\"ME EAT ALL COOKIES! NOM NOM!\"  (r to play again, q to quit)".into(),
        (Phase::Lost, Some(LossCause::Timeout)) => {
            "\"ME NO GET ALL COOKIES!\"  Closing in 3 seconds... (r to retry)".into()
        }
        (Phase::Lost, _) => "A ghost got the cookie monster!  Closing in 3 seconds... (r to retry)".into(),
        _ => "Arrows/wasd move, r restarts, q or Esc quits".into(),
    }
}

fn cell_for(snap: &Snapshot<'_>, pos: Pos) -> Cell {
    if pos == snap.agent_pos {
        return Cell {
            glyph: Glyph::Agent,
            color: Color::Blue,
        };
    }
    if let Some(ghost) = snap.ghosts.iter().find(|g| g.pos == pos) {
        let color = match ghost.color {
            GhostColor::Red => Color::Red,
            GhostColor::Pink => Color::Magenta,
            GhostColor::Cyan => Color::Cyan,
        };
        return Cell {
            glyph: Glyph::Ghost,
            color,
        };
    }
    if snap.cookies.contains(&pos) {
        return Cell {
            glyph: Glyph::Cookie,
            color: Color::DarkYellow,
        };
    }
    if snap.maze.is_path(pos.x, pos.y) {
        Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        }
    } else {
        Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        }
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: Cell,
) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Agent => ("\u{1f60b}", cell.color),
        Glyph::Ghost => ("\u{1f47b}", cell.color),
        Glyph::Cookie => ("\u{1f36a}", cell.color),
        Glyph::Wall => ("\u{2588}\u{2588}", cell.color),
        Glyph::Empty => ("  ", cell.color),
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
