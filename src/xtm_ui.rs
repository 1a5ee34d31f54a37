use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::xtm_color::{WTMatch, danger_color};
use crate::xtm_config::Config;
use crate::xtm_error::Result;
use crate::xtm_game::{Action, GameStatus, Session};
use crate::xtm_lang::Lang;
use crate::xtm_view::{BoardGeometry, Glyphs, Tile, danger_glyph, tile_for};

/// What a single input event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Act(Action),
    Point(usize, usize),       // Move the cursor to a cell under the mouse
    Step(isize, isize),        // Move the cursor by (rows, cols)
    Quit,
}

// Runtime UI variables that live across frames
#[derive(Debug)]
struct UiState {
    cursor: (usize, usize),
    // runtime detection whether real key-release events are supported by the terminal
    supports_key_release: bool,
    // where the board was drawn last frame; None while the terminal is too small
    geometry: Option<BoardGeometry>,
}

impl UiState {
    fn new() -> Self {
        UiState {
            cursor: (0, 0),
            supports_key_release: cfg!(windows),
            geometry: None,
        }
    }

    fn step_cursor(&mut self, dr: isize, dc: isize, side: usize) {
        let last = side.saturating_sub(1) as isize;
        let r = (self.cursor.0 as isize + dr).clamp(0, last) as usize;
        let c = (self.cursor.1 as isize + dc).clamp(0, last) as usize;
        self.cursor = (r, c);
    }
}

/// Raw mode, alternate screen and mouse capture for as long as this lives
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(TerminalGuard { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort: nothing sensible is left to do if restoring fails
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Map one terminal event to a command
/// Key commands fire once: on release where the terminal reports releases, on press otherwise
fn translate(ev: &Event, ui: &UiState) -> Option<Command> {
    match ev {
        Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
            let fires = if ui.supports_key_release {
                *kind == KeyEventKind::Release
            } else {
                *kind == KeyEventKind::Press
            };
            let held = matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat);
            let (row, col) = ui.cursor;
            match code {
                KeyCode::Up if held => Some(Command::Step(-1, 0)),
                KeyCode::Down if held => Some(Command::Step(1, 0)),
                KeyCode::Left if held => Some(Command::Step(0, -1)),
                KeyCode::Right if held => Some(Command::Step(0, 1)),
                _ if !fires => None,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Act(Action::Regenerate)),
                KeyCode::Char('t') | KeyCode::Char('T') => Some(Command::Act(Action::RevealAll)),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::F(2) => Some(Command::Act(Action::NewGame)),
                KeyCode::Char(' ') => Some(Command::Act(Action::Reveal { row, col })),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Act(Action::ToggleFlag { row, col })),
                _ => None,
            }
        }
        Event::Mouse(MouseEvent { kind, column, row, .. }) => {
            let (r, c) = ui.geometry?.cell_at(*column, *row)?;
            match kind {
                MouseEventKind::Up(MouseButton::Left) => Some(Command::Act(Action::Reveal { row: r, col: c })),
                MouseEventKind::Up(MouseButton::Right) => Some(Command::Act(Action::ToggleFlag { row: r, col: c })),
                MouseEventKind::Moved => Some(Command::Point(r, c)),
                _ => None,
            }
        }
        _ => None,
    }
}

pub fn run(cfg: &Config, lang: &Lang) -> Result<()> {
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session: Session = Session::new(rng)?;
    let mut ui = UiState::new();
    let glyphs = Glyphs::new(cfg.ascii_icons);

    let mut guard = TerminalGuard::enter()?;
    let tick_rate = Duration::from_millis(cfg.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        let mut geometry = None;
        guard.terminal.draw(|f| {
            geometry = draw(f, &session, &ui, &glyphs, lang, cfg);
        })?;
        ui.geometry = geometry;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) = ev {
                // Seeing a release proves the terminal reports them; its press already fired
                if !ui.supports_key_release {
                    debug!("terminal reports key releases");
                    ui.supports_key_release = true;
                    continue;
                }
            }
            match translate(&ev, &ui) {
                Some(Command::Quit) => break,
                Some(Command::Act(action)) => {
                    debug!("action {action:?}");
                    session.apply(action)?;
                }
                Some(Command::Point(r, c)) => ui.cursor = (r, c),
                Some(Command::Step(dr, dc)) => ui.step_cursor(dr, dc, session.board().side()),
                None => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Draw one frame and return where the board landed
fn draw<B: Backend>(
    f: &mut Frame<B>,
    session: &Session,
    ui: &UiState,
    glyphs: &Glyphs,
    lang: &Lang,
    cfg: &Config,
) -> Option<BoardGeometry> {
    let size = f.size();
    let side = session.board().side();
    let (board_w, board_h) = BoardGeometry::extent(side);
    // status block (3) + bordered board + hint line
    let min_twidth = board_w + 2;
    let min_theight = 3 + board_h + 2 + 1;

    // If terminal too small, render a centered warning and skip normal UI
    if size.width < min_twidth || size.height < min_theight {
        let warn_lines = vec![
            Spans::from(Span::raw(lang.assets.tsmsg_line1)),
            Spans::from(Span::raw(lang.min_size(min_twidth, min_theight))),
        ];
        let warn = Paragraph::new(Text::from(warn_lines))
            .block(Block::default().borders(Borders::ALL).title(lang.assets.tsmsg_title))
            .alignment(Alignment::Center);
        f.render_widget(Clear, size);
        let w = 40u16.min(size.width);
        let h = 4u16.min(size.height);
        f.render_widget(warn, center_rect(w, h, size));
        return None;
    }

    // layout: status row, center board, bottom key hints
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([Constraint::Length(3), Constraint::Min(board_h + 2), Constraint::Length(1)].as_ref())
        .split(size);

    draw_status(f, chunks[0], session, lang);

    let board_area = center_rect(board_w + 2, board_h + 2, chunks[1]);
    f.render_widget(Block::default().borders(Borders::ALL), board_area);
    let geometry = BoardGeometry {
        origin_x: board_area.x + 1,
        origin_y: board_area.y + 1,
        side,
    };
    draw_board(f, &geometry, session, ui, glyphs);

    let mut hint = lang.assets.hint_play.to_string();
    if cfg.show_debug_keys {
        hint.push_str("  ");
        hint.push_str(lang.assets.hint_debug);
    }
    let hints = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray.wtmatch())))
        .alignment(Alignment::Center);
    f.render_widget(hints, chunks[2]);

    Some(geometry)
}

/// Flag count on the left, game result on the right
fn draw_status<B: Backend>(f: &mut Frame<B>, area: Rect, session: &Session, lang: &Lang) {
    let left_text = format!(" {} ", lang.flags_left(session.flag_count()));
    let (right_text, right_color) = match session.status() {
        GameStatus::Lost => (lang.assets.status_lost, Color::Red.wtmatch()),
        GameStatus::Won => (lang.assets.status_won, Color::Green.wtmatch()),
        GameStatus::Ready | GameStatus::Playing => ("", Color::Reset),
    };
    let inner_w = area.width.saturating_sub(2) as usize;
    let left_w = left_text.as_str().width();
    let right_w = right_text.width() + 1;
    let mid_spaces = inner_w.saturating_sub(left_w + right_w).max(1);

    let spans = Spans::from(vec![
        Span::styled(left_text, Style::default().fg(Color::Yellow.wtmatch()).add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(mid_spaces)),
        Span::styled(right_text, Style::default().fg(right_color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ]);
    let status = Paragraph::new(Text::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(status, area);
}

/// One fixed-size tile per cell, with the danger digit over cleared cells
fn draw_board<B: Backend>(f: &mut Frame<B>, geometry: &BoardGeometry, session: &Session, ui: &UiState, glyphs: &Glyphs) {
    // Background color for the minefield
    let board_bg = Color::DarkGray.wtmatch();
    let cleared_bg = Color::Gray.wtmatch();
    let cursor_bg = Color::LightBlue.wtmatch();

    for cell in session.board().iter() {
        let tile = tile_for(cell);
        let (text, mut style) = match danger_glyph(cell) {
            Some(n) => (
                format!(" {n}"),
                Style::default().fg(danger_color(n)).bg(cleared_bg).add_modifier(Modifier::BOLD),
            ),
            None => {
                let style = match tile {
                    Tile::Blank => Style::default().fg(Color::Gray.wtmatch()).bg(board_bg),
                    Tile::Cleared => Style::default().bg(cleared_bg),
                    Tile::Flagged => Style::default().fg(Color::Red.wtmatch()).bg(board_bg),
                    Tile::Mine => Style::default().fg(Color::Black.wtmatch()).bg(Color::Red.wtmatch()),
                };
                (format!(" {}", glyphs.for_tile(tile)), style)
            }
        };
        if ui.cursor == (cell.row, cell.col) {
            style = style.bg(cursor_bg);
        }
        let rect = geometry.tile_rect(cell.row, cell.col);
        f.render_widget(Paragraph::new(Span::styled(text, style)), rect);
    }
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
