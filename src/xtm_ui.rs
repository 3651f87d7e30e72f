use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use rand::Rng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::xtm_color::{WTMatch, tile_colors};
use crate::xtm_config::Config;
use crate::xtm_error::GameError;
use crate::xtm_feedback::AttributeFeedback;
use crate::xtm_game::{DisplayAdapter, EndReason, GameSession, present, present_fresh};

/// Longest guess the input line accepts
const MAX_INPUT: usize = 80;

/// Smallest terminal the layout fits in
const MIN_TWIDTH: u16 = 60;
const MIN_THEIGHT: u16 = 20;

/// Headline shown above the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Headline {
    Playing,
    Ended(EndReason),
}

impl Headline {
    fn text(&self) -> &'static str {
        match self {
            Headline::Playing => "Guess the Movie",
            Headline::Ended(EndReason::Won) => "You Win!",
            Headline::Ended(EndReason::Lost) => "Game Over",
        }
    }
}

// Runtime UI variables; also the display adapter the session talks to
#[derive(Debug)]
struct UiState {
    input: String,
    tiles: Vec<AttributeFeedback>,
    headline: Headline,
    showing_help: bool,
    showing_about: bool,
}

impl UiState {
    fn new() -> Self {
        UiState {
            input: String::new(),
            tiles: Vec::new(),
            headline: Headline::Playing,
            showing_help: false,
            showing_about: false,
        }
    }

    /// Guess controls are disabled once the round has ended
    fn accepts_input(&self) -> bool {
        self.headline == Headline::Playing
    }

    fn showing_modal(&self) -> bool {
        self.showing_help || self.showing_about
    }

    fn close_modals(&mut self) {
        self.showing_help = false;
        self.showing_about = false;
    }
}

impl DisplayAdapter for UiState {
    fn render(&mut self, feedback: &[AttributeFeedback]) {
        self.tiles = feedback.to_vec();
    }

    fn show_ended(&mut self, reason: EndReason) {
        self.headline = Headline::Ended(reason);
    }

    fn show_playing(&mut self) {
        self.headline = Headline::Playing;
        self.input.clear();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}

/// Run the game UI until the player exits
/// The terminal is restored even if drawing or event polling fails
pub fn run<R: Rng>(cfg: &mut Config, session: &mut GameSession<R>) -> Result<(), GameError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, cfg, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cfg: &mut Config,
    session: &mut GameSession<R>,
) -> Result<(), GameError> {
    let mut ui = UiState::new();
    present_fresh(session, &mut ui);

    let tick_rate = Duration::from_millis(200);

    loop {
        terminal.draw(|f| draw(f, &ui, &*cfg, &*session))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        // any key closes an open modal
        if ui.showing_modal() {
            ui.close_modals();
            continue;
        }

        match code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::F(1) => ui.showing_help = true,
            KeyCode::F(2) => {
                session.restart();
                present_fresh(session, &mut ui);
                info!("round restarted");
            }
            KeyCode::F(7) => cfg.ascii_tiles = !cfg.ascii_tiles,
            KeyCode::F(9) => ui.showing_about = true,
            KeyCode::Enter if ui.accepts_input() => {
                let outcome = session.submit_guess(&ui.input);
                debug!(?outcome, "guess submitted");
                present(session, outcome, &mut ui);
            }
            KeyCode::Backspace if ui.accepts_input() => {
                ui.input.pop();
            }
            KeyCode::Char(c)
                if ui.accepts_input()
                    && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if ui.input.chars().count() < MAX_INPUT {
                    ui.input.push(c);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw<B: Backend, R: Rng>(f: &mut Frame<B>, ui: &UiState, cfg: &Config, session: &GameSession<R>) {
    let size = f.size();
    // If terminal too small, render a centered warning and skip normal UI
    if size.width < MIN_TWIDTH || size.height < MIN_THEIGHT {
        let warn_lines = vec![
            Spans::from(Span::raw("Terminal size too small.")),
            Spans::from(Span::raw(format!("Minimum required: {} x {}", MIN_TWIDTH, MIN_THEIGHT))),
        ];
        let warn = Paragraph::new(Text::from(warn_lines))
            .block(Block::default().borders(Borders::ALL).title("Resize Terminal"))
            .alignment(Alignment::Center);
        f.render_widget(Clear, size);
        let w = 40u16.min(size.width.saturating_sub(2));
        let h = 5u16.min(size.height.saturating_sub(2));
        f.render_widget(warn, center_rect(w, h, size));
        return;
    }

    let menu_key_fg = Color::Yellow.wtmatch();
    let disabled_fg = Color::DarkGray.wtmatch();

    // layout: top menu row, center game area, bottom status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([Constraint::Length(3), Constraint::Min(12), Constraint::Length(3)].as_ref())
        .split(size);

    // menu row; Restart is highlighted once the round is over
    let menu_items = [("F1", "Help"), ("F2", "Restart"), ("F7", "Tiles"), ("F9", "About")];
    let mut spans_vec: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, rest)) in menu_items.iter().enumerate() {
        if i > 0 {
            spans_vec.push(Span::raw("   "));
        }
        let mut key_style = Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD);
        let mut rest_style = Style::default();
        if *key == "F2" && !ui.accepts_input() {
            key_style = key_style.bg(Color::LightBlue.wtmatch()).fg(Color::Black.wtmatch());
            rest_style = rest_style.bg(Color::LightBlue.wtmatch()).fg(Color::Black.wtmatch());
        }
        spans_vec.push(Span::styled(key.to_string(), key_style));
        spans_vec.push(Span::styled(format!(": {}", rest), rest_style));
    }
    let menu = Paragraph::new(Spans::from(spans_vec)).block(Block::default().borders(Borders::ALL));
    f.render_widget(menu, chunks[0]);

    // status row (left info + right-aligned Esc: Exit)
    let left_text = format!(
        " Guesses left: {}   Movies: {} ",
        session.remaining_guesses(),
        session.catalog().len()
    );
    let inner_w = chunks[2].width.saturating_sub(2) as usize;
    let right_w = "Esc: Exit ".width();
    let mid_spaces = inner_w.saturating_sub(left_text.as_str().width() + right_w).max(1);
    let status = Paragraph::new(Spans::from(vec![
        Span::raw(left_text),
        Span::raw(" ".repeat(mid_spaces)),
        Span::styled("Esc", Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD)),
        Span::raw(": Exit "),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    // game area: headline, input line, one row per tile
    let tile_w = ui
        .tiles
        .iter()
        .map(|t| tile_text(t, cfg.ascii_tiles).as_str().width())
        .max()
        .unwrap_or(0)
        .max(36);
    let area_w = (tile_w as u16 + 4).min(chunks[1].width);
    let area_h = (ui.tiles.len() as u16 + 7).min(chunks[1].height);
    let area = center_rect(area_w, area_h, chunks[1]);

    let headline_style = match ui.headline {
        Headline::Playing => Style::default().add_modifier(Modifier::BOLD),
        Headline::Ended(EndReason::Won) => Style::default().fg(Color::Green.wtmatch()).add_modifier(Modifier::BOLD),
        Headline::Ended(EndReason::Lost) => Style::default().fg(Color::Red.wtmatch()).add_modifier(Modifier::BOLD),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(ui.headline.text(), headline_style))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let input_style = if ui.accepts_input() {
        Style::default().bg(Color::DarkGray.wtmatch())
    } else {
        Style::default().fg(disabled_fg)
    };
    let field_w = inner.width.saturating_sub(3) as usize;
    let shown = tail_to_width(&ui.input, field_w.saturating_sub(1));
    let mut lines = vec![
        Spans::from(Span::raw("")),
        Spans::from(vec![
            Span::styled(" > ", Style::default().fg(menu_key_fg)),
            Span::styled(format!("{:<width$}", shown, width = field_w), input_style),
        ]),
        Spans::from(Span::raw("")),
    ];
    for tile in &ui.tiles {
        let (fg, bg) = tile_colors(tile.matched);
        let text = tile_text(tile, cfg.ascii_tiles);
        let pad = tile_w.saturating_sub(text.as_str().width());
        lines.push(Spans::from(vec![
            Span::raw(" "),
            Span::styled(format!("{}{}", text, " ".repeat(pad)), Style::default().fg(fg).bg(bg)),
        ]));
    }
    lines.push(Spans::from(Span::raw("")));
    if !ui.accepts_input() {
        lines.push(Spans::from(Span::styled(" Press F2 to play again", Style::default().fg(menu_key_fg))));
    }
    f.render_widget(Paragraph::new(Text::from(lines)), inner);

    if ui.accepts_input() && !ui.showing_modal() {
        f.set_cursor(inner.x + 3 + shown.as_str().width() as u16, inner.y + 1);
    }

    if ui.showing_help {
        let help_lines = vec![
            Spans::from(Span::raw("")),
            Spans::from(Span::raw(" Type a movie title and press Enter.")),
            Spans::from(Span::raw(format!(" You have {} guesses.", crate::xtm_game::MAX_GUESSES))),
            Spans::from(Span::raw(" Naming another known movie shows its tiles.")),
            Spans::from(Span::raw("")),
            Spans::from(Span::raw("  Enter     - guess")),
            Spans::from(Span::raw("  Backspace - delete")),
            Spans::from(Span::raw("  F2        - restart")),
            Spans::from(Span::raw("  F7        - toggle tile markers")),
        ];
        draw_modal(f, size, 50, 13, "Help", help_lines, Alignment::Left);
    }

    if ui.showing_about {
        let lines = vec![
            Spans::from(Span::raw("")),
            Spans::from(Span::raw(env!("CARGO_PKG_DESCRIPTION"))),
            Spans::from(Span::raw("")),
            Spans::from(Span::raw(format!("v{} by {}", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS")))),
        ];
        draw_modal(f, size, 48, 9, "About", lines, Alignment::Center);
    }
}

/// Centered modal with a CLOSE button on the last inner row
fn draw_modal<B: Backend>(
    f: &mut Frame<B>,
    size: Rect,
    w: u16,
    h: u16,
    title: &str,
    lines: Vec<Spans>,
    alignment: Alignment,
) {
    let mrect = center_rect(w, h, size);
    f.render_widget(Clear, mrect);
    f.render_widget(Block::default().borders(Borders::ALL).title(title), mrect);
    let inner = Rect::new(mrect.x + 1, mrect.y + 1, mrect.width.saturating_sub(2), mrect.height.saturating_sub(2));
    f.render_widget(Paragraph::new(Text::from(lines)).alignment(alignment), inner);

    let btn_w = 9u16;
    let bx = inner.x + (inner.width.saturating_sub(btn_w)) / 2;
    let by = inner.y + inner.height.saturating_sub(1);
    let btn_style = Style::default().bg(Color::Gray).fg(Color::Black).add_modifier(Modifier::BOLD);
    let btn = Paragraph::new(Spans::from(Span::styled(" CLOSE ", btn_style))).alignment(Alignment::Center);
    f.render_widget(btn, Rect::new(bx, by, btn_w, 1));
}

/// Tile label and value, with a match marker in ASCII mode
fn tile_text(tile: &AttributeFeedback, ascii: bool) -> String {
    let marker = match (ascii, tile.matched) {
        (false, _) => "",
        (true, true) => "[+] ",
        (true, false) => "[-] ",
    };
    format!(" {}{}: {} ", marker, tile.label(), tile.value)
}

/// The longest suffix of `s` that fits in `width` columns
fn tail_to_width(s: &str, width: usize) -> String {
    let mut out: Vec<char> = Vec::new();
    let mut used = 0usize;
    for c in s.chars().rev() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + cw > width {
            break;
        }
        used += cw;
        out.push(c);
    }
    out.iter().rev().collect()
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtm_feedback::Attribute;

    fn tile(matched: bool) -> AttributeFeedback {
        AttributeFeedback {
            attribute: Attribute::Director,
            value: "Pete Docter".to_string(),
            matched,
        }
    }

    #[test]
    fn test_ui_state_as_display_adapter() {
        let mut ui = UiState::new();
        ui.input.push_str("Jaws");
        ui.render(&[tile(false)]);
        assert_eq!(ui.tiles.len(), 1);

        ui.clear_input();
        assert!(ui.input.is_empty());

        ui.show_ended(EndReason::Lost);
        assert!(!ui.accepts_input());
        assert_eq!(ui.headline.text(), "Game Over");

        ui.input.push_str("stale");
        ui.show_playing();
        assert!(ui.accepts_input());
        assert!(ui.input.is_empty());
        assert_eq!(ui.headline.text(), "Guess the Movie");
    }

    #[test]
    fn test_tile_text_markers() {
        assert_eq!(tile_text(&tile(false), false), " Director: Pete Docter ");
        assert_eq!(tile_text(&tile(true), true), " [+] Director: Pete Docter ");
        assert_eq!(tile_text(&tile(false), true), " [-] Director: Pete Docter ");
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("Inception", 20), "Inception");
        assert_eq!(tail_to_width("Inception", 4), "tion");
        assert_eq!(tail_to_width("千と千尋", 5), "千尋");
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let r = center_rect(100, 4, Rect::new(0, 0, 60, 20));
        assert_eq!(r.width, 60);
        assert_eq!(r.y, 8);
    }
}
