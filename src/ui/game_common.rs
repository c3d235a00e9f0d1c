//! Frame, status line and panel pieces of the watch screen.

use super::WatchMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel, borders included.
pub const INFO_PANEL_WIDTH: u16 = 24;

/// Rows under the play field: status line and key hints.
const STATUS_ROWS: u16 = 2;

/// Areas of the watch screen inside its outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchLayout {
    pub play_field: Rect,
    pub status_bar: Rect,
    pub info_panel: Rect,
}

impl WatchMode {
    pub fn label(self) -> &'static str {
        match self {
            WatchMode::Running => "RUNNING",
            WatchMode::Paused => "PAUSED",
            WatchMode::FastForward => "FAST",
        }
    }

    pub fn color(self) -> Color {
        match self {
            WatchMode::Running => Color::Cyan,
            WatchMode::Paused => Color::Yellow,
            WatchMode::FastForward => Color::Magenta,
        }
    }

    /// Key hints, naming what each toggle would switch to.
    pub fn controls(self) -> [(&'static str, &'static str); 3] {
        let pause = if self == WatchMode::Paused { "Resume" } else { "Pause" };
        let fast = if self == WatchMode::FastForward { "Normal" } else { "Fast" };
        [("[q/Esc]", "Quit"), ("[f]", fast), ("[p]", pause)]
    }
}

/// Split the bordered interior into play field, status bar and info panel.
///
/// ```text
/// ┌─ Flappy Evolve · MODE ───────────┬─ Info ──────┐
/// │                                  │             │
/// │   [play field]                   │  [panel]    │
/// │                                  │             │
/// │ [status line / key hints]        │             │
/// └──────────────────────────────────┴─────────────┘
/// ```
///
/// The info panel gives way first when the terminal is narrow.
pub fn split_watch_area(inner: Rect) -> WatchLayout {
    let panel = if inner.width >= INFO_PANEL_WIDTH * 2 {
        INFO_PANEL_WIDTH
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(panel)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_ROWS)])
        .split(columns[0]);

    WatchLayout {
        play_field: rows[0],
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Draw the outer border, coloured and titled by `mode`, and lay out its
/// interior.
pub fn render_watch_frame(frame: &mut Frame, area: Rect, mode: WatchMode) -> WatchLayout {
    frame.render_widget(Clear, area);

    let title = Line::from(vec![
        Span::raw(" Flappy Evolve "),
        Span::styled(
            format!("· {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(mode.color()));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    split_watch_area(inner)
}

/// Generation and score on the first row, key hints for `mode` on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: WatchMode,
    generation: u32,
    score: u32,
) {
    if area.height == 0 {
        return;
    }

    let status = Line::from(Span::styled(
        format!("Generation {}  ·  Score {}  ·  {}", generation, score, mode.label()),
        Style::default().fg(mode.color()),
    ));

    let mut hints = Vec::new();
    for (key, action) in mode.controls() {
        if !hints.is_empty() {
            hints.push(Span::raw("  "));
        }
        hints.push(Span::styled(key, Style::default().fg(Color::White)));
        hints.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(vec![status, Line::from(hints)]).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draw the info panel border and return its inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `█░` bar `width` cells wide, `fraction` of it filled.
pub fn progress_bar(fraction: f64, width: usize) -> (String, String) {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}
