//! Terminal rendering of a running generation.

use super::game_common::{
    progress_bar, render_info_panel_frame, render_status_bar, render_watch_frame,
};
use super::WatchView;
use flappy_evolve::brain::Controller;
use flappy_evolve::flappy::Simulation;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// World pixels per floor texture stripe.
const FLOOR_STRIPE: i32 = 24;

/// Render the whole watch screen.
pub fn render_watch<C: Controller>(
    frame: &mut Frame,
    area: Rect,
    sim: &Simulation<C>,
    view: &WatchView,
) {
    let mode = view.mode();
    let layout = render_watch_frame(frame, area, mode);
    render_play_area(frame, layout.play_field, sim);
    render_status_bar(frame, layout.status_bar, mode, sim.generation(), sim.score());
    if layout.info_panel.width > 0 {
        render_info_panel(frame, layout.info_panel, sim, view);
    }
}

/// One terminal cell of the play field.
#[derive(Clone, Copy)]
struct Cell {
    glyph: &'static str,
    style: Style,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: " ",
        style: Style::new(),
    };
}

/// Glyph for a bird by tilt: climbing, level, or diving.
pub fn bird_glyph(tilt: f64) -> &'static str {
    if tilt > 0.0 {
        "▲"
    } else if tilt > -45.0 {
        "►"
    } else {
        "▼"
    }
}

/// Floor texture at a world column, shifted by the floor's scroll phase.
pub fn floor_glyph(world_x: i32, phase: i32) -> &'static str {
    if (world_x - phase).rem_euclid(FLOOR_STRIPE * 2) < FLOOR_STRIPE {
        "▓"
    } else {
        "▒"
    }
}

/// Render the world scaled to the play area.
fn render_play_area<C: Controller>(frame: &mut Frame, area: Rect, sim: &Simulation<C>) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let config = sim.config();
    let sprites = sim.sprites();
    let x_scale = width as f64 / config.window_width as f64;
    let y_scale = height as f64 / config.window_height as f64;
    let pipe_width = sprites.pipe_width() as i32;
    let pipe_height = sprites.pipe_height() as i32;
    let lip = flappy_evolve::core::constants::PIPE_LIP_HEIGHT as i32;
    let phase = sim.floor().phase();

    let pipe_style = Style::default().fg(Color::Green);
    let lip_style = Style::default().fg(Color::LightGreen);
    let floor_style = Style::default().fg(Color::Yellow);

    let mut grid = vec![vec![Cell::EMPTY; width]; height];
    for (row, cells) in grid.iter_mut().enumerate() {
        let world_y = ((row as f64 + 0.5) / y_scale) as i32;
        for (col, cell) in cells.iter_mut().enumerate() {
            let world_x = ((col as f64 + 0.5) / x_scale) as i32;

            if world_y >= config.floor_y {
                *cell = Cell {
                    glyph: floor_glyph(world_x, phase),
                    style: floor_style,
                };
                continue;
            }

            for pipe in sim.pipes() {
                if world_x < pipe.x || world_x >= pipe.x + pipe_width {
                    continue;
                }
                let top_end = pipe.top + pipe_height;
                if world_y < top_end || world_y >= pipe.bottom {
                    let near_mouth = (top_end - lip..top_end).contains(&world_y)
                        || (pipe.bottom..pipe.bottom + lip).contains(&world_y);
                    *cell = Cell {
                        glyph: "█",
                        style: if near_mouth { lip_style } else { pipe_style },
                    };
                }
                break;
            }
        }
    }

    let bird_w = sprites.bird.width() as f64;
    let bird_h = sprites.bird.height() as f64;
    let bird_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    for bird in sim.birds() {
        let col = ((bird.x as f64 + bird_w / 2.0) * x_scale) as isize;
        let row = ((bird.y + bird_h / 2.0) * y_scale) as isize;
        if (0..width as isize).contains(&col) && (0..height as isize).contains(&row) {
            grid[row as usize][col as usize] = Cell {
                glyph: bird_glyph(bird.tilt),
                style: bird_style,
            };
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|cells| {
            Line::from(
                cells
                    .into_iter()
                    .map(|c| Span::styled(c.glyph, c.style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_info_panel<C: Controller>(
    frame: &mut Frame,
    area: Rect,
    sim: &Simulation<C>,
    view: &WatchView,
) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let row = |name: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(name, label),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };
    let fitness = |f: Option<f64>| f.map_or_else(|| "-".to_string(), |f| format!("{:.1}", f));

    let generation = match view.total_generations {
        Some(total) => format!("{}/{}", sim.generation(), total),
        None => sim.generation().to_string(),
    };
    let population = sim.alive() + sim.population().retired().len();

    let mut lines = vec![
        row(" Gen:   ", generation, Color::Cyan),
        row(" Score: ", sim.score().to_string(), Color::White),
        row(" Tick:  ", sim.ticks().to_string(), Color::White),
        Line::from(""),
        row(" Best:  ", fitness(sim.best_fitness()), Color::Yellow),
        row(" Ever:  ", fitness(view.best_ever), Color::Yellow),
        Line::from(""),
        row(
            " Alive: ",
            format!("{}/{}", sim.alive(), population),
            Color::Green,
        ),
    ];

    let fraction = if population > 0 {
        sim.alive() as f64 / population as f64
    } else {
        0.0
    };
    let (filled, empty) = progress_bar(fraction, (inner.width as usize).saturating_sub(2));
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(filled, Style::default().fg(Color::Green)),
        Span::styled(empty, label),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
