mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_evolve::build_info;
use flappy_evolve::core::config::SimConfig;
use flappy_evolve::flappy::GenerationEnd;
use flappy_evolve::simulator::{TrainConfig, Trainer, TrainingReport};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::process;
use std::time::{Duration, Instant};
use ui::WatchView;

/// Ticks simulated per frame while fast-forwarding.
const FAST_FORWARD_TICKS: u32 = 25;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    let mut trainer = match Trainer::new(config) {
        Ok(trainer) => trainer,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = watch(&mut terminal, &mut trainer);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    let report: TrainingReport = trainer.into_report();
    println!("{}", report.to_text());

    Ok(())
}

/// Run generations on screen until training ends or the user quits.
fn watch<B: Backend>(terminal: &mut Terminal<B>, trainer: &mut Trainer) -> io::Result<()> {
    let mut view = WatchView {
        total_generations: Some(trainer.config().generations),
        ..Default::default()
    };
    let tick_rate = trainer.config().sim.ticks_per_second.max(1);
    let frame_budget = Duration::from_secs(1) / tick_rate;
    let max_ticks = trainer.config().max_ticks_per_generation;

    while !trainer.is_done() {
        let mut sim = trainer.start_generation();

        let end = loop {
            if let Some(end) = sim.stop_reason(max_ticks) {
                break end;
            }
            let frame_start = Instant::now();

            terminal.draw(|frame| ui::draw(frame, &sim, &view))?;

            let wait = if view.fast_forward && !view.paused {
                Duration::ZERO
            } else {
                frame_budget.saturating_sub(frame_start.elapsed())
            };
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                sim.request_quit();
                            }
                            KeyCode::Char('f') | KeyCode::Char('F') => {
                                view.toggle_fast_forward();
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                view.toggle_pause();
                            }
                            _ => {}
                        }
                    }
                }
            }

            if view.paused {
                continue;
            }
            let steps = if view.fast_forward { FAST_FORWARD_TICKS } else { 1 };
            for _ in 0..steps {
                if sim.stop_reason(max_ticks).is_some() {
                    break;
                }
                sim.tick(trainer.rng_mut());
            }
        };

        let outcome = sim.finish(end);
        trainer.finish_generation(outcome);
        view.best_ever = trainer.best_fitness();

        if end == GenerationEnd::Quit {
            break;
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> TrainConfig {
    let mut config = TrainConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-V" => {
                println!("{}", build_info::version_line("flappy-evolve"));
                process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy Evolve - watch a population learn to fly\n");
                println!("Usage: flappy-evolve [OPTIONS]\n");
                println!("Options:");
                println!("  -g, --generations <N>  Generations to run (default: 50)");
                println!("  -p, --population <N>   Birds per generation (default: 50)");
                println!("  -s, --seed <S>         Random seed");
                println!("  -c, --config <FILE>    Load world parameters from JSON");
                println!("  --version              Show version information");
                println!("  --help                 Show this help message");
                println!("\nKeys: q/Esc quit, f fast-forward, p pause");
                process::exit(0);
            }
            "-g" | "--generations" => {
                if i + 1 < args.len() {
                    config.generations = args[i + 1].parse().unwrap_or(config.generations);
                    i += 1;
                }
            }
            "-p" | "--population" => {
                if i + 1 < args.len() {
                    config.evolution.population_size = args[i + 1]
                        .parse()
                        .unwrap_or(config.evolution.population_size);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match SimConfig::from_json_file(&args[i + 1]) {
                        Ok(sim) => config.sim = sim,
                        Err(e) => {
                            eprintln!("Invalid config {}: {}", args[i + 1], e);
                            process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'flappy-evolve --help' for usage.");
                process::exit(1);
            }
        }
        i += 1;
    }

    config
}
