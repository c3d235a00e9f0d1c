//! Headless training runs through the public API.

use flappy_evolve::flappy::GenerationEnd;
use flappy_evolve::simulator::{run_training, TrainConfig, Trainer};

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = TrainConfig {
        generations: 3,
        max_ticks_per_generation: Some(300),
        ..TrainConfig::quick(99)
    };
    let first = run_training(&config).unwrap();
    let second = run_training(&config).unwrap();

    assert_eq!(first.generations, second.generations);
    assert_eq!(first.best_genome, second.best_genome);
    assert_eq!(first.best_fitness, second.best_fitness);
}

#[test]
fn test_report_json_round_trips_through_serde_json() {
    let config = TrainConfig {
        generations: 2,
        max_ticks_per_generation: Some(200),
        ..TrainConfig::quick(7)
    };
    let report = run_training(&config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

    assert_eq!(json["seed"], 7);
    assert_eq!(json["generations"].as_array().map(Vec::len), Some(report.generations.len()));
    assert!(report.to_text().contains("TRAINING REPORT"));
}

#[test]
fn test_generation_stats_account_for_every_bird() {
    let config = TrainConfig {
        generations: 2,
        max_ticks_per_generation: Some(500),
        ..TrainConfig::quick(13)
    };
    let report = run_training(&config).unwrap();
    for stats in &report.generations {
        let total = stats.collisions + stats.floor_hits + stats.ceiling_hits + stats.survivors;
        assert_eq!(total, config.evolution.population_size);
        if stats.end == GenerationEnd::Extinct {
            assert_eq!(stats.survivors, 0);
        }
    }
}

#[test]
fn test_quit_ends_a_generation_early() {
    let mut trainer = Trainer::new(TrainConfig::quick(21)).unwrap();
    let mut sim = trainer.start_generation();
    sim.tick(trainer.rng_mut());
    sim.request_quit();
    let outcome = sim.run_generation(trainer.rng_mut(), None);
    assert_eq!(outcome.end, GenerationEnd::Quit);
    assert_eq!(outcome.ticks, 1);

    let stats = trainer.finish_generation(outcome);
    assert_eq!(stats.end, GenerationEnd::Quit);
    assert_eq!(stats.survivors, 20);
}
