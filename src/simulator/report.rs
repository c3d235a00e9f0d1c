//! Training report generation.

use crate::evolution::Genome;
use crate::flappy::{CullCause, GenerationEnd, GenerationOutcome};
use serde::Serialize;

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub ticks: u64,
    pub score: u32,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub end: GenerationEnd,
    pub collisions: usize,
    pub floor_hits: usize,
    pub ceiling_hits: usize,
    pub survivors: usize,
}

impl GenerationStats {
    pub fn from_outcome<C>(outcome: &GenerationOutcome<C>) -> Self {
        let count = |cause| {
            outcome
                .members
                .iter()
                .filter(|m| m.cause == Some(cause))
                .count()
        };
        Self {
            generation: outcome.generation,
            ticks: outcome.ticks,
            score: outcome.score,
            best_fitness: outcome.best().map(|b| b.fitness).unwrap_or(0.0),
            mean_fitness: outcome.mean_fitness(),
            end: outcome.end,
            collisions: count(CullCause::Collision),
            floor_hits: count(CullCause::Floor),
            ceiling_hits: count(CullCause::Ceiling),
            survivors: outcome.members.iter().filter(|m| m.cause.is_none()).count(),
        }
    }
}

/// Aggregated results of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub generations: Vec<GenerationStats>,
    pub best_fitness: f64,
    pub best_score: u32,
    pub best_genome: Option<Genome>,
    /// Whether the fitness threshold was reached.
    pub solved: bool,
    pub seed: Option<u64>,
}

impl TrainingReport {
    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      TRAINING REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Generations: {}   Solved: {}\n",
            self.generations.len(),
            if self.solved { "yes" } else { "no" }
        ));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push('\n');

        report.push_str("── PER-GENERATION ───────────────────────────────────────────────\n");
        report.push_str("   Gen   Score    Ticks   Best Fit   Mean Fit   Pipe/Floor/Sky\n");
        report.push_str("   ───   ─────    ─────   ────────   ────────   ──────────────\n");
        for g in &self.generations {
            report.push_str(&format!(
                "  {:4}   {:5}   {:6}   {:8.1}   {:8.1}   {}/{}/{}{}\n",
                g.generation,
                g.score,
                g.ticks,
                g.best_fitness,
                g.mean_fitness,
                g.collisions,
                g.floor_hits,
                g.ceiling_hits,
                match g.end {
                    GenerationEnd::Extinct => "",
                    GenerationEnd::TickLimit => "  (tick limit)",
                    GenerationEnd::Quit => "  (quit)",
                }
            ));
        }
        report.push('\n');

        report.push_str("── BEST ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Best Fitness: {:.1}\n", self.best_fitness));
        report.push_str(&format!("  Best Score:   {}\n", self.best_score));
        if let Some(genome) = &self.best_genome {
            report.push_str(&format!(
                "  Genome:       w=[{:.3}, {:.3}, {:.3}] b={:.3}\n",
                genome.weights[0], genome.weights[1], genome.weights[2], genome.bias
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
