pub mod flappy_scene;
pub mod game_common;

use flappy_evolve::brain::Controller;
use flappy_evolve::flappy::Simulation;
use ratatui::Frame;

/// Display state owned by the watch loop, separate from the simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchView {
    pub paused: bool,
    pub fast_forward: bool,
    /// Generation budget, shown as `Gen n/total`.
    pub total_generations: Option<u32>,
    /// Best fitness over all finished generations.
    pub best_ever: Option<f64>,
}

/// What the watch loop is doing with the simulation right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    Running,
    Paused,
    FastForward,
}

impl WatchView {
    /// Pause wins over fast-forward.
    pub fn mode(&self) -> WatchMode {
        if self.paused {
            WatchMode::Paused
        } else if self.fast_forward {
            WatchMode::FastForward
        } else {
            WatchMode::Running
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_fast_forward(&mut self) {
        self.fast_forward = !self.fast_forward;
    }
}

/// Main UI drawing function
pub fn draw<C: Controller>(frame: &mut Frame, sim: &Simulation<C>, view: &WatchView) {
    let size = frame.size();
    flappy_scene::render_watch(frame, size, sim, view);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_follows_toggles() {
        let mut view = WatchView::default();
        assert_eq!(view.mode(), WatchMode::Running);
        view.toggle_fast_forward();
        assert_eq!(view.mode(), WatchMode::FastForward);
        view.toggle_pause();
        assert_eq!(view.mode(), WatchMode::Paused);
        view.toggle_pause();
        view.toggle_fast_forward();
        assert_eq!(view.mode(), WatchMode::Running);
    }
}
