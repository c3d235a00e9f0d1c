//! Flappy Bird simulation and collision engine.
//!
//! Many birds fly at once, each steered by its own [`Controller`]. Every
//! tick the birds move under gravity, pipes scroll left, and birds that touch
//! a pipe or leave the play area are culled. A generation ends when no bird
//! is left.
//!
//! [`Controller`]: crate::brain::Controller

pub mod bird;
pub mod collision;
pub mod floor;
pub mod logic;
pub mod mask;
pub mod pipe;
pub mod population;

pub use bird::Bird;
pub use collision::{collides, Silhouette};
pub use floor::Floor;
pub use logic::{GenerationEnd, GenerationOutcome, Simulation, TickReport};
pub use mask::{Mask, SpriteSet};
pub use pipe::{Pipe, PipeField};
pub use population::{CullCause, CullEvent, Evaluated, Fitness, Member, Population};
