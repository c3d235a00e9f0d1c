// World geometry (pixels, origin top-left, y grows downward)
pub const WINDOW_WIDTH: u32 = 500;
pub const WINDOW_HEIGHT: u32 = 800;
pub const FLOOR_Y: i32 = 730;
pub const FLOOR_SEGMENT_WIDTH: i32 = 672;

// Sprite dimensions (source art scaled 2x)
pub const BIRD_WIDTH: u32 = 68;
pub const BIRD_HEIGHT: u32 = 48;
pub const PIPE_WIDTH: u32 = 104;
pub const PIPE_HEIGHT: u32 = 640;
pub const PIPE_LIP_HEIGHT: u32 = 48;
pub const PIPE_LIP_INSET: u32 = 4;

// Spawn positions
pub const BIRD_SPAWN_X: i32 = 230;
pub const BIRD_SPAWN_Y: f64 = 350.0;
pub const FIRST_PIPE_X: i32 = 650;
pub const PIPE_SPAWN_X: i32 = 600;

// Pipes
pub const PIPE_VELOCITY: i32 = 5;
pub const PIPE_GAP: i32 = 200;
pub const GAP_TOP_MIN: i32 = 50;
pub const GAP_TOP_MAX: i32 = 450;

// Kinematics
pub const JUMP_VELOCITY: f64 = -10.5;
pub const FALL_ACCELERATION: f64 = 1.5;
pub const TERMINAL_DISPLACEMENT: f64 = 16.0;
pub const ASCENT_BOOST: f64 = 2.0;
pub const MAX_TILT: f64 = 25.0;
pub const TILT_RATE: f64 = 20.0;
pub const MIN_TILT: f64 = -90.0;
pub const TILT_HOLD_MARGIN: f64 = 50.0;

// Fitness signal
pub const SURVIVAL_REWARD: f64 = 0.1;
pub const PASS_REWARD: f64 = 5.0;
pub const COLLISION_PENALTY: f64 = 1.0;
pub const JUMP_THRESHOLD: f64 = 0.5;

// Timing
pub const TICKS_PER_SECOND: u32 = 30;

// Training defaults
pub const DEFAULT_POPULATION_SIZE: usize = 50;
pub const DEFAULT_GENERATIONS: u32 = 50;
pub const DEFAULT_FITNESS_THRESHOLD: f64 = 100.0;
