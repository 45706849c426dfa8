//! Web Toybox - two small browser toys in one crate
//!
//! Core modules:
//! - `calc`: Deterministic calculator engine (digit entry, operator chaining, errors)
//! - `breaker`: Deterministic brick-breaker simulation
//! - `history`: Calculation history with LocalStorage persistence
//! - `settings`: UI preferences (theme, panels, keyboard)

pub mod breaker;
pub mod calc;
pub mod history;
pub mod settings;

pub use calc::{Calculator, Operator, Snapshot};
pub use history::History;
pub use settings::{Settings, Theme};

/// Shared configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep for the breaker (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 460.0;
    /// HUD strip along the top edge; the ball bounces off its underside
    pub const HUD_HEIGHT: f32 = 32.0;
    /// Gap kept between the paddle and the side walls
    pub const WALL_MARGIN: f32 = 8.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 110.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_SPEED: f32 = 360.0;
    /// Gap between the paddle underside and the floor
    pub const PADDLE_FLOOR_GAP: f32 = 12.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_BASE_SPEED: f32 = 300.0;
    /// Height above the floor where a new ball waits to be served
    pub const SERVE_HEIGHT: f32 = 60.0;
    /// Steepest paddle deflection (radians from vertical)
    pub const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;

    /// Brick grid
    pub const BRICK_COLS: u32 = 9;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 18.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_X: f32 = 35.0;
    pub const BRICK_OFFSET_Y: f32 = 40.0;
    /// Rows at level 1; one row is added per level up to the cap
    pub const BASE_ROWS: u32 = 5;
    pub const MAX_ROWS: u32 = 8;

    /// Run structure
    pub const START_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = 5;
    /// Ball speed multiplier gained per level
    pub const LEVEL_SPEED_STEP: f32 = 0.1;

    /// Scoring
    pub const BRICK_HIT_SCORE: u64 = 30;
    pub const BRICK_DESTROY_SCORE: u64 = 100;
    pub const LEVEL_CLEAR_BONUS: u64 = 500;
}

/// Shortest decimal text that round-trips the value.
///
/// This is what the calculator display shows: no forced `.0`, no fixed
/// precision, binary floating-point artifacts left intact.
#[inline]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}
