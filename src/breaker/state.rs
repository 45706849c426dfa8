//! Breaker state and entity types
//!
//! Everything needed to resume or replay a run lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a breaker run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ball waiting on the serve line for a serve input
    Ready,
    /// Active gameplay
    Playing,
    /// Run suspended
    Paused,
    /// All levels cleared
    Cleared,
    /// Out of lives
    GameOver,
}

/// The player's paddle, sliding along the floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    /// Top edge of the paddle strip
    #[inline]
    pub fn top(&self) -> f32 {
        FIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_FLOOR_GAP
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Slide horizontally, clamped inside the wall margins
    pub fn shift(&mut self, dir: f32, dt: f32) {
        self.x += PADDLE_SPEED * dir * dt;
        self.x = self
            .x
            .clamp(WALL_MARGIN, FIELD_WIDTH - WALL_MARGIN - self.width);
    }
}

/// The ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A single brick cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    /// Hits remaining before the brick breaks
    pub strength: u8,
    pub alive: bool,
}

impl Brick {
    /// Hit test against the ball center
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + BRICK_WIDTH
            && point.y > self.pos.y
            && point.y < self.pos.y + BRICK_HEIGHT
    }
}

/// Complete breaker state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Serves issued so far; salts the per-serve RNG stream
    pub serves: u32,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: Phase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
}

impl BreakerState {
    /// Fresh run at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            serves: 0,
            level: 1,
            lives: START_LIVES,
            score: 0,
            time_ticks: 0,
            phase: Phase::Ready,
            paddle: Paddle::default(),
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: BALL_RADIUS,
            },
            bricks: Self::build_bricks(1),
        };
        state.place_ball_for_serve();
        state
    }

    /// Row count grows by one per level up to the cap
    pub fn rows_for_level(level: u32) -> u32 {
        (BASE_ROWS + level - 1).min(MAX_ROWS)
    }

    /// Lay out the brick grid for a level. Lower rows are softer; strength
    /// grows with the level and caps at 3.
    pub fn build_bricks(level: u32) -> Vec<Brick> {
        let rows = Self::rows_for_level(level);
        let mut bricks = Vec::with_capacity((BRICK_COLS * rows) as usize);
        for col in 0..BRICK_COLS {
            for row in 0..rows {
                let strength = (level + row / 2).min(3) as u8;
                bricks.push(Brick {
                    pos: Vec2::new(
                        col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_X,
                        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_Y,
                    ),
                    strength,
                    alive: true,
                });
            }
        }
        bricks
    }

    /// Ball speed multiplier for the current level
    #[inline]
    pub fn speed_scale(&self) -> f32 {
        1.0 + (self.level - 1) as f32 * LEVEL_SPEED_STEP
    }

    /// Park the ball on the serve line, motionless
    pub fn place_ball_for_serve(&mut self) {
        self.ball.pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - SERVE_HEIGHT);
        self.ball.vel = Vec2::ZERO;
    }

    /// Launch the ball. The horizontal direction comes from a Pcg32 stream
    /// salted by the serve counter, so a given seed always replays the same
    /// run for the same inputs.
    pub fn serve(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.serves as u64));
        self.serves += 1;

        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        // 3:4 launch slope, matching the classic serve feel
        let dir = Vec2::new(0.6 * sign, -0.8);
        self.ball.vel = dir * BALL_BASE_SPEED * self.speed_scale();
        self.phase = Phase::Playing;
    }

    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_grid_dimensions() {
        assert_eq!(BreakerState::rows_for_level(1), 5);
        assert_eq!(BreakerState::rows_for_level(4), 8);
        // Capped at 8 rows
        assert_eq!(BreakerState::rows_for_level(7), 8);

        let bricks = BreakerState::build_bricks(1);
        assert_eq!(bricks.len(), 45);
        // Level 1, rows 0-1 are soft, rows 2-3 take two hits
        assert_eq!(bricks[0].strength, 1);
        assert_eq!(bricks[2].strength, 2);
    }

    #[test]
    fn test_brick_strength_caps_at_three() {
        let bricks = BreakerState::build_bricks(5);
        assert!(bricks.iter().all(|b| b.strength <= 3));
        assert!(bricks.iter().any(|b| b.strength == 3));
    }

    #[test]
    fn test_brick_contains() {
        let brick = Brick {
            pos: Vec2::new(100.0, 50.0),
            strength: 1,
            alive: true,
        };
        assert!(brick.contains(Vec2::new(130.0, 59.0)));
        assert!(!brick.contains(Vec2::new(99.0, 59.0)));
        assert!(!brick.contains(Vec2::new(130.0, 80.0)));
    }

    #[test]
    fn test_serve_is_deterministic_per_seed() {
        let mut a = BreakerState::new(42);
        let mut b = BreakerState::new(42);
        a.serve();
        b.serve();
        assert_eq!(a.ball.vel, b.ball.vel);
        assert_eq!(a.phase, Phase::Playing);
    }

    #[test]
    fn test_paddle_clamps_to_walls() {
        let mut paddle = Paddle::default();
        for _ in 0..2000 {
            paddle.shift(-1.0, 1.0 / 120.0);
        }
        assert_eq!(paddle.x, WALL_MARGIN);
        for _ in 0..2000 {
            paddle.shift(1.0, 1.0 / 120.0);
        }
        assert_eq!(paddle.x, FIELD_WIDTH - WALL_MARGIN - paddle.width);
    }
}
