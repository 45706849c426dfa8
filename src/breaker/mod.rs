//! Deterministic brick-breaker simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Ball, BreakerState, Brick, Paddle, Phase};
pub use tick::{TickInput, tick};
