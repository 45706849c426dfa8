//! Fixed timestep breaker tick
//!
//! Advances one run deterministically; the front end only translates input
//! events into `TickInput` and draws whatever state comes out.

use glam::Vec2;

use super::state::{Ball, BreakerState, Phase};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Paddle direction: -1 left, 0 hold, 1 right
    pub dir: f32,
    /// Serve the waiting ball (space / start button)
    pub serve: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the breaker by one fixed timestep
pub fn tick(state: &mut BreakerState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            Phase::Playing => {
                state.phase = Phase::Paused;
                return;
            }
            Phase::Paused => state.phase = Phase::Playing,
            _ => {}
        }
    }

    match state.phase {
        Phase::Paused | Phase::GameOver | Phase::Cleared => return,
        Phase::Ready => {
            // The paddle can line up before the serve
            state.paddle.shift(input.dir, dt);
            if input.serve {
                state.serve();
            }
            return;
        }
        Phase::Playing => {}
    }

    state.time_ticks += 1;
    state.paddle.shift(input.dir, dt);
    move_ball(state, dt);
    collide_bricks(state);
    check_level_clear(state);
}

/// Integrate the ball and resolve wall, paddle and floor contacts
fn move_ball(state: &mut BreakerState, dt: f32) {
    let paddle = state.paddle;
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    // Side walls
    if ball.pos.x + ball.radius > FIELD_WIDTH {
        ball.pos.x = FIELD_WIDTH - ball.radius;
        ball.vel.x = -ball.vel.x.abs();
    } else if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs();
    }

    // Ceiling sits at the underside of the HUD strip
    if ball.pos.y - ball.radius < HUD_HEIGHT {
        ball.pos.y = HUD_HEIGHT + ball.radius;
        ball.vel.y = ball.vel.y.abs();
    }

    // Paddle, only while the ball is descending (prevents re-hits)
    let top = paddle.top();
    if ball.vel.y > 0.0
        && ball.pos.y + ball.radius > top
        && ball.pos.y + ball.radius < top + PADDLE_HEIGHT
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.x + paddle.width
    {
        bounce_off_paddle(ball, paddle.center(), paddle.width);
    }

    // Floor: ball lost
    if ball.pos.y + ball.radius > FIELD_HEIGHT {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = Phase::GameOver;
        } else {
            state.phase = Phase::Ready;
            state.place_ball_for_serve();
        }
    }
}

/// Deflection angle scales with the hit offset from the paddle center,
/// capped at `MAX_BOUNCE_ANGLE`; speed is preserved.
fn bounce_off_paddle(ball: &mut Ball, center: f32, width: f32) {
    let normalized = ((ball.pos.x - center) / (width / 2.0)).clamp(-1.0, 1.0);
    let angle = normalized * MAX_BOUNCE_ANGLE;
    let speed = ball.vel.length();
    ball.vel = Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs());
}

/// Damage the first brick the ball center is inside and reflect vertically
fn collide_bricks(state: &mut BreakerState) {
    let pos = state.ball.pos;
    for brick in state.bricks.iter_mut().filter(|b| b.alive) {
        if !brick.contains(pos) {
            continue;
        }
        state.ball.vel.y = -state.ball.vel.y;
        brick.strength = brick.strength.saturating_sub(1);
        if brick.strength == 0 {
            brick.alive = false;
            state.score += BRICK_DESTROY_SCORE;
        } else {
            state.score += BRICK_HIT_SCORE;
        }
        break;
    }
}

/// Clearing the grid pays a bonus and moves to the next level (or ends the
/// run after the last one)
fn check_level_clear(state: &mut BreakerState) {
    if state.bricks.iter().any(|b| b.alive) {
        return;
    }
    state.score += LEVEL_CLEAR_BONUS;
    if state.level >= MAX_LEVEL {
        state.phase = Phase::Cleared;
        return;
    }
    state.level += 1;
    state.bricks = BreakerState::build_bricks(state.level);
    state.phase = Phase::Ready;
    state.place_ball_for_serve();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_transitions_ready_to_playing() {
        let mut state = BreakerState::new(12345);
        assert_eq!(state.phase, Phase::Ready);

        // Tick without serve input - stays on the serve line
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.ball.vel, Vec2::ZERO);

        let input = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.ball.vel.length() > 0.0);
        // Serves always launch upward
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = BreakerState::new(12345);
        let serve = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &serve, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, Phase::Paused);

        // Paused state doesn't advance time
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_lost_ball_costs_a_life() {
        let mut state = BreakerState::new(7);
        state.serve();
        // Drop the ball straight at the floor
        state.ball.pos = Vec2::new(30.0, FIELD_HEIGHT - 10.0);
        state.ball.vel = Vec2::new(0.0, 400.0);

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == Phase::Ready {
                break;
            }
        }
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_out_of_lives_ends_the_run() {
        let mut state = BreakerState::new(7);
        state.lives = 1;
        state.serve();
        state.ball.pos = Vec2::new(30.0, FIELD_HEIGHT - 10.0);
        state.ball.vel = Vec2::new(0.0, 400.0);

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == Phase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_brick_hit_scores_and_damages() {
        let mut state = BreakerState::new(7);
        state.serve();
        // Park the ball inside the first brick, drifting upward
        let target = state.bricks[0].pos + Vec2::new(5.0, 5.0);
        state.ball.pos = target;
        state.ball.vel = Vec2::new(0.0, -60.0);
        let strength = state.bricks[0].strength;

        tick(&mut state, &TickInput::default(), SIM_DT);

        if strength == 1 {
            assert!(!state.bricks[0].alive);
            assert_eq!(state.score, BRICK_DESTROY_SCORE);
        } else {
            assert!(state.bricks[0].alive);
            assert_eq!(state.bricks[0].strength, strength - 1);
            assert_eq!(state.score, BRICK_HIT_SCORE);
        }
        // The hit reflects the ball downward
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_level_clear_awards_bonus_and_advances() {
        let mut state = BreakerState::new(7);
        state.serve();
        for brick in &mut state.bricks {
            brick.alive = false;
        }
        let score = state.score;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, score + LEVEL_CLEAR_BONUS);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, Phase::Ready);
        // Level 2 grid has one more row
        assert_eq!(state.bricks.len(), (BRICK_COLS * 6) as usize);
    }

    #[test]
    fn test_final_level_clear_ends_the_run() {
        let mut state = BreakerState::new(7);
        state.level = MAX_LEVEL;
        state.serve();
        for brick in &mut state.bricks {
            brick.alive = false;
        }
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, Phase::Cleared);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs stay identical
        let mut a = BreakerState::new(99999);
        let mut b = BreakerState::new(99999);

        let inputs = [
            TickInput {
                dir: 1.0,
                ..Default::default()
            },
            TickInput {
                serve: true,
                ..Default::default()
            },
            TickInput {
                dir: -1.0,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for input in &inputs {
            for _ in 0..240 {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.paddle.x, b.paddle.x);
    }
}
