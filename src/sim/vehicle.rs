use super::{InputVector, PhysicsConfig};
use crate::{
    consts::{
        ANGULAR_DAMPING, DRIFT_BLEED_DIVISOR, DRIFT_DAMPING, SPEED_DRAG, TURN_DRAG,
        TURN_SPEED_EPSILON, VEHICLE_BASE_HEIGHT, VEHICLE_BASE_WIDTH,
    },
    math::wrap_axis,
};
use glam::Vec2;

/// Kinematic state of the one simulated vehicle.
///
/// The session owns the canonical value; replay and ghost recording store
/// copies, never references into the live state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    /// World position; y grows down the screen
    pub pos: Vec2,
    /// Velocity components as of the last tick
    pub vel: Vec2,
    /// Signed forward speed; negative while reversing
    pub speed: f32,
    /// Heading in degrees
    pub angle: f32,
    /// Angular offset (degrees) between heading and travel direction
    pub drift_angle: f32,
    /// Heading change in degrees per tick
    pub angular_vel: f32,
    pub is_turning: bool,
    pub is_reversing: bool,
    /// Bounding box (width, height) in world units
    pub size: Vec2,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl VehicleState {
    pub const DEFAULT: Self = Self {
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        speed: 0.0,
        angle: 0.0,
        drift_angle: 0.0,
        angular_vel: 0.0,
        is_turning: false,
        is_reversing: false,
        size: Vec2::new(VEHICLE_BASE_WIDTH, VEHICLE_BASE_HEIGHT),
    };

    /// A rest state at `pos` with the bounding box scaled per the config.
    #[must_use]
    pub fn spawned_at(pos: Vec2, config: &PhysicsConfig) -> Self {
        Self {
            pos,
            size: Vec2::new(VEHICLE_BASE_WIDTH, VEHICLE_BASE_HEIGHT) * config.car_scale,
            ..Self::DEFAULT
        }
    }
}

/// Advances the vehicle by exactly one fixed tick.
///
/// Pure and total: any finite input state produces a finite next state, and
/// the same arguments always produce the same result. `world` is the wrap
/// extent per axis (track size, or the viewport fallback).
#[must_use]
pub fn step(
    state: &VehicleState,
    input: InputVector,
    config: &PhysicsConfig,
    world: Vec2,
) -> VehicleState {
    let mut next = *state;

    next.speed = throttled_speed(next.speed, input, config);
    next.is_turning = input.steering();
    next.angular_vel += steering_delta(next.speed, input, config);
    next.is_reversing = next.speed < 0.0;

    next.angular_vel *= ANGULAR_DAMPING;
    if !next.is_reversing {
        next.drift_angle += config.drift_factor * next.angular_vel * config.oversteer;
    }
    next.drift_angle *= DRIFT_DAMPING;
    next.angle += next.angular_vel;

    next.speed = dragged_speed(next.speed, next.drift_angle, next.is_reversing, input, config);

    let turn_drag = if next.is_turning && !input.ebrake {
        TURN_DRAG
    } else {
        1.0
    };
    let travel = (next.angle - next.drift_angle).to_radians();
    next.vel = Vec2::new(travel.sin(), travel.cos()) * next.speed * turn_drag;

    // Screen convention: heading 0 moves up, so y integrates inverted
    next.pos.x = wrap_axis(next.pos.x + next.vel.x, world.x);
    next.pos.y = wrap_axis(next.pos.y - next.vel.y, world.y);

    next
}

/// Throttle/brake stage. Speed may overshoot the caps by at most one tick's
/// delta because the bound is checked before adding, not after.
pub(crate) fn throttled_speed(speed: f32, input: InputVector, config: &PhysicsConfig) -> f32 {
    let mut speed = speed;

    if input.throttle() && speed < config.max_speed {
        speed += config.acceleration;
    }
    if input.down && speed > config.max_reverse_speed {
        speed -= config.deceleration;
    }

    speed
}

/// Signed angular velocity change from this tick's steering.
///
/// Under throttle the turn rate is fixed; off throttle it scales with
/// `speed / max_speed`, which both weakens steering at low speed and inverts
/// it while reversing. A zero `max_speed` gives no off-throttle authority
/// rather than dividing by zero.
fn steering_delta(speed: f32, input: InputVector, config: &PhysicsConfig) -> f32 {
    if speed.abs() <= TURN_SPEED_EPSILON {
        return 0.0;
    }

    let contribution = if input.throttle() {
        config.turn_factor
    } else if config.max_speed > 0.0 {
        config.turn_factor * speed / config.max_speed
    } else {
        0.0
    };

    let mut delta = 0.0;
    if input.left {
        delta -= contribution;
    }
    if input.right {
        delta += contribution;
    }
    delta
}

/// Drag stage: rolling (or e-brake) decay plus speed bleed proportional to
/// drift severity.
fn dragged_speed(
    speed: f32,
    drift_angle: f32,
    is_reversing: bool,
    input: InputVector,
    config: &PhysicsConfig,
) -> f32 {
    let (drag, lateral_grip) = if input.ebrake {
        (config.ebrake_decay, config.ebrake_lateral_grip)
    } else {
        (SPEED_DRAG, 1.0)
    };

    let reverse_sign = if is_reversing { -1.0 } else { 1.0 };
    let drift_bleed = drift_angle.abs() * speed / DRIFT_BLEED_DIVISOR;

    speed * drag - reverse_sign * drift_bleed * lateral_grip
}
