use glam::Vec2;

/// Wraps a coordinate into `[0, max]`: past the far edge teleports to 0,
/// below 0 teleports to the far edge (screen convention, not modular).
#[must_use]
pub fn wrap_axis(value: f32, max: f32) -> f32 {
    if value > max {
        0.0
    } else if value < 0.0 {
        max
    } else {
        value
    }
}

/// Rotates a local offset by a heading given in degrees.
#[must_use]
pub fn rotate_deg(offset: Vec2, angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

/// Sign of a drift angle as a chain-direction marker: 0 stays 0.
#[must_use]
pub fn drift_sign(angle: f32) -> i8 {
    if angle > 0.0 {
        1
    } else if angle < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_teleports_to_edges() {
        assert_eq!(wrap_axis(101.0, 100.0), 0.0);
        assert_eq!(wrap_axis(-0.5, 100.0), 100.0);
        assert_eq!(wrap_axis(55.0, 100.0), 55.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_deg(Vec2::new(1.0, 0.0), 90.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
