use thiserror::Error;

/// Tunable handling coefficients, immutable for the duration of a tick.
///
/// The fixed damping/drag constants (0.94 angular and drift damping, 0.98
/// rolling drag, 0.94 turn drag) live in [`crate::consts`] and are not
/// tunable per preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub max_speed: f32,
    /// Negative; the floor for reverse speed
    pub max_reverse_speed: f32,
    /// Speed gained per tick while the throttle is held
    pub acceleration: f32,
    /// Speed lost per tick while braking/reversing
    pub deceleration: f32,
    /// How strongly angular velocity feeds the drift angle
    pub drift_factor: f32,
    /// Angular velocity gained per tick of steering
    pub turn_factor: f32,
    /// Scales drift-angle growth on top of `drift_factor`
    pub oversteer: f32,
    /// Speed retained per tick while the e-brake is held (near 1.0)
    pub ebrake_decay: f32,
    /// Lateral friction factor while the e-brake is held
    pub ebrake_lateral_grip: f32,
    /// Scales the vehicle bounding box
    pub car_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::STOCK
    }
}

impl PhysicsConfig {
    // Full-lock equilibrium sits near 30 degrees of drift; the drift-severity
    // speed bleed then settles the car around 3.6 units/tick, above the
    // scoring speed floor.
    pub const STOCK: Self = Self {
        max_speed: 10.0,
        max_reverse_speed: -4.0,
        acceleration: 0.18,
        deceleration: 0.2,
        drift_factor: 0.4,
        turn_factor: 0.3,
        oversteer: 1.0,
        ebrake_decay: 0.995,
        ebrake_lateral_grip: 0.15,
        car_scale: 1.0,
    };

    /// Looser rear end: bigger angles, more throttle to hold them
    pub const DRIFTER: Self = Self {
        drift_factor: 0.45,
        oversteer: 1.2,
        acceleration: 0.2,
        ..Self::STOCK
    };

    /// Planted setup for clean laps rather than big angles
    pub const GRIP: Self = Self {
        drift_factor: 0.25,
        oversteer: 0.7,
        max_speed: 11.0,
        ..Self::STOCK
    };
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("max_speed must be greater than zero")]
    ZeroMaxSpeed,
    #[error("max_reverse_speed must be negative")]
    PositiveReverseSpeed,
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

/// Partial preset applied over a base config.
///
/// Every field mirrors one [`PhysicsConfig`] field; `None` leaves the base
/// value untouched. Validation happens once when the override set is loaded,
/// never per write.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsOverrides {
    pub max_speed: Option<f32>,
    pub max_reverse_speed: Option<f32>,
    pub acceleration: Option<f32>,
    pub deceleration: Option<f32>,
    pub drift_factor: Option<f32>,
    pub turn_factor: Option<f32>,
    pub oversteer: Option<f32>,
    pub ebrake_decay: Option<f32>,
    pub ebrake_lateral_grip: Option<f32>,
    pub car_scale: Option<f32>,
}

impl PhysicsOverrides {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("max_reverse_speed", self.max_reverse_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("drift_factor", self.drift_factor),
            ("turn_factor", self.turn_factor),
            ("oversteer", self.oversteer),
            ("ebrake_decay", self.ebrake_decay),
            ("ebrake_lateral_grip", self.ebrake_lateral_grip),
            ("car_scale", self.car_scale),
        ];

        for (field, value) in fields {
            if let Some(value) = value
                && !value.is_finite()
            {
                return Err(ConfigError::NotFinite { field });
            }
        }

        if let Some(max_speed) = self.max_speed
            && max_speed <= 0.0
        {
            return Err(ConfigError::ZeroMaxSpeed);
        }

        if let Some(max_reverse_speed) = self.max_reverse_speed
            && max_reverse_speed >= 0.0
        {
            return Err(ConfigError::PositiveReverseSpeed);
        }

        let non_negative = [
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("turn_factor", self.turn_factor),
            ("car_scale", self.car_scale),
        ];
        for (field, value) in non_negative {
            if let Some(value) = value
                && value < 0.0
            {
                return Err(ConfigError::Negative { field });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn apply_to(&self, base: &PhysicsConfig) -> PhysicsConfig {
        PhysicsConfig {
            max_speed: self.max_speed.unwrap_or(base.max_speed),
            max_reverse_speed: self.max_reverse_speed.unwrap_or(base.max_reverse_speed),
            acceleration: self.acceleration.unwrap_or(base.acceleration),
            deceleration: self.deceleration.unwrap_or(base.deceleration),
            drift_factor: self.drift_factor.unwrap_or(base.drift_factor),
            turn_factor: self.turn_factor.unwrap_or(base.turn_factor),
            oversteer: self.oversteer.unwrap_or(base.oversteer),
            ebrake_decay: self.ebrake_decay.unwrap_or(base.ebrake_decay),
            ebrake_lateral_grip: self
                .ebrake_lateral_grip
                .unwrap_or(base.ebrake_lateral_grip),
            car_scale: self.car_scale.unwrap_or(base.car_scale),
        }
    }
}
