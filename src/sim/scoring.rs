use crate::{consts::scoring, math::drift_sign};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringConfig {
    /// |speed| below this ends a drift without banking
    pub min_speed: f32,
    /// |drift angle| (degrees) at or above this accrues score
    pub min_drift_angle: f32,
    pub base_points_per_second: f32,
    /// Per-combo-link addition to the combo multiplier
    pub combo_bonus: f32,
    /// Grace period (ms) below the angle threshold before banking
    pub combo_decay_ms: f32,
    /// Flat points per direction flip, scaled by the new combo count
    pub direction_bonus: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ScoringConfig {
    pub const DEFAULT: Self = Self {
        min_speed: scoring::MIN_SPEED,
        min_drift_angle: scoring::MIN_DRIFT_ANGLE,
        base_points_per_second: scoring::BASE_POINTS_PER_SECOND,
        combo_bonus: scoring::COMBO_BONUS,
        combo_decay_ms: scoring::COMBO_DECAY_MS,
        direction_bonus: scoring::DIRECTION_BONUS,
    };
}

/// Drift scoring session state.
///
/// Two states: idle and drifting. A drift banks its accumulated score into
/// `total_score` only when it ends through the decay timer; dropping below
/// the speed floor cancels the session outright. `current_score` is zero
/// whenever `is_drifting` is false, and `total_score` never decreases except
/// through [`DriftScore::reset_total`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftScore {
    pub is_drifting: bool,
    /// Unbanked score of the active session
    pub current_score: f32,
    /// Banked score; floor of each successful session is added
    pub total_score: f32,
    /// Clipping multiplier applied this tick (1.0 outside zones)
    pub multiplier: f32,
    /// Chain-link count within the active session
    pub combo: u32,
    /// Elapsed seconds in the active session
    pub duration: f32,
    /// True whenever this tick's multiplier is above neutral
    pub is_in_clipping_zone: bool,
    /// Countdown (ms) below the angle threshold before the session banks
    combo_timer_ms: f32,
    /// Drift direction of the last scoring tick, for chain detection
    last_sign: i8,
}

impl Default for DriftScore {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DriftScore {
    pub const DEFAULT: Self = Self {
        is_drifting: false,
        current_score: 0.0,
        total_score: 0.0,
        multiplier: 1.0,
        combo: 0,
        duration: 0.0,
        is_in_clipping_zone: false,
        combo_timer_ms: 0.0,
        last_sign: 0,
    };

    /// Advances the state machine by one tick.
    ///
    /// `multiplier` is the clipping detector's output for this same tick;
    /// `dt_secs` is the fixed tick length.
    pub fn update(
        &mut self,
        speed: f32,
        drift_angle_deg: f32,
        multiplier: f32,
        dt_secs: f32,
        config: &ScoringConfig,
    ) {
        self.is_in_clipping_zone = multiplier > 1.0;

        // Stopping cancels the session: nothing banks
        if speed.abs() < config.min_speed {
            if self.is_drifting || self.current_score > 0.0 {
                self.end_session();
            }
            return;
        }

        let angle = drift_angle_deg.abs();
        if angle >= config.min_drift_angle {
            if !self.is_drifting {
                self.is_drifting = true;
                self.current_score = 0.0;
                self.duration = 0.0;
                self.combo = 1;
                self.last_sign = 0;
            }

            let sign = drift_sign(drift_angle_deg);
            if sign != 0 {
                if self.last_sign != 0 && sign != self.last_sign {
                    self.combo += 1;
                    self.current_score += config.direction_bonus * self.combo as f32;
                }
                self.last_sign = sign;
            }

            self.multiplier = multiplier;

            let combo_multiplier = 1.0 + (self.combo.saturating_sub(1)) as f32 * config.combo_bonus;
            let angle_bonus = (angle / scoring::ANGLE_BONUS_DIVISOR).max(1.0);
            self.current_score +=
                config.base_points_per_second * multiplier * combo_multiplier * angle_bonus * dt_secs;
            self.duration += dt_secs;

            // Holding the angle keeps the chain alive at full grace
            self.combo_timer_ms = config.combo_decay_ms;
        } else if self.is_drifting {
            self.combo_timer_ms -= dt_secs * 1000.0;
            if self.combo_timer_ms <= 0.0 {
                self.total_score += self.current_score.floor();
                self.end_session();
            }
        }
    }

    /// Zeroes everything including the banked total. Used on full game reset.
    pub fn reset_total(&mut self) {
        self.total_score = 0.0;
        self.end_session();
    }

    fn end_session(&mut self) {
        self.is_drifting = false;
        self.current_score = 0.0;
        self.multiplier = 1.0;
        self.combo = 0;
        self.duration = 0.0;
        self.combo_timer_ms = 0.0;
        self.last_sign = 0;
    }
}
