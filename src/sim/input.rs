/// Logical control state read by the integrator once per tick.
///
/// Last write before the tick wins; there is no buffering of presses
/// between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputVector {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub ebrake: bool,
}

impl Default for InputVector {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl InputVector {
    pub const DEFAULT: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
        ebrake: false,
    };

    /// Throttle applies only while the e-brake is released.
    #[must_use]
    pub const fn throttle(&self) -> bool {
        self.up && !self.ebrake
    }

    #[must_use]
    pub const fn steering(&self) -> bool {
        self.left || self.right
    }
}
