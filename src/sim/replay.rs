use super::VehicleState;
use crate::consts::HISTORY_CAPACITY;
use std::collections::VecDeque;

/// Bounded history of full vehicle snapshots, one per live tick.
///
/// Roughly 30 seconds at 60 ticks per second; the oldest frame is evicted
/// once the buffer is full.
#[derive(Clone, Debug, Default)]
pub struct ReplayBuffer {
    frames: VecDeque<VehicleState>,
}

impl ReplayBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends a value copy of the live state, evicting the oldest frame at
    /// capacity.
    pub fn push(&mut self, state: VehicleState) {
        if self.frames.len() == HISTORY_CAPACITY {
            self.frames.pop_front();
        }
        self.frames.push_back(state);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&VehicleState> {
        self.frames.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&VehicleState> {
        self.frames.back()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Fastest accepted playback speed multiplier
pub const MAX_PLAYBACK_SPEED: f32 = 8.0;

/// Playhead over a [`ReplayBuffer`].
///
/// The index is fractional so sub-unit speeds hold each frame for several
/// ticks; the displayed frame is always `floor(index)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayPlayer {
    pub index: f32,
    pub playing: bool,
    pub speed: f32,
}

impl Default for ReplayPlayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ReplayPlayer {
    pub const DEFAULT: Self = Self {
        index: 0.0,
        playing: true,
        speed: 1.0,
    };

    /// Advances by one tick, looping back to the start past the end.
    /// Paused playback keeps the current frame resolvable.
    pub fn advance(&mut self, frame_count: usize) {
        if !self.playing || frame_count == 0 {
            return;
        }

        self.index += self.speed;
        if self.index >= frame_count as f32 {
            self.index = 0.0;
        }
    }

    /// Jumps to a normalized `[0, 1]` fraction of the buffer, clamped to the
    /// last valid frame.
    pub fn seek(&mut self, fraction: f32, frame_count: usize) {
        if frame_count == 0 {
            self.index = 0.0;
            return;
        }

        let target = fraction.clamp(0.0, 1.0) * frame_count as f32;
        self.index = target.min((frame_count - 1) as f32);
    }

    /// Playback speed, clamped to a forward range. Non-finite values are
    /// ignored so the playhead can never go negative or NaN.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed = speed.clamp(0.0, MAX_PLAYBACK_SPEED);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.playing = !self.playing;
    }

    #[must_use]
    pub fn frame_index(&self) -> usize {
        self.index as usize
    }
}

/// UI-facing playback status, emitted at a throttled rate rather than every
/// tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayStatus {
    pub frame: usize,
    pub total: usize,
    pub playing: bool,
    pub speed: f32,
}
