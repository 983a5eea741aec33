use super::{
    ClippingConfig, ConfigError, DriftScore, GhostFrame, GhostRecorder, GhostRun, InputVector,
    PhysicsConfig, PhysicsOverrides, ReplayBuffer, ReplayPlayer, ReplayStatus, ScoringConfig,
    TrackMap, VehicleState, vehicle,
};
use crate::{
    consts::{REPLAY_STATUS_INTERVAL, TICK_TIME, viewport},
    track_map_file::{self, TrackMapError},
};
use glam::Vec2;
use log::{debug, info};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Live,
    /// Physics bypassed; the replay player drives the displayed state
    Replay,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub physics: PhysicsConfig,
    pub scoring: ScoringConfig,
    pub clipping: ClippingConfig,
    /// World extents used while no track map is loaded
    pub viewport: Vec2,
    /// Respawn pose applied on reset
    pub spawn: Vec2,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SessionConfig {
    pub const DEFAULT: Self = Self {
        physics: PhysicsConfig::STOCK,
        scoring: ScoringConfig::DEFAULT,
        clipping: ClippingConfig::DEFAULT,
        viewport: Vec2::new(viewport::WORLD_WIDTH, viewport::WORLD_HEIGHT),
        spawn: Vec2::new(viewport::WORLD_WIDTH / 2.0, viewport::WORLD_HEIGHT / 2.0),
    };
}

/// Per-tick sink data for the audio driver. Rebuilt every live tick; the
/// driver never feeds anything back into the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioFrame {
    pub speed: f32,
    pub drift_angle: f32,
    pub is_accelerating: bool,
}

/// Renderer-facing view of one tick, taken by value.
#[derive(Clone, Copy, Debug)]
pub struct SessionSnapshot {
    pub tick_count: u64,
    pub run_tick: u64,
    pub mode: SessionMode,
    pub vehicle: VehicleState,
    pub score: DriftScore,
    pub replay: ReplayStatus,
    pub ghost: Option<GhostFrame>,
}

/// Owns the whole simulation for one play session: the canonical vehicle
/// state, scoring, replay history and ghost recording.
///
/// Single-writer by construction: every mutation happens inside `step` or
/// one of the explicit control methods, all `&mut self`. Collaborators read
/// through snapshots and getters only.
pub struct Session {
    config: SessionConfig,
    track: Option<TrackMap>,
    controls: InputVector,
    vehicle: VehicleState,
    score: DriftScore,
    replay: ReplayBuffer,
    player: ReplayPlayer,
    ghost: GhostRecorder,
    mode: SessionMode,
    audio: AudioFrame,
    /// Lifetime tick counter, live and replay alike
    tick_count: u64,
    /// Live ticks since the last reset; indexes both the live run and the
    /// stored ghost run
    run_tick: u64,
    /// Ticks spent in replay mode since entering it, for status throttling
    replay_tick: u64,
    pending_status: Option<ReplayStatus>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::DEFAULT)
    }
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            track: None,
            controls: InputVector::DEFAULT,
            vehicle: VehicleState::spawned_at(config.spawn, &config.physics),
            score: DriftScore::DEFAULT,
            replay: ReplayBuffer::new(),
            player: ReplayPlayer::DEFAULT,
            ghost: GhostRecorder::new(),
            mode: SessionMode::Live,
            audio: AudioFrame::default(),
            tick_count: 0,
            run_tick: 0,
            replay_tick: 0,
            pending_status: None,
        }
    }

    /// Installs a decoded track map; clipping detection starts next tick.
    pub fn set_track(&mut self, track: TrackMap) {
        let (w, h) = track.dimensions_px();
        info!("track map installed: {w}x{h} px, world {}", track.world());
        self.track = Some(track);
    }

    /// Loads a `.dtm` track map from disk. On failure the session keeps
    /// running without a map (neutral multiplier); nothing in the tick loop
    /// ever waits on this.
    pub fn load_track(&mut self, path: &Path) -> Result<(), TrackMapError> {
        let track = track_map_file::read_from_file(path)?;
        self.set_track(track);
        Ok(())
    }

    pub fn clear_track(&mut self) {
        self.track = None;
    }

    /// Active world extents: the track map's, or the viewport fallback.
    #[must_use]
    pub fn world_bounds(&self) -> Vec2 {
        self.track
            .as_ref()
            .map_or(self.config.viewport, TrackMap::world)
    }

    /// Controls are read once per tick; the last write before a tick wins.
    pub const fn set_controls(&mut self, controls: InputVector) {
        self.controls = controls;
    }

    /// Validates and merges a preset override set into the physics config.
    /// Takes effect from the next tick; the current tick's config is never
    /// mutated mid-flight.
    pub fn apply_physics_overrides(&mut self, overrides: &PhysicsOverrides) -> Result<(), ConfigError> {
        overrides.validate()?;
        self.config.physics = overrides.apply_to(&self.config.physics);
        Ok(())
    }

    /// Advances the simulation by exactly one fixed tick.
    pub fn step(&mut self) {
        match self.mode {
            SessionMode::Live => self.step_live(),
            SessionMode::Replay => self.step_replay(),
        }
        self.tick_count += 1;
    }

    fn step_live(&mut self) {
        self.vehicle = vehicle::step(
            &self.vehicle,
            self.controls,
            &self.config.physics,
            self.world_bounds(),
        );

        let multiplier = self
            .track
            .as_ref()
            .map_or(1.0, |map| map.multiplier_at(&self.vehicle, &self.config.clipping));

        self.score.update(
            self.vehicle.speed,
            self.vehicle.drift_angle,
            multiplier,
            TICK_TIME,
            &self.config.scoring,
        );

        self.replay.push(self.vehicle);
        self.ghost.record(GhostFrame {
            pos: self.vehicle.pos,
            angle: self.vehicle.angle,
            drift_angle: self.vehicle.drift_angle,
        });

        self.audio = AudioFrame {
            speed: self.vehicle.speed,
            drift_angle: self.vehicle.drift_angle,
            is_accelerating: self.controls.throttle(),
        };

        self.run_tick += 1;
    }

    fn step_replay(&mut self) {
        self.player.advance(self.replay.len());
        if let Some(frame) = self.replay.get(self.player.frame_index()) {
            self.vehicle = *frame;
        }

        // Status goes out at ~10 Hz, not every tick
        if self.replay_tick % REPLAY_STATUS_INTERVAL == 0 {
            self.pending_status = Some(self.replay_status());
        }
        self.replay_tick += 1;
    }

    /// Switches the displayed state source from live physics to history.
    pub fn enter_replay(&mut self) {
        if self.mode == SessionMode::Replay {
            return;
        }

        info!("entering replay: {} recorded frames", self.replay.len());
        self.mode = SessionMode::Replay;
        self.player = ReplayPlayer::DEFAULT;
        self.replay_tick = 0;
        self.pending_status = None;
    }

    /// Returns to live simulation, snapping the vehicle to the last recorded
    /// frame so play resumes where recording stopped.
    pub fn exit_replay(&mut self) {
        if self.mode == SessionMode::Live {
            return;
        }

        debug!("exiting replay at frame {}", self.player.frame_index());
        if let Some(last) = self.replay.last() {
            self.vehicle = *last;
        }
        self.mode = SessionMode::Live;
        self.pending_status = None;
    }

    pub fn replay_seek(&mut self, fraction: f32) {
        self.player.seek(fraction, self.replay.len());
    }

    pub fn replay_set_speed(&mut self, speed: f32) {
        self.player.set_speed(speed);
    }

    pub fn replay_toggle_pause(&mut self) {
        self.player.toggle_pause();
    }

    /// Takes the pending throttled status update, if one was emitted since
    /// the last poll.
    pub fn poll_replay_status(&mut self) -> Option<ReplayStatus> {
        self.pending_status.take()
    }

    #[must_use]
    pub fn replay_status(&self) -> ReplayStatus {
        ReplayStatus {
            frame: self.player.frame_index(),
            total: self.replay.len(),
            playing: self.player.playing,
            speed: self.player.speed,
        }
    }

    /// The external reset signal: the finished run competes for the stored
    /// ghost, all history clears and the vehicle respawns.
    pub fn reset(&mut self) {
        let banked = self.score.total_score;
        let previous_best = self.ghost.best().map(|run| run.total_score);

        self.ghost.finish_run(banked);

        let new_best = self.ghost.best().map(|run| run.total_score);
        if new_best != previous_best {
            info!("ghost run replaced: banked {banked}");
        }

        self.score.reset_total();
        self.replay.clear();
        self.player = ReplayPlayer::DEFAULT;
        self.mode = SessionMode::Live;
        self.pending_status = None;
        self.run_tick = 0;
        self.audio = AudioFrame::default();
        self.vehicle = VehicleState::spawned_at(self.config.spawn, &self.config.physics);
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    #[must_use]
    pub const fn score(&self) -> &DriftScore {
        &self.score
    }

    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub const fn run_tick(&self) -> u64 {
        self.run_tick
    }

    #[must_use]
    pub fn replay_len(&self) -> usize {
        self.replay.len()
    }

    #[must_use]
    pub fn best_ghost(&self) -> Option<&GhostRun> {
        self.ghost.best()
    }

    /// Ghost pose for the current run tick, if a stored run reaches it.
    #[must_use]
    pub fn ghost_frame(&self) -> Option<GhostFrame> {
        self.ghost.best().and_then(|run| run.frame_at(self.run_tick))
    }

    /// This tick's data for the audio driver.
    #[must_use]
    pub const fn audio_frame(&self) -> AudioFrame {
        self.audio
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tick_count: self.tick_count,
            run_tick: self.run_tick,
            mode: self.mode,
            vehicle: self.vehicle,
            score: self.score,
            replay: self.replay_status(),
            ghost: self.ghost_frame(),
        }
    }
}
