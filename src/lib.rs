//! Fixed-tick arcade drift simulation: vehicle physics, drift scoring,
//! clipping-zone detection, instant replay and best-run ghost playback.
//!
//! The [`sim::Session`] owns all simulation state and advances one 1/60 s
//! tick per [`sim::Session::step`] call; [`scheduler::FixedStepScheduler`]
//! gates those calls from a render loop. Rendering, audio and input
//! collection live outside this crate and talk to the session through
//! snapshots, getters and explicit control methods only.

pub mod consts;
pub mod logging;
pub mod math;
pub mod scheduler;
pub mod sim;
pub mod track_map_file;
