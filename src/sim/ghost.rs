use crate::consts::HISTORY_CAPACITY;
use glam::Vec2;
use std::collections::VecDeque;

/// One lightweight pose sample per live tick; just enough to draw the ghost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostFrame {
    pub pos: Vec2,
    pub angle: f32,
    pub drift_angle: f32,
}

/// Best finished run so far: its trajectory and the score it banked.
#[derive(Clone, Debug)]
pub struct GhostRun {
    frames: Vec<GhostFrame>,
    pub total_score: f32,
}

impl GhostRun {
    /// Pose at a given run tick. Both the recorded run and the live run are
    /// indexed by the session's run-tick counter, so the ghost stays locked
    /// to the simulation clock rather than to render cadence.
    #[must_use]
    pub fn frame_at(&self, run_tick: u64) -> Option<GhostFrame> {
        self.frames.get(run_tick as usize).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Records the current run's trajectory and retains only the highest-scoring
/// finished run for overlay playback.
#[derive(Clone, Debug, Default)]
pub struct GhostRecorder {
    current: VecDeque<GhostFrame>,
    best: Option<GhostRun>,
}

impl GhostRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: VecDeque::with_capacity(HISTORY_CAPACITY),
            best: None,
        }
    }

    /// Appends one pose sample for the current live tick.
    pub fn record(&mut self, frame: GhostFrame) {
        if self.current.len() == HISTORY_CAPACITY {
            self.current.pop_front();
        }
        self.current.push_back(frame);
    }

    /// Ends the current run with the score it banked.
    ///
    /// The stored run is replaced only by a strictly better one; ties keep
    /// the incumbent. The current-run buffer is cleared either way, ready
    /// for the next attempt.
    pub fn finish_run(&mut self, banked_score: f32) {
        if !self.current.is_empty() {
            let beats_best = match &self.best {
                Some(best) => banked_score > best.total_score,
                None => true,
            };

            if beats_best {
                self.best = Some(GhostRun {
                    frames: self.current.iter().copied().collect(),
                    total_score: banked_score,
                });
            }
        }

        self.current.clear();
    }

    #[must_use]
    pub fn best(&self) -> Option<&GhostRun> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn current_len(&self) -> usize {
        self.current.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(x: f32) -> GhostFrame {
        GhostFrame {
            pos: Vec2::new(x, 0.0),
            angle: 0.0,
            drift_angle: 0.0,
        }
    }

    #[test]
    fn higher_score_replaces_stored_run() {
        let mut recorder = GhostRecorder::new();

        recorder.record(pose(1.0));
        recorder.finish_run(100.0);
        recorder.record(pose(2.0));
        recorder.finish_run(150.0);

        assert_eq!(recorder.best().unwrap().total_score, 150.0);
        assert_eq!(recorder.best().unwrap().frame_at(0).unwrap().pos.x, 2.0);
    }

    #[test]
    fn lower_score_keeps_stored_run() {
        let mut recorder = GhostRecorder::new();

        recorder.record(pose(1.0));
        recorder.finish_run(150.0);
        recorder.record(pose(2.0));
        recorder.finish_run(100.0);

        assert_eq!(recorder.best().unwrap().total_score, 150.0);
        assert_eq!(recorder.best().unwrap().frame_at(0).unwrap().pos.x, 1.0);
    }

    #[test]
    fn empty_run_never_competes() {
        let mut recorder = GhostRecorder::new();
        recorder.finish_run(9999.0);
        assert!(recorder.best().is_none());
    }

    #[test]
    fn finish_clears_the_current_buffer() {
        let mut recorder = GhostRecorder::new();
        recorder.record(pose(1.0));
        recorder.finish_run(10.0);
        assert_eq!(recorder.current_len(), 0);
    }

    #[test]
    fn current_run_is_capacity_bounded() {
        let mut recorder = GhostRecorder::new();
        for i in 0..(HISTORY_CAPACITY + 5) {
            recorder.record(pose(i as f32));
        }
        assert_eq!(recorder.current_len(), HISTORY_CAPACITY);
    }

    #[test]
    fn frame_at_past_end_is_none() {
        let mut recorder = GhostRecorder::new();
        recorder.record(pose(1.0));
        recorder.finish_run(10.0);

        let best = recorder.best().unwrap();
        assert!(best.frame_at(0).is_some());
        assert!(best.frame_at(1).is_none());
    }
}
