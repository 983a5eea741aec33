use super::VehicleState;
use crate::{consts::clipping, math::rotate_deg, track_map_file::TrackMapError};
use arrayvec::ArrayVec;
use glam::Vec2;

/// Points sampled on the vehicle silhouette: four corners plus the
/// front/left/right edge midpoints.
const SILHOUETTE_SAMPLES: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippingConfig {
    /// Zone color to match in the track bitmap (RGB)
    pub target_color: [u8; 3],
    /// Per-channel tolerance on 0-255 channels
    pub tolerance: u8,
    /// Multiplier returned while the silhouette overlaps a zone
    pub bonus: f32,
    /// Fraction of in-bounds sample points that must match
    pub min_coverage: f32,
}

impl Default for ClippingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ClippingConfig {
    pub const DEFAULT: Self = Self {
        target_color: clipping::TARGET_COLOR,
        tolerance: clipping::TOLERANCE,
        bonus: clipping::BONUS_MULTIPLIER,
        min_coverage: clipping::MIN_COVERAGE,
    };
}

/// A decoded track bitmap plus the world extents it spans.
///
/// Decoding happens once at load; zone checks afterwards are lookups into
/// the retained pixel buffer and never allocate.
#[derive(Clone, Debug)]
pub struct TrackMap {
    width_px: u32,
    height_px: u32,
    world: Vec2,
    /// RGBA, row-major from the top-left
    pixels: Vec<u8>,
}

impl TrackMap {
    pub fn from_rgba(
        width_px: u32,
        height_px: u32,
        world: Vec2,
        pixels: Vec<u8>,
    ) -> Result<Self, TrackMapError> {
        let expected = width_px as usize * height_px as usize * 4;
        if pixels.len() != expected {
            return Err(TrackMapError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        if !(world.x > 0.0 && world.y > 0.0) {
            return Err(TrackMapError::DegenerateWorld);
        }

        Ok(Self {
            width_px,
            height_px,
            world,
            pixels,
        })
    }

    /// World extents spanned by this map
    #[must_use]
    pub const fn world(&self) -> Vec2 {
        self.world
    }

    #[must_use]
    pub const fn dimensions_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Raw RGBA pixel buffer, row-major from the top-left
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clipping multiplier for the vehicle's current silhouette.
    ///
    /// The silhouette rotates with the heading only; the drift angle offsets
    /// travel direction, not the hull. Sample points falling outside the
    /// bitmap are skipped entirely rather than counted as misses.
    #[must_use]
    pub fn multiplier_at(&self, state: &VehicleState, config: &ClippingConfig) -> f32 {
        let half = state.size * 0.5;

        let offsets: ArrayVec<Vec2, SILHOUETTE_SAMPLES> = ArrayVec::from([
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(0.0, -half.y),
            Vec2::new(-half.x, 0.0),
            Vec2::new(half.x, 0.0),
        ]);

        let mut in_bounds = 0u32;
        let mut hits = 0u32;

        for offset in offsets {
            let point = state.pos + rotate_deg(offset, state.angle);
            let Some(rgb) = self.sample_nearest(point) else {
                continue;
            };

            in_bounds += 1;
            if Self::color_matches(rgb, config.target_color, config.tolerance) {
                hits += 1;
            }
        }

        if in_bounds > 0 && hits as f32 / in_bounds as f32 >= config.min_coverage {
            config.bonus
        } else {
            1.0
        }
    }

    /// Nearest-pixel RGB at a world position, or `None` outside the bitmap
    fn sample_nearest(&self, world_pos: Vec2) -> Option<[u8; 3]> {
        let px = world_pos.x / self.world.x * self.width_px as f32;
        let py = world_pos.y / self.world.y * self.height_px as f32;

        if px < 0.0 || py < 0.0 {
            return None;
        }
        let (px, py) = (px as u32, py as u32);
        if px >= self.width_px || py >= self.height_px {
            return None;
        }

        let idx = (py as usize * self.width_px as usize + px as usize) * 4;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    fn color_matches(rgb: [u8; 3], target: [u8; 3], tolerance: u8) -> bool {
        rgb.iter()
            .zip(target)
            .all(|(&c, t)| c.abs_diff(t) <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A map whose left half is the zone color and right half is black
    fn half_white_map(world: Vec2) -> TrackMap {
        const W: u32 = 64;
        const H: u32 = 64;

        let mut pixels = vec![0u8; (W * H * 4) as usize];
        for y in 0..H {
            for x in 0..W / 2 {
                let idx = ((y * W + x) * 4) as usize;
                pixels[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        TrackMap::from_rgba(W, H, world, pixels).unwrap()
    }

    fn vehicle_at(pos: Vec2) -> VehicleState {
        VehicleState {
            pos,
            size: Vec2::new(20.0, 40.0),
            ..VehicleState::DEFAULT
        }
    }

    #[test]
    fn inside_zone_returns_bonus() {
        let world = Vec2::new(640.0, 640.0);
        let map = half_white_map(world);
        let state = vehicle_at(Vec2::new(160.0, 320.0));

        let m = map.multiplier_at(&state, &ClippingConfig::DEFAULT);
        assert_eq!(m, clipping::BONUS_MULTIPLIER);
    }

    #[test]
    fn outside_zone_returns_neutral() {
        let world = Vec2::new(640.0, 640.0);
        let map = half_white_map(world);
        let state = vehicle_at(Vec2::new(480.0, 320.0));

        assert_eq!(map.multiplier_at(&state, &ClippingConfig::DEFAULT), 1.0);
    }

    #[test]
    fn out_of_bounds_samples_are_skipped() {
        let world = Vec2::new(640.0, 640.0);
        let map = half_white_map(world);

        // Hull straddles the left map edge; the in-bounds points all sit on
        // the white half, so the bonus still applies
        let state = vehicle_at(Vec2::new(1.0, 320.0));
        let m = map.multiplier_at(&state, &ClippingConfig::DEFAULT);
        assert_eq!(m, clipping::BONUS_MULTIPLIER);
    }

    #[test]
    fn pixel_count_mismatch_is_rejected() {
        let err = TrackMap::from_rgba(4, 4, Vec2::new(10.0, 10.0), vec![0u8; 10]);
        assert!(matches!(err, Err(TrackMapError::PixelCount { .. })));
    }
}
