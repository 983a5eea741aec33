//! Binary track bitmap files.
//!
//! A `.dtm` file carries one pre-decoded RGBA bitmap plus the world extents
//! it spans: a 4-byte magic, pixel dimensions, world extents, then the raw
//! pixel payload. Decoding cost is paid once at load; the simulation only
//! ever reads the retained buffer.

use std::{
    fs,
    io::{self, Cursor, Read},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec2;
use thiserror::Error;

use crate::sim::TrackMap;

pub const TRACK_MAP_FILE_EXTENSION: &str = "dtm";

const MAGIC: [u8; 4] = *b"DTM1";

/// Largest accepted bitmap edge, to reject garbage headers before allocating
const MAX_DIMENSION_PX: u32 = 8192;

#[derive(Debug, Error)]
pub enum TrackMapError {
    #[error("io error reading track map: {0}")]
    Io(#[from] io::Error),
    #[error("not a track map file (bad magic)")]
    BadMagic,
    #[error("track map dimensions {width}x{height} out of range")]
    BadDimensions { width: u32, height: u32 },
    #[error("track map world extents must be positive and finite")]
    DegenerateWorld,
    #[error("expected {expected} pixel bytes, found {actual}")]
    PixelCount { expected: usize, actual: usize },
}

pub fn read_from_file(path: &Path) -> Result<TrackMap, TrackMapError> {
    read_from_bytes(fs::read(path)?)
}

pub fn read_from_bytes(bytes: Vec<u8>) -> Result<TrackMap, TrackMapError> {
    let mut cursor = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(TrackMapError::BadMagic);
    }

    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;
    if width == 0 || height == 0 || width > MAX_DIMENSION_PX || height > MAX_DIMENSION_PX {
        return Err(TrackMapError::BadDimensions { width, height });
    }

    let world_w = cursor.read_f32::<LittleEndian>()?;
    let world_h = cursor.read_f32::<LittleEndian>()?;
    if !(world_w.is_finite() && world_h.is_finite()) {
        return Err(TrackMapError::DegenerateWorld);
    }

    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    cursor.read_exact(&mut pixels)?;

    TrackMap::from_rgba(width, height, Vec2::new(world_w, world_h), pixels)
}

/// Writer counterpart used by the track editor's export path (and tests).
pub fn write_to_bytes(map: &TrackMap) -> Vec<u8> {
    let (width, height) = map.dimensions_px();
    let world = map.world();
    let pixels = map.pixels();

    let mut out = Vec::with_capacity(20 + pixels.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&world.x.to_le_bytes());
    out.extend_from_slice(&world.y.to_le_bytes());
    out.extend_from_slice(pixels);
    out
}
