//! Store configuration.
//!
//! Loaded from TOML; every field has a default, so an empty document is a
//! valid configuration. Validation happens once, before any chunk is built:
//! an invalid value is reported as a [`ConfigError`] and never coerced.
//!
//! ```toml
//! chunk_size = [8, 8, 8]
//! view_distance = 16.0
//! threshold = 0.5
//! build_mode = "pooled"
//!
//! [noise]
//! scale = 10.0
//! horizon_level = 2.0
//! octave_count = 4
//! ```

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::constants::MAX_CHUNK_SAMPLES;
use crate::error::ConfigError;
use crate::noise::NoiseParams;

/// Where chunk meshes are built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
  /// On the calling thread, inside `update`.
  #[default]
  Inline,
  /// On the rayon pool; results are published on a later `update`.
  Pooled,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
  /// Cells per chunk on each axis.
  pub chunk_size: [u32; 3],
  /// Radius (world units) of the box of chunks kept active around the viewer.
  pub view_distance: f32,
  /// Iso-level separating solid from empty.
  pub threshold: f32,
  pub noise: NoiseParams,
  /// When set, every chunk size component must be a multiple of it.
  pub dispatch_granularity: Option<[u32; 3]>,
  /// Share vertices between triangles that cross the same lattice edge.
  pub weld_vertices: bool,
  pub build_mode: BuildMode,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      chunk_size: [8, 8, 8],
      view_distance: 16.0,
      threshold: 0.5,
      noise: NoiseParams::default(),
      dispatch_granularity: None,
      weld_vertices: false,
      build_mode: BuildMode::Inline,
    }
  }
}

impl TerrainConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse and validate a TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: TerrainConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Read, parse and validate a TOML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.chunk_size.iter().any(|&s| s == 0) {
      return Err(ConfigError::ChunkSize(self.chunk_size));
    }
    let samples: u64 = self.chunk_size.iter().map(|&s| u64::from(s) + 1).product();
    if samples > MAX_CHUNK_SAMPLES {
      return Err(ConfigError::ChunkTooLarge {
        size: self.chunk_size,
        samples,
        limit: MAX_CHUNK_SAMPLES,
      });
    }
    if let Some(granularity) = self.dispatch_granularity {
      let divisible = self
        .chunk_size
        .iter()
        .zip(granularity)
        .all(|(&size, g)| g != 0 && size % g == 0);
      if !divisible {
        return Err(ConfigError::DispatchGranularity {
          size: self.chunk_size,
          granularity,
        });
      }
    }
    validate_view_distance(self.view_distance)?;
    if !self.threshold.is_finite() {
      return Err(ConfigError::Threshold(self.threshold));
    }
    self.noise.validate()
  }

  pub fn with_chunk_size(mut self, chunk_size: [u32; 3]) -> Self {
    self.chunk_size = chunk_size;
    self
  }

  pub fn with_view_distance(mut self, view_distance: f32) -> Self {
    self.view_distance = view_distance;
    self
  }

  pub fn with_threshold(mut self, threshold: f32) -> Self {
    self.threshold = threshold;
    self
  }

  pub fn with_noise(mut self, noise: NoiseParams) -> Self {
    self.noise = noise;
    self
  }

  pub fn with_dispatch_granularity(mut self, granularity: [u32; 3]) -> Self {
    self.dispatch_granularity = Some(granularity);
    self
  }

  pub fn with_weld_vertices(mut self, weld: bool) -> Self {
    self.weld_vertices = weld;
    self
  }

  pub fn with_build_mode(mut self, mode: BuildMode) -> Self {
    self.build_mode = mode;
    self
  }

  #[inline]
  pub fn chunk_size_vec(&self) -> Vec3 {
    Vec3::new(
      self.chunk_size[0] as f32,
      self.chunk_size[1] as f32,
      self.chunk_size[2] as f32,
    )
  }

  /// Chunk half-extent of the required box for the configured view distance.
  pub fn chunk_range(&self) -> [i32; 3] {
    chunk_range(self.view_distance, self.chunk_size)
  }
}

/// `ceil(view_distance / chunk_size)` per axis.
pub fn chunk_range(view_distance: f32, chunk_size: [u32; 3]) -> [i32; 3] {
  chunk_size.map(|s| (view_distance / s as f32).ceil() as i32)
}

pub(crate) fn validate_view_distance(view_distance: f32) -> Result<(), ConfigError> {
  if view_distance.is_finite() && view_distance > 0.0 {
    Ok(())
  } else {
    Err(ConfigError::ViewDistance(view_distance))
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
