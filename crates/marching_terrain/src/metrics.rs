//! Streaming statistics for a [`ChunkStore`](crate::chunk_store::ChunkStore).
//!
//! Compiled in with the `metrics` feature and toggled at runtime through
//! [`COLLECT_METRICS`]. When either is off every `record_*` call is a no-op.
//!
//! ```ignore
//! use std::sync::atomic::Ordering;
//! use marching_terrain::metrics::COLLECT_METRICS;
//!
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// True when metrics are compiled in and enabled at runtime.
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity FIFO of recent samples.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a value, evicting the oldest when full.
  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = *self.buffer.iter().min()?;
    let max = *self.buffer.iter().max()?;
    Some((min, max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Counters and timings gathered across store updates.
#[derive(Debug, Clone, Default)]
pub struct StreamingMetrics {
  /// Per-chunk build time (grid plus extraction) in microseconds.
  pub build_timings: RollingWindow<u64>,
  /// Wall time of each `update` call in microseconds.
  pub update_timings: RollingWindow<u64>,

  pub chunks_built: u64,
  pub triangles_built: u64,
  pub activations: u64,
  pub deactivations: u64,

  // Snapshot after the last update.
  pub active_chunks: usize,
  pub cached_chunks: usize,
  pub in_flight: usize,
}

impl StreamingMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_build(&mut self, build_us: u64, triangles: usize) {
    if !is_enabled() {
      return;
    }
    self.build_timings.push(build_us);
    self.chunks_built += 1;
    self.triangles_built += triangles as u64;
  }

  pub fn record_update(&mut self, update_us: u64, activated: usize, deactivated: usize) {
    if !is_enabled() {
      return;
    }
    self.update_timings.push(update_us);
    self.activations += activated as u64;
    self.deactivations += deactivated as u64;
  }

  pub fn record_snapshot(&mut self, active: usize, cached: usize, in_flight: usize) {
    if !is_enabled() {
      return;
    }
    self.active_chunks = active;
    self.cached_chunks = cached;
    self.in_flight = in_flight;
  }

  pub fn avg_build_us(&self) -> f64 {
    self.build_timings.average()
  }

  pub fn avg_update_us(&self) -> f64 {
    self.update_timings.average()
  }

  /// Clear timings and snapshots. Cumulative counters are kept.
  pub fn reset(&mut self) {
    self.build_timings.clear();
    self.update_timings.clear();
    self.active_chunks = 0;
    self.cached_chunks = 0;
    self.in_flight = 0;
  }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
