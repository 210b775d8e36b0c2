//! Off-thread chunk builds on the rayon pool.
//!
//! ```text
//! Owner thread                         rayon worker
//! ┌──────────────────┐
//! │ request(coord)   │─── in_flight.insert(coord)
//! └────────┬─────────┘
//!          │ rayon::spawn
//!          ▼
//!                                      ┌──────────────────┐
//!                                      │ build_chunk()    │
//!                                      └────────┬─────────┘
//!                                               │ sender.send
//! ┌──────────────────┐                          │
//! │ drain()          │◄─────────────────────────┘
//! │ in_flight.remove │
//! └──────────────────┘
//! ```
//!
//! A coordinate stays in flight from `request` until its completion has
//! been drained, so at most one build per coordinate exists at any time.
//! Only the owner thread touches the in-flight set; workers share nothing
//! but the sampler and the channel.

use std::collections::HashSet;
use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, Sender};
use smallvec::SmallVec;

use crate::density::DensitySampler;
use crate::error::Result;
use crate::pipeline::{build_chunk, BuiltChunk, ChunkSpec};
use crate::types::ChunkCoord;

/// Outcome of one pooled build.
#[derive(Debug)]
pub struct BuildCompletion {
  pub coord: ChunkCoord,
  pub result: Result<BuiltChunk>,
}

/// Batch returned by [`BuildQueue::drain`].
pub type Completions = SmallVec<[BuildCompletion; 8]>;

pub struct BuildQueue<S> {
  sampler: Arc<S>,
  spec: ChunkSpec,
  in_flight: HashSet<ChunkCoord>,
  sender: Sender<BuildCompletion>,
  receiver: Receiver<BuildCompletion>,
}

impl<S: DensitySampler + 'static> BuildQueue<S> {
  pub fn new(sampler: Arc<S>, spec: ChunkSpec) -> Self {
    let (sender, receiver) = channel::unbounded();
    Self {
      sampler,
      spec,
      in_flight: HashSet::new(),
      sender,
      receiver,
    }
  }

  /// Start building `coord` unless it is already in flight.
  ///
  /// Returns `true` if a build was spawned.
  pub fn request(&mut self, coord: ChunkCoord) -> bool {
    if !self.in_flight.insert(coord) {
      return false;
    }

    let sampler = Arc::clone(&self.sampler);
    let sender = self.sender.clone();
    let spec = self.spec;

    rayon::spawn(move || {
      let result = build_chunk(coord, &spec, &*sampler);
      // The receiver lives as long as the queue; a send error means the
      // queue was dropped and nobody wants the result.
      let _ = sender.send(BuildCompletion { coord, result });
    });

    true
  }
}

impl<S> BuildQueue<S> {
  /// Collect every finished build without blocking.
  pub fn drain(&mut self) -> Completions {
    let completions: Completions = self.receiver.try_iter().collect();
    for completion in &completions {
      self.in_flight.remove(&completion.coord);
    }
    completions
  }

  #[inline]
  pub fn is_in_flight(&self, coord: &ChunkCoord) -> bool {
    self.in_flight.contains(coord)
  }

  #[inline]
  pub fn in_flight_count(&self) -> usize {
    self.in_flight.len()
  }
}

#[cfg(test)]
#[path = "build_queue_test.rs"]
mod build_queue_test;
