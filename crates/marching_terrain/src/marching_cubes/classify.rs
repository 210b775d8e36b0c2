//! Cell classification.

use crate::constants::CORNER_COUNT;

/// 8-bit cube configuration: bit `i` set iff `samples[i] > threshold`.
///
/// A sample equal to the threshold counts as below it.
#[inline]
pub fn configuration(samples: &[f32; CORNER_COUNT], threshold: f32) -> u8 {
  let mut config = 0u8;
  for (i, &s) in samples.iter().enumerate() {
    if s > threshold {
      config |= 1 << i;
    }
  }
  config
}
