//! The per-node measurement cache: compatibility tests that let a later layout request
//! reuse an earlier computed size when the new constraints are no looser than what was
//! actually measured.
//!
//! Transcribed from `original_source/Yoga.c`'s `RYGNodeCanUseCachedMeasurement` and its
//! three helper predicates, renamed to this crate's snake_case convention. The four
//! compatibility rules are exactly the reference algorithm's; see SPEC_FULL.md §4.4.

/// How a dimension's available space should be interpreted during one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
  /// No constraint; the node should report its max-content size.
  Undefined,
  /// The available size is the node's final size.
  Exactly,
  /// The available size is an upper bound; the node may report less (fit-content).
  AtMost,
}

/// A single cached measurement: the inputs that produced it, and the size it produced.
#[derive(Debug, Clone, Copy)]
pub struct CachedMeasurement {
  pub available_width: f32,
  pub available_height: f32,
  pub width_mode: MeasureMode,
  pub height_mode: MeasureMode,
  pub computed_width: f32,
  pub computed_height: f32,
}

/// Absolute tolerance for treating two `f32`s as equal throughout the layout algorithm.
pub const FLOAT_EPSILON: f32 = 1e-4;

/// Float comparison used everywhere in the algorithm in place of `==`: NaN compares equal
/// to NaN (both mean "undefined"), and finite values compare equal within
/// [`FLOAT_EPSILON`].
pub fn floats_equal(a: f32, b: f32) -> bool {
  if a.is_nan() || b.is_nan() {
    a.is_nan() && b.is_nan()
  } else {
    (a - b).abs() < FLOAT_EPSILON
  }
}

fn size_is_exact_and_matches_old_measured_size(mode: MeasureMode, size: f32, last_computed: f32) -> bool {
  mode == MeasureMode::Exactly && floats_equal(size, last_computed)
}

fn old_size_is_unspecified_and_still_fits(
  mode: MeasureMode,
  size: f32,
  last_mode: MeasureMode,
  last_computed: f32,
) -> bool {
  mode == MeasureMode::AtMost
    && last_mode == MeasureMode::Undefined
    && (size >= last_computed || floats_equal(size, last_computed))
}

fn new_measure_size_is_stricter_and_still_valid(
  mode: MeasureMode,
  size: f32,
  last_mode: MeasureMode,
  last_size: f32,
  last_computed: f32,
) -> bool {
  last_mode == MeasureMode::AtMost
    && mode == MeasureMode::AtMost
    && last_size > size
    && (last_computed <= size || floats_equal(last_computed, size))
}

/// Decide whether a prior measurement (`last_*`) can stand in for a fresh layout request
/// (`width`/`height`/`width_mode`/`height_mode`) without recomputation.
///
/// `margin_row`/`margin_column` are the node's resolved main/cross margins, subtracted
/// from the requested size before comparing against the computed (content-box) size that
/// was cached.
#[allow(clippy::too_many_arguments)]
pub fn can_use_cached_measurement(
  width_mode: MeasureMode,
  width: f32,
  height_mode: MeasureMode,
  height: f32,
  last_width_mode: MeasureMode,
  last_width: f32,
  last_height_mode: MeasureMode,
  last_height: f32,
  last_computed_width: f32,
  last_computed_height: f32,
  margin_row: f32,
  margin_column: f32,
) -> bool {
  if last_computed_height < 0.0 || last_computed_width < 0.0 {
    return false;
  }

  let has_same_width_spec = last_width_mode == width_mode && floats_equal(last_width, width);
  let has_same_height_spec = last_height_mode == height_mode && floats_equal(last_height, height);

  let width_is_compatible = has_same_width_spec
    || size_is_exact_and_matches_old_measured_size(width_mode, width - margin_row, last_computed_width)
    || old_size_is_unspecified_and_still_fits(width_mode, width - margin_row, last_width_mode, last_computed_width)
    || new_measure_size_is_stricter_and_still_valid(
      width_mode,
      width - margin_row,
      last_width_mode,
      last_width,
      last_computed_width,
    );

  let height_is_compatible = has_same_height_spec
    || size_is_exact_and_matches_old_measured_size(height_mode, height - margin_column, last_computed_height)
    || old_size_is_unspecified_and_still_fits(
      height_mode,
      height - margin_column,
      last_height_mode,
      last_computed_height,
    )
    || new_measure_size_is_stricter_and_still_valid(
      height_mode,
      height - margin_column,
      last_height_mode,
      last_height,
      last_computed_height,
    );

  width_is_compatible && height_is_compatible
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_same_request_is_compatible() {
    assert!(can_use_cached_measurement(
      MeasureMode::Exactly,
      100.0,
      MeasureMode::Exactly,
      50.0,
      MeasureMode::Exactly,
      100.0,
      MeasureMode::Exactly,
      50.0,
      100.0,
      50.0,
      0.0,
      0.0,
    ));
  }

  #[test]
  fn negative_cached_size_is_never_usable() {
    assert!(!can_use_cached_measurement(
      MeasureMode::Exactly,
      100.0,
      MeasureMode::Exactly,
      50.0,
      MeasureMode::Exactly,
      100.0,
      MeasureMode::Exactly,
      50.0,
      -1.0,
      50.0,
      0.0,
      0.0,
    ));
  }

  /// §8 scenario 8: a subtree measured at AtMost(200) producing computed=120 can satisfy
  /// a later AtMost(150) request without recomputation (compatibility rule 4).
  #[test]
  fn stricter_at_most_still_fits() {
    assert!(can_use_cached_measurement(
      MeasureMode::AtMost,
      150.0,
      MeasureMode::Undefined,
      f32::NAN,
      MeasureMode::AtMost,
      200.0,
      MeasureMode::Undefined,
      f32::NAN,
      120.0,
      80.0,
      0.0,
      0.0,
    ));
  }

  #[test]
  fn looser_at_most_than_cached_computed_is_incompatible() {
    // Cached at AtMost(200) -> computed 190; requesting AtMost(150) no longer fits
    // (190 > 150), so the prior measurement cannot stand in.
    assert!(!can_use_cached_measurement(
      MeasureMode::AtMost,
      150.0,
      MeasureMode::Undefined,
      f32::NAN,
      MeasureMode::AtMost,
      200.0,
      MeasureMode::Undefined,
      f32::NAN,
      190.0,
      80.0,
      0.0,
      0.0,
    ));
  }

  #[test]
  fn undefined_old_size_still_fits_at_most() {
    assert!(old_size_is_unspecified_and_still_fits(
      MeasureMode::AtMost,
      150.0,
      MeasureMode::Undefined,
      120.0,
    ));
    assert!(!old_size_is_unspecified_and_still_fits(
      MeasureMode::AtMost,
      100.0,
      MeasureMode::Undefined,
      120.0,
    ));
  }
}
