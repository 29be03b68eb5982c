//! Process-wide (or caller-scoped) mutable configuration, bundled into one
//! [`LayoutContext`] rather than free-floating global statics, per the Design Notes in
//! SPEC_FULL.md §9.
//!
//! A [`Tree`](crate::node::Tree) owns its own `LayoutContext` by default; callers who want
//! the single-global-context ergonomics of the reference embedding API can instead share
//! [`LayoutContext::global`], a lazily-constructed `Mutex`-guarded singleton (the same
//! `once_cell::sync::Lazy` pattern the teacher uses for its own lazy globals).

use once_cell::sync::Lazy;
use std::sync::Mutex;

use crate::error::{LayoutError, Result};
use crate::logger::{default_logger, LogLevel, Logger};

/// Feature flags that change the algorithm's behavior; off by default, matching the
/// reference embedding API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentalFeature {
  /// Enables the post-layout pixel-rounding pass (§4.11).
  Rounding,
  /// Enables the "web" flex-basis regeneration rule in step 1 of §4.9.
  WebFlexBasis,
}

const FEATURE_COUNT: usize = 2;

fn feature_index(feature: ExperimentalFeature) -> usize {
  match feature {
    ExperimentalFeature::Rounding => 0,
    ExperimentalFeature::WebFlexBasis => 1,
  }
}

/// Bundled process-wide (or caller-scoped) state: the generation counter, the
/// node-instance counter, experimental-feature flags, and the installed logger.
pub struct LayoutContext {
  generation: u32,
  instance_count: usize,
  features: [bool; FEATURE_COUNT],
  logger: Box<dyn Logger>,
  allocator_swapped: bool,
}

impl LayoutContext {
  pub fn new() -> Self {
    LayoutContext {
      generation: 0,
      instance_count: 0,
      features: [false; FEATURE_COUNT],
      logger: default_logger(),
      allocator_swapped: false,
    }
  }

  /// A lazily-constructed, `Mutex`-guarded default context, for callers who want the
  /// single-global-context ergonomics of the reference embedding API instead of
  /// threading a `LayoutContext` through explicitly.
  pub fn global() -> &'static Mutex<LayoutContext> {
    static GLOBAL: Lazy<Mutex<LayoutContext>> = Lazy::new(|| Mutex::new(LayoutContext::new()));
    &GLOBAL
  }

  /// Advance the generation counter; called once per top-level `compute_layout`.
  pub fn bump_generation(&mut self) -> u32 {
    self.generation = self.generation.wrapping_add(1);
    self.generation
  }

  pub fn generation(&self) -> u32 {
    self.generation
  }

  pub fn instance_count(&self) -> usize {
    self.instance_count
  }

  pub(crate) fn register_instance(&mut self) {
    self.instance_count += 1;
  }

  pub(crate) fn unregister_instance(&mut self) {
    self.instance_count = self.instance_count.saturating_sub(1);
  }

  pub fn set_experimental_feature_enabled(&mut self, feature: ExperimentalFeature, enabled: bool) {
    self.features[feature_index(feature)] = enabled;
  }

  pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
    self.features[feature_index(feature)]
  }

  pub fn set_logger(&mut self, logger: Box<dyn Logger>) {
    self.logger = logger;
  }

  pub fn log(&self, level: LogLevel, message: &str) {
    self.logger.log(level, message);
  }

  /// Mirrors the reference embedding API's `SetMemoryFuncs`: swapping allocator hooks is
  /// only permitted while no nodes from this context are live. The engine itself only
  /// ever allocates through the tree's arena `Vec`, so this is a capability marker kept
  /// for parity with §6/§7 rather than a hook that's actually invoked.
  pub fn set_memory_funcs_swapped(&mut self) -> Result<()> {
    if self.instance_count != 0 {
      return Err(LayoutError::AllocatorSwapWhileLive(self.instance_count));
    }
    self.allocator_swapped = true;
    Ok(())
  }

  pub fn memory_funcs_swapped(&self) -> bool {
    self.allocator_swapped
  }
}

impl Default for LayoutContext {
  fn default() -> Self {
    LayoutContext::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generation_advances_monotonically() {
    let mut ctx = LayoutContext::new();
    assert_eq!(ctx.bump_generation(), 1);
    assert_eq!(ctx.bump_generation(), 2);
  }

  #[test]
  fn allocator_swap_rejected_while_live() {
    let mut ctx = LayoutContext::new();
    ctx.register_instance();
    assert!(ctx.set_memory_funcs_swapped().is_err());
    ctx.unregister_instance();
    assert!(ctx.set_memory_funcs_swapped().is_ok());
  }

  #[test]
  fn experimental_features_default_off() {
    let ctx = LayoutContext::new();
    assert!(!ctx.is_experimental_feature_enabled(ExperimentalFeature::Rounding));
    assert!(!ctx.is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis));
  }
}
