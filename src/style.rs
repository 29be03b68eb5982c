//! Per-node style: the full set of flexbox properties a [`crate::node::Node`] carries,
//! plus the enums they're drawn from.
//!
//! Enum naming follows the teacher's `ComputedStyles` (`layout/mod.rs`): `FlexDirection`,
//! `JustifyContent`, `AlignItems`/`AlignSelf`/`AlignContent`, `PositionType`, `FlexWrap`.
//! The field set is the full spec's (min/max dimensions, aspect ratio, the 9-edge arrays),
//! which the teacher's CSS-utility-class engine didn't need.

use crate::value::{Edge, Edges, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
  #[default]
  Inherit,
  Ltr,
  Rtl,
}

/// The default is `Column`, not `Row` as in CSS — a deliberate deviation carried over
/// from the reference algorithm (see SPEC_FULL.md Non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
  #[default]
  Column,
  ColumnReverse,
  Row,
  RowReverse,
}

impl FlexDirection {
  pub fn is_row(self) -> bool {
    matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
  }

  pub fn is_column(self) -> bool {
    matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
  }

  pub fn is_reverse(self) -> bool {
    matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
  #[default]
  FlexStart,
  Center,
  FlexEnd,
  SpaceBetween,
  SpaceAround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
  #[default]
  Auto,
  FlexStart,
  Center,
  FlexEnd,
  Stretch,
  Baseline,
  SpaceBetween,
  SpaceAround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionType {
  #[default]
  Relative,
  Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
  #[default]
  NoWrap,
  Wrap,
  WrapReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
  #[default]
  Flex,
  None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
  Width,
  Height,
}

#[derive(Debug, Clone)]
pub struct Style {
  pub direction: Direction,
  pub flex_direction: FlexDirection,
  pub justify_content: JustifyContent,
  pub align_content: Align,
  pub align_items: Align,
  pub align_self: Align,
  pub position_type: PositionType,
  pub flex_wrap: FlexWrap,
  pub overflow: Overflow,
  pub display: Display,

  pub flex_grow: f32,
  pub flex_shrink: f32,
  pub flex_basis: Value,

  pub dimensions: [Value; 2],
  pub min_dimensions: [Value; 2],
  pub max_dimensions: [Value; 2],

  pub margin: Edges,
  pub position: Edges,
  pub padding: Edges,
  pub border: Edges,

  pub aspect_ratio: f32,
}

impl Default for Style {
  fn default() -> Self {
    Style {
      direction: Direction::default(),
      flex_direction: FlexDirection::default(),
      justify_content: JustifyContent::default(),
      align_content: Align::Stretch,
      align_items: Align::Stretch,
      align_self: Align::Auto,
      position_type: PositionType::default(),
      flex_wrap: FlexWrap::default(),
      overflow: Overflow::default(),
      display: Display::default(),
      flex_grow: f32::NAN,
      flex_shrink: f32::NAN,
      flex_basis: Value::AUTO,
      dimensions: [Value::AUTO, Value::AUTO],
      min_dimensions: [Value::UNDEFINED, Value::UNDEFINED],
      max_dimensions: [Value::UNDEFINED, Value::UNDEFINED],
      margin: Edges::default(),
      position: Edges::default(),
      padding: Edges::default(),
      border: Edges::default(),
      aspect_ratio: f32::NAN,
    }
  }
}

impl Style {
  pub fn flex_grow(&self) -> f32 {
    if self.flex_grow.is_nan() { 0.0 } else { self.flex_grow }
  }

  pub fn flex_shrink(&self) -> f32 {
    if self.flex_shrink.is_nan() { 0.0 } else { self.flex_shrink }
  }

  pub fn has_aspect_ratio(&self) -> bool {
    !self.aspect_ratio.is_nan()
  }

  /// Set a single `flex` shorthand: grow=shrink=value, basis=0 (mirrors the CSS
  /// `flex: N` shorthand). Exposed because §3 lists `flex` alongside `flexGrow`/
  /// `flexShrink` as a settable scalar.
  pub fn set_flex(&mut self, value: f32) {
    if value.is_nan() {
      self.flex_grow = f32::NAN;
      self.flex_shrink = f32::NAN;
      self.flex_basis = Value::AUTO;
    } else if value > 0.0 {
      self.flex_grow = value;
      self.flex_shrink = 0.0;
      self.flex_basis = Value::ZERO;
    } else if value < 0.0 {
      self.flex_grow = 0.0;
      self.flex_shrink = -value;
      self.flex_basis = Value::ZERO;
    } else {
      self.flex_grow = 0.0;
      self.flex_shrink = 0.0;
      self.flex_basis = Value::AUTO;
    }
  }

  pub fn dimension(&self, d: Dimension) -> Value {
    self.dimensions[d as usize]
  }

  pub fn min_dimension(&self, d: Dimension) -> Value {
    self.min_dimensions[d as usize]
  }

  pub fn max_dimension(&self, d: Dimension) -> Value {
    self.max_dimensions[d as usize]
  }

  /// Invariant 4: `resolved_dimensions[d]` points at `max_dimensions[d]` when it is
  /// defined and equal to `min_dimensions[d]`, otherwise at `dimensions[d]`.
  pub fn resolved_dimension(&self, d: Dimension) -> Value {
    let min = self.min_dimension(d);
    let max = self.max_dimension(d);
    if !max.is_undefined() && !min.is_undefined() && max.scalar == min.scalar && max.unit == min.unit {
      max
    } else {
      self.dimension(d)
    }
  }

  pub fn margin_edge(&self, edge: Edge) -> Value {
    self.margin.get(edge)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_flex_direction_is_column() {
    assert_eq!(Style::default().flex_direction, FlexDirection::Column);
  }

  #[test]
  fn resolved_dimension_prefers_max_when_pinned_to_min() {
    let mut style = Style::default();
    style.min_dimensions[0] = Value::points(50.0);
    style.max_dimensions[0] = Value::points(50.0);
    style.dimensions[0] = Value::points(10.0);
    let resolved = style.resolved_dimension(Dimension::Width);
    assert_eq!(resolved.scalar, 50.0);
  }

  #[test]
  fn set_flex_shorthand_positive() {
    let mut style = Style::default();
    style.set_flex(2.0);
    assert_eq!(style.flex_grow(), 2.0);
    assert_eq!(style.flex_shrink(), 0.0);
    assert_eq!(style.flex_basis.scalar, 0.0);
  }
}
