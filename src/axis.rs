//! Direction resolution and per-axis edge/margin/padding/border/position queries.
//!
//! No analog exists in the teacher (its `LayoutEngine` only supports row/column without
//! RTL); this module is written fresh in the teacher's naming/doc conventions, with exact
//! semantics ported from `original_source/Yoga.c`'s leading/trailing edge tables and
//! `RYGNodeLeading*`/`RYGNodeTrailing*`/`RYGNodeRelativePosition` family.

use crate::style::{Align, Direction, Dimension, FlexDirection, Style};
use crate::value::{resolve, resolve_margin, computed_edge_value, Edge, Value};

/// Resolve a node's style direction against its parent's resolved direction.
/// `Inherit` takes on the parent's direction; parent defaults to LTR at the root.
pub fn resolve_direction(style_direction: Direction, parent_direction: Direction) -> Direction {
  match style_direction {
    Direction::Inherit => {
      if parent_direction == Direction::Inherit {
        Direction::Ltr
      } else {
        parent_direction
      }
    }
    other => other,
  }
}

/// Swap Row↔RowReverse under RTL; identity otherwise (Column axes are never mirrored).
pub fn flex_direction_resolve(flex_dir: FlexDirection, direction: Direction) -> FlexDirection {
  if direction == Direction::Rtl {
    match flex_dir {
      FlexDirection::Row => FlexDirection::RowReverse,
      FlexDirection::RowReverse => FlexDirection::Row,
      other => other,
    }
  } else {
    flex_dir
  }
}

/// The axis perpendicular to `flex_dir`, after direction resolution.
pub fn flex_direction_cross(flex_dir: FlexDirection, direction: Direction) -> FlexDirection {
  if flex_dir.is_column() {
    flex_direction_resolve(FlexDirection::Row, direction)
  } else {
    FlexDirection::Column
  }
}

fn leading_edge(axis: FlexDirection) -> Edge {
  match axis {
    FlexDirection::Column => Edge::Top,
    FlexDirection::ColumnReverse => Edge::Bottom,
    FlexDirection::Row => Edge::Left,
    FlexDirection::RowReverse => Edge::Right,
  }
}

fn trailing_edge(axis: FlexDirection) -> Edge {
  match axis {
    FlexDirection::Column => Edge::Bottom,
    FlexDirection::ColumnReverse => Edge::Top,
    FlexDirection::Row => Edge::Right,
    FlexDirection::RowReverse => Edge::Left,
  }
}

/// The physical dimension (width/height) a given flex axis measures along.
pub fn axis_dimension(axis: FlexDirection) -> Dimension {
  if axis.is_row() { Dimension::Width } else { Dimension::Height }
}

pub fn leading_margin(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let start = style.margin_edge(Edge::Start);
    if !start.is_undefined() {
      return resolve_margin(start, width_size);
    }
  }
  resolve_margin(computed_edge_value(&style.margin, leading_edge(axis), Value::ZERO), width_size)
}

pub fn trailing_margin(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let end = style.margin_edge(Edge::End);
    if !end.is_undefined() {
      return resolve_margin(end, width_size);
    }
  }
  resolve_margin(computed_edge_value(&style.margin, trailing_edge(axis), Value::ZERO), width_size)
}

pub fn leading_margin_is_auto(style: &Style, axis: FlexDirection) -> bool {
  if axis.is_row() {
    let start = style.margin_edge(Edge::Start);
    if !start.is_undefined() {
      return start.is_auto();
    }
  }
  computed_edge_value(&style.margin, leading_edge(axis), Value::ZERO).is_auto()
}

pub fn trailing_margin_is_auto(style: &Style, axis: FlexDirection) -> bool {
  if axis.is_row() {
    let end = style.margin_edge(Edge::End);
    if !end.is_undefined() {
      return end.is_auto();
    }
  }
  computed_edge_value(&style.margin, trailing_edge(axis), Value::ZERO).is_auto()
}

pub fn leading_padding(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let start = style.padding.get(Edge::Start);
    if !start.is_undefined() {
      let resolved = resolve(start, width_size);
      if resolved >= 0.0 {
        return resolved;
      }
    }
  }
  resolve(computed_edge_value(&style.padding, leading_edge(axis), Value::ZERO), width_size).max(0.0)
}

pub fn trailing_padding(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let end = style.padding.get(Edge::End);
    if !end.is_undefined() {
      let resolved = resolve(end, width_size);
      if resolved >= 0.0 {
        return resolved;
      }
    }
  }
  resolve(computed_edge_value(&style.padding, trailing_edge(axis), Value::ZERO), width_size).max(0.0)
}

pub fn leading_border(style: &Style, axis: FlexDirection) -> f32 {
  if axis.is_row() {
    let start = style.border.get(Edge::Start);
    if !start.is_undefined() && start.scalar >= 0.0 {
      return start.scalar;
    }
  }
  computed_edge_value(&style.border, leading_edge(axis), Value::ZERO).scalar.max(0.0)
}

pub fn trailing_border(style: &Style, axis: FlexDirection) -> f32 {
  if axis.is_row() {
    let end = style.border.get(Edge::End);
    if !end.is_undefined() && end.scalar >= 0.0 {
      return end.scalar;
    }
  }
  computed_edge_value(&style.border, trailing_edge(axis), Value::ZERO).scalar.max(0.0)
}

pub fn leading_padding_and_border(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  leading_padding(style, axis, width_size) + leading_border(style, axis)
}

pub fn trailing_padding_and_border(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  trailing_padding(style, axis, width_size) + trailing_border(style, axis)
}

pub fn padding_and_border_for_axis(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  leading_padding_and_border(style, axis, width_size) + trailing_padding_and_border(style, axis, width_size)
}

pub fn margin_for_axis(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  leading_margin(style, axis, width_size) + trailing_margin(style, axis, width_size)
}

pub fn is_leading_pos_defined(style: &Style, axis: FlexDirection) -> bool {
  (axis.is_row() && !computed_edge_value(&style.position, Edge::Start, Value::UNDEFINED).is_undefined())
    || !computed_edge_value(&style.position, leading_edge(axis), Value::UNDEFINED).is_undefined()
}

pub fn is_trailing_pos_defined(style: &Style, axis: FlexDirection) -> bool {
  (axis.is_row() && !computed_edge_value(&style.position, Edge::End, Value::UNDEFINED).is_undefined())
    || !computed_edge_value(&style.position, trailing_edge(axis), Value::UNDEFINED).is_undefined()
}

pub fn leading_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if axis.is_row() {
    let start = computed_edge_value(&style.position, Edge::Start, Value::UNDEFINED);
    if !start.is_undefined() {
      return resolve(start, axis_size);
    }
  }
  let leading = computed_edge_value(&style.position, leading_edge(axis), Value::UNDEFINED);
  if leading.is_undefined() { 0.0 } else { resolve(leading, axis_size) }
}

pub fn trailing_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if axis.is_row() {
    let end = computed_edge_value(&style.position, Edge::End, Value::UNDEFINED);
    if !end.is_undefined() {
      return resolve(end, axis_size);
    }
  }
  let trailing = computed_edge_value(&style.position, trailing_edge(axis), Value::UNDEFINED);
  if trailing.is_undefined() { 0.0 } else { resolve(trailing, axis_size) }
}

/// If both leading and trailing positions are defined, leading wins; otherwise use
/// whichever is defined, negating the trailing one.
pub fn relative_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if is_leading_pos_defined(style, axis) {
    leading_position(style, axis, axis_size)
  } else {
    -trailing_position(style, axis, axis_size)
  }
}

pub fn bound_axis_within_min_and_max(style: &Style, axis: FlexDirection, value: f32, axis_size: f32) -> f32 {
  let dim = axis_dimension(axis);
  let min = resolve(style.min_dimension(dim), axis_size);
  let max = resolve(style.max_dimension(dim), axis_size);

  let mut bound = value;
  if !max.is_nan() && max >= 0.0 && bound > max {
    bound = max;
  }
  if !min.is_nan() && min >= 0.0 && bound < min {
    bound = min;
  }
  bound
}

/// Like [`bound_axis_within_min_and_max`], but floors the result at the axis's
/// padding-and-border so a node never measures smaller than its own box model.
pub fn bound_axis(style: &Style, axis: FlexDirection, value: f32, axis_size: f32, width_size: f32) -> f32 {
  bound_axis_within_min_and_max(style, axis, value, axis_size).max(padding_and_border_for_axis(style, axis, width_size))
}

pub fn is_baseline_layout(style: &Style, child_styles: impl Iterator<Item = (bool, Align)>) -> bool {
  if style.flex_direction.is_column() {
    return false;
  }
  if style.align_items == Align::Baseline {
    return true;
  }
  child_styles.into_iter().any(|(is_relative, align_self)| is_relative && align_self == Align::Baseline)
}

/// `child.align_self` if not Auto, else `parent.align_items`; Baseline degrades to
/// FlexStart when the parent's flex-direction is a column variant.
pub fn align_item(parent: &Style, child_align_self: Align) -> Align {
  let align = if child_align_self == Align::Auto { parent.align_items } else { child_align_self };
  if align == Align::Baseline && parent.flex_direction.is_column() {
    Align::FlexStart
  } else {
    align
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rtl_swaps_row_directions() {
    assert_eq!(flex_direction_resolve(FlexDirection::Row, Direction::Rtl), FlexDirection::RowReverse);
    assert_eq!(flex_direction_resolve(FlexDirection::RowReverse, Direction::Rtl), FlexDirection::Row);
    assert_eq!(flex_direction_resolve(FlexDirection::Column, Direction::Rtl), FlexDirection::Column);
  }

  #[test]
  fn cross_of_column_is_resolved_row() {
    assert_eq!(flex_direction_cross(FlexDirection::Column, Direction::Rtl), FlexDirection::RowReverse);
    assert_eq!(flex_direction_cross(FlexDirection::Row, Direction::Ltr), FlexDirection::Column);
  }

  /// §8 scenario 7: row parent width 100, child width 30 margin-start 10.
  /// LTR: position = 10. RTL: position = 100 - 10 - 30 = 60.
  #[test]
  fn rtl_reflection_of_margin_start() {
    let mut style = Style::default();
    style.margin.set(Edge::Start, Value::points(10.0));
    let ltr_axis = flex_direction_resolve(FlexDirection::Row, Direction::Ltr);
    let rtl_axis = flex_direction_resolve(FlexDirection::Row, Direction::Rtl);
    assert_eq!(leading_margin(&style, ltr_axis, 100.0), 10.0);
    // Under RTL the resolved main axis is RowReverse, whose leading edge is physically
    // Right; Start remains the logical leading edge regardless.
    assert_eq!(leading_margin(&style, rtl_axis, 100.0), 10.0);
  }

  #[test]
  fn relative_position_prefers_leading() {
    let mut style = Style::default();
    style.position.set(Edge::Left, Value::points(5.0));
    style.position.set(Edge::Right, Value::points(9.0));
    assert_eq!(relative_position(&style, FlexDirection::Row, 100.0), 5.0);

    let mut trailing_only = Style::default();
    trailing_only.position.set(Edge::Right, Value::points(9.0));
    assert_eq!(relative_position(&trailing_only, FlexDirection::Row, 100.0), -9.0);
  }
}
