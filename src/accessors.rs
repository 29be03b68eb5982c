//! Style getters/setters (§3/§4.13/§6): one named setter per style field, each marking
//! the node dirty only on an *effective* change (matching the "Style accessors" component
//! in SPEC_FULL.md §2), plus the edge-aware layout getters (§6).
//!
//! Built atop [`Tree::try_mut`]/[`Tree::mark_dirty_internal`] rather than a proc-macro —
//! the teacher hand-writes its own `ComputedStyles` setters one at a time
//! (`layout/mod.rs`) rather than generating them, and this module follows that lead.

use crate::cache::floats_equal;
use crate::error::Result;
use crate::node::{NodeId, Tree};
use crate::style::{Align, Direction, Dimension, Display, FlexDirection, FlexWrap, JustifyContent, Overflow, PositionType};
use crate::value::{Edge, Value};

fn value_changed(old: Value, new: Value) -> bool {
  old.unit != new.unit || !floats_equal(old.scalar, new.scalar)
}

impl Tree {
  fn set_dimension_value(&mut self, id: NodeId, dim: Dimension, value: Value) -> Result<()> {
    let old = self.try_ref(id)?.style.dimension(dim);
    self.try_mut(id)?.style.dimensions[dim as usize] = value;
    if value_changed(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  fn set_min_dimension_value(&mut self, id: NodeId, dim: Dimension, value: Value) -> Result<()> {
    let old = self.try_ref(id)?.style.min_dimension(dim);
    self.try_mut(id)?.style.min_dimensions[dim as usize] = value;
    if value_changed(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  fn set_max_dimension_value(&mut self, id: NodeId, dim: Dimension, value: Value) -> Result<()> {
    let old = self.try_ref(id)?.style.max_dimension(dim);
    self.try_mut(id)?.style.max_dimensions[dim as usize] = value;
    if value_changed(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  fn set_edge_value(&mut self, id: NodeId, field: EdgeField, edge: Edge, value: Value) -> Result<()> {
    let old = field.get(&self.try_ref(id)?.style, edge);
    field.set(&mut self.try_mut(id)?.style, edge, value);
    if value_changed(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  // -- Dimensions --------------------------------------------------------

  pub fn set_width(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_dimension_value(id, Dimension::Width, Value::points(points))
  }
  pub fn set_width_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_dimension_value(id, Dimension::Width, Value::percent(percent))
  }
  pub fn set_width_auto(&mut self, id: NodeId) -> Result<()> {
    self.set_dimension_value(id, Dimension::Width, Value::AUTO)
  }

  pub fn set_height(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_dimension_value(id, Dimension::Height, Value::points(points))
  }
  pub fn set_height_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_dimension_value(id, Dimension::Height, Value::percent(percent))
  }
  pub fn set_height_auto(&mut self, id: NodeId) -> Result<()> {
    self.set_dimension_value(id, Dimension::Height, Value::AUTO)
  }

  pub fn set_min_width(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_min_dimension_value(id, Dimension::Width, Value::points(points))
  }
  pub fn set_min_width_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_min_dimension_value(id, Dimension::Width, Value::percent(percent))
  }
  pub fn set_min_height(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_min_dimension_value(id, Dimension::Height, Value::points(points))
  }
  pub fn set_min_height_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_min_dimension_value(id, Dimension::Height, Value::percent(percent))
  }

  pub fn set_max_width(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_max_dimension_value(id, Dimension::Width, Value::points(points))
  }
  pub fn set_max_width_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_max_dimension_value(id, Dimension::Width, Value::percent(percent))
  }
  pub fn set_max_height(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_max_dimension_value(id, Dimension::Height, Value::points(points))
  }
  pub fn set_max_height_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_max_dimension_value(id, Dimension::Height, Value::percent(percent))
  }

  // -- Flex ----------------------------------------------------------------

  /// The `flex: N` shorthand (§3): sets grow/shrink/basis together.
  pub fn set_flex(&mut self, id: NodeId, value: f32) -> Result<()> {
    let before = self.try_ref(id)?.style.clone();
    self.try_mut(id)?.style.set_flex(value);
    let after = &self.try_ref(id)?.style;
    let changed = !floats_equal(before.flex_grow, after.flex_grow)
      || !floats_equal(before.flex_shrink, after.flex_shrink)
      || value_changed(before.flex_basis, after.flex_basis);
    if changed {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  pub fn set_flex_grow(&mut self, id: NodeId, value: f32) -> Result<()> {
    let old = self.try_ref(id)?.style.flex_grow;
    self.try_mut(id)?.style.flex_grow = value;
    if !floats_equal(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  pub fn set_flex_shrink(&mut self, id: NodeId, value: f32) -> Result<()> {
    let old = self.try_ref(id)?.style.flex_shrink;
    self.try_mut(id)?.style.flex_shrink = value;
    if !floats_equal(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  pub fn set_flex_basis(&mut self, id: NodeId, points: f32) -> Result<()> {
    self.set_flex_basis_value(id, Value::points(points))
  }
  pub fn set_flex_basis_percent(&mut self, id: NodeId, percent: f32) -> Result<()> {
    self.set_flex_basis_value(id, Value::percent(percent))
  }
  pub fn set_flex_basis_auto(&mut self, id: NodeId) -> Result<()> {
    self.set_flex_basis_value(id, Value::AUTO)
  }
  fn set_flex_basis_value(&mut self, id: NodeId, value: Value) -> Result<()> {
    let old = self.try_ref(id)?.style.flex_basis;
    self.try_mut(id)?.style.flex_basis = value;
    if value_changed(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  // -- Edges: margin / padding / border / position --------------------------

  /// NaN maps to `Value::UNDEFINED` for margin/padding/position edges (§4.13) — only
  /// `set_margin_auto` may route a margin to `Auto`.
  fn edge_points(points: f32) -> Value {
    if points.is_nan() { Value::UNDEFINED } else { Value::points(points) }
  }
  fn edge_percent(percent: f32) -> Value {
    if percent.is_nan() { Value::UNDEFINED } else { Value::percent(percent) }
  }

  pub fn set_margin(&mut self, id: NodeId, edge: Edge, points: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Margin, edge, Self::edge_points(points))
  }
  pub fn set_margin_percent(&mut self, id: NodeId, edge: Edge, percent: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Margin, edge, Self::edge_percent(percent))
  }
  pub fn set_margin_auto(&mut self, id: NodeId, edge: Edge) -> Result<()> {
    self.set_edge_value(id, EdgeField::Margin, edge, Value::AUTO)
  }

  pub fn set_padding(&mut self, id: NodeId, edge: Edge, points: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Padding, edge, Self::edge_points(points))
  }
  pub fn set_padding_percent(&mut self, id: NodeId, edge: Edge, percent: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Padding, edge, Self::edge_percent(percent))
  }

  /// Border accepts only a float — no percent variant (§4.13).
  pub fn set_border(&mut self, id: NodeId, edge: Edge, points: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Border, edge, Self::edge_points(points))
  }

  pub fn set_position_value(&mut self, id: NodeId, edge: Edge, points: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Position, edge, Self::edge_points(points))
  }
  pub fn set_position_percent(&mut self, id: NodeId, edge: Edge, percent: f32) -> Result<()> {
    self.set_edge_value(id, EdgeField::Position, edge, Self::edge_percent(percent))
  }

  // -- Enums -----------------------------------------------------------------

  pub fn set_direction(&mut self, id: NodeId, value: Direction) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.direction)
  }
  pub fn set_flex_direction(&mut self, id: NodeId, value: FlexDirection) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.flex_direction)
  }
  pub fn set_justify_content(&mut self, id: NodeId, value: JustifyContent) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.justify_content)
  }
  pub fn set_align_content(&mut self, id: NodeId, value: Align) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.align_content)
  }
  pub fn set_align_items(&mut self, id: NodeId, value: Align) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.align_items)
  }
  pub fn set_align_self(&mut self, id: NodeId, value: Align) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.align_self)
  }
  pub fn set_position_type(&mut self, id: NodeId, value: PositionType) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.position_type)
  }
  pub fn set_flex_wrap(&mut self, id: NodeId, value: FlexWrap) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.flex_wrap)
  }
  pub fn set_overflow(&mut self, id: NodeId, value: Overflow) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.overflow)
  }
  pub fn set_display(&mut self, id: NodeId, value: Display) -> Result<()> {
    self.set_enum_field(id, value, |s| &mut s.display)
  }

  fn set_enum_field<T: PartialEq + Copy>(&mut self, id: NodeId, value: T, field: impl Fn(&mut crate::style::Style) -> &mut T) -> Result<()> {
    let old = *field(&mut self.try_mut(id)?.style);
    *field(&mut self.try_mut(id)?.style) = value;
    if old != value {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  pub fn set_aspect_ratio(&mut self, id: NodeId, value: f32) -> Result<()> {
    let old = self.try_ref(id)?.style.aspect_ratio;
    self.try_mut(id)?.style.aspect_ratio = value;
    if !floats_equal(old, value) {
      self.mark_dirty_internal(id);
    }
    Ok(())
  }

  // -- Layout getters (§6): edge-aware, fold Left<->End/Start under RTL ------

  pub fn layout_left(&self, id: NodeId) -> f32 {
    self.layout(id).position(Edge::Left)
  }
  pub fn layout_top(&self, id: NodeId) -> f32 {
    self.layout(id).position(Edge::Top)
  }
  pub fn layout_right(&self, id: NodeId) -> f32 {
    self.layout(id).position(Edge::Right)
  }
  pub fn layout_bottom(&self, id: NodeId) -> f32 {
    self.layout(id).position(Edge::Bottom)
  }
  pub fn layout_width(&self, id: NodeId) -> f32 {
    self.layout(id).measured_dimension(Dimension::Width)
  }
  pub fn layout_height(&self, id: NodeId) -> f32 {
    self.layout(id).measured_dimension(Dimension::Height)
  }
  pub fn layout_direction(&self, id: NodeId) -> Direction {
    self.layout(id).direction
  }
  pub fn layout_margin(&self, id: NodeId, edge: Edge) -> f32 {
    self.layout(id).margin(edge)
  }
  pub fn layout_border(&self, id: NodeId, edge: Edge) -> f32 {
    self.layout(id).border(edge)
  }
  pub fn layout_padding(&self, id: NodeId, edge: Edge) -> f32 {
    self.layout(id).padding(edge)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeField {
  Margin,
  Padding,
  Border,
  Position,
}

impl EdgeField {
  fn get(self, style: &crate::style::Style, edge: Edge) -> Value {
    match self {
      EdgeField::Margin => style.margin.get(edge),
      EdgeField::Padding => style.padding.get(edge),
      EdgeField::Border => style.border.get(edge),
      EdgeField::Position => style.position.get(edge),
    }
  }

  fn set(self, style: &mut crate::style::Style, edge: Edge, value: Value) {
    match self {
      EdgeField::Margin => style.margin.set(edge, value),
      EdgeField::Padding => style.padding.set(edge, value),
      EdgeField::Border => style.border.set(edge, value),
      EdgeField::Position => style.position.set(edge, value),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn setting_width_marks_dirty_and_propagates() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(root, child, 0).unwrap();
    tree.node_mut(root).is_dirty = false;
    tree.node_mut(child).is_dirty = false;

    tree.set_width(child, 42.0).unwrap();

    assert!(tree.node(child).is_dirty);
    assert!(tree.node(root).is_dirty);
  }

  #[test]
  fn setting_same_width_again_does_not_require_dirtying_but_is_harmless() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.set_width(id, 10.0).unwrap();
    tree.node_mut(id).is_dirty = false;

    tree.set_width(id, 10.0).unwrap();
    assert!(!tree.node(id).is_dirty, "re-setting an unchanged width should not dirty the node");
  }

  #[test]
  fn border_has_no_percent_variant() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.set_border(id, Edge::Top, 2.0).unwrap();
    assert_eq!(tree.node(id).style.border.get(Edge::Top).scalar, 2.0);
  }

  #[test]
  fn set_flex_shorthand_dirties_on_change() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.node_mut(id).is_dirty = false;
    tree.set_flex(id, 1.0).unwrap();
    assert!(tree.node(id).is_dirty);
  }

  #[test]
  fn stale_node_id_returns_error() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.free(id).unwrap();
    assert!(tree.set_width(id, 10.0).is_err());
  }
}
