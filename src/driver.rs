//! The top-level entry point: `compute_layout` (§4.12).
//!
//! Grounded in `original_source/Yoga.c`'s `RYGNodeCalculateLayout` for the generation
//! bump / root-measure-mode derivation / final-position sequence; the teacher's
//! `LayoutEngine::compute_layout` (`layout/mod.rs`) for the "resolve styles, pick an
//! available rect, recurse" shape this mirrors at a higher level.

use crate::algorithm::layout_node_internal;
use crate::axis::{flex_direction_resolve, leading_margin, relative_position, resolve_direction, trailing_margin};
use crate::cache::MeasureMode;
use crate::context::ExperimentalFeature;
use crate::node::{NodeId, Tree};
use crate::rounding::round_to_pixel_grid;
use crate::style::{Direction, Dimension, FlexDirection};
use crate::value::{resolve, Edge};

fn root_measure_mode(available: f32, style_dim: crate::value::Value, max_dim: crate::value::Value, owner_size: f32, margin: f32) -> (f32, MeasureMode) {
  if !available.is_nan() {
    return (available, MeasureMode::Exactly);
  }

  if style_dim.is_defined() {
    let resolved = resolve(style_dim, owner_size);
    if !resolved.is_nan() {
      return (resolved + margin, MeasureMode::Exactly);
    }
  }

  if max_dim.is_defined() {
    let resolved = resolve(max_dim, owner_size);
    if !resolved.is_nan() && resolved >= 0.0 {
      return (resolved, MeasureMode::AtMost);
    }
  }

  (f32::NAN, MeasureMode::Undefined)
}

/// Compute layout for the whole tree rooted at `node`. Bumps the tree's generation
/// counter, derives the root's measure modes from `available_width`/`available_height`
/// and the root's own style, runs the recursive engine, and — if it actually did new
/// work — sets the root's own position and (when the `Rounding` experimental feature is
/// enabled) snaps the tree to the pixel grid.
pub fn compute_layout(tree: &mut Tree, node: NodeId, available_width: f32, available_height: f32, parent_direction: Direction) {
  tree.context.bump_generation();

  let style = tree.node(node).style.clone();
  let direction = resolve_direction(style.direction, parent_direction);
  let row_axis = flex_direction_resolve(FlexDirection::Row, direction);

  let margin_row = leading_margin(&style, row_axis, available_width) + trailing_margin(&style, row_axis, available_width);
  let margin_column = leading_margin(&style, FlexDirection::Column, available_height) + trailing_margin(&style, FlexDirection::Column, available_height);

  let (width, width_mode) =
    root_measure_mode(available_width, style.resolved_dimension(Dimension::Width), style.max_dimension(Dimension::Width), available_width, margin_row);
  let (height, height_mode) =
    root_measure_mode(available_height, style.resolved_dimension(Dimension::Height), style.max_dimension(Dimension::Height), available_height, margin_column);

  let did_layout = layout_node_internal(
    tree,
    node,
    width,
    height,
    parent_direction,
    width_mode,
    height_mode,
    available_width,
    available_height,
    true,
    "initial",
  );

  if did_layout {
    let left = leading_margin(&style, row_axis, available_width) + relative_position(&style, row_axis, available_width);
    let top = leading_margin(&style, FlexDirection::Column, available_height) + relative_position(&style, FlexDirection::Column, available_height);
    tree.node_mut(node).layout.set_position(Edge::Left, left);
    tree.node_mut(node).layout.set_position(Edge::Top, top);

    if tree.context.is_experimental_feature_enabled(ExperimentalFeature::Rounding) {
      round_to_pixel_grid(tree, node);
    }

    mark_has_new_layout_recursively(tree, node);

    if let Some(print) = tree.node_mut(node).print.take() {
      print.print(tree.node(node));
      tree.node_mut(node).print = Some(print);
    }
  }
}

fn mark_has_new_layout_recursively(tree: &mut Tree, node: NodeId) {
  tree.node_mut(node).has_new_layout = true;
  tree.node_mut(node).is_dirty = false;
  let children = tree.node(node).children().to_vec();
  for child in children {
    mark_has_new_layout_recursively(tree, child);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::{Dimension as Dim, FlexDirection as FD, JustifyContent};
  use crate::value::Value;

  /// §8 scenario 1: row with two equal growers, root width 100, no padding.
  #[test]
  fn row_with_two_equal_growers() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let a = tree.new_node();
    let b = tree.new_node();
    tree.insert_child(root, a, 0).unwrap();
    tree.insert_child(root, b, 1).unwrap();

    tree.edit_style(root, |s| s.flex_direction = FD::Row).unwrap();
    for child in [a, b] {
      tree
        .edit_style(child, |s| {
          s.flex_grow = 1.0;
          s.dimensions[Dim::Height as usize] = Value::points(50.0);
        })
        .unwrap();
    }

    compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

    assert_eq!(tree.layout(a).measured_dimension(Dim::Width), 50.0);
    assert_eq!(tree.layout(b).measured_dimension(Dim::Width), 50.0);
    assert_eq!(tree.layout(a).position(Edge::Left), 0.0);
    assert_eq!(tree.layout(b).position(Edge::Left), 50.0);
  }

  /// §8 scenario 6: justify-content space-between, row parent width 100, three 20-wide
  /// children: positions 0, 40, 80.
  #[test]
  fn justify_space_between() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    tree.edit_style(root, |s| { s.flex_direction = FD::Row; s.justify_content = JustifyContent::SpaceBetween; }).unwrap();

    let mut children = Vec::new();
    for i in 0..3 {
      let child = tree.new_node();
      tree.edit_style(child, |s| s.dimensions[Dim::Width as usize] = Value::points(20.0)).unwrap();
      tree.insert_child(root, child, i).unwrap();
      children.push(child);
    }

    compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

    assert_eq!(tree.layout(children[0]).position(Edge::Left), 0.0);
    assert_eq!(tree.layout(children[1]).position(Edge::Left), 40.0);
    assert_eq!(tree.layout(children[2]).position(Edge::Left), 80.0);
  }

  /// §8 scenario 2: column + wrap, root 100×100, five 30×30 children: lines of heights
  /// 30/30/30 holding 1/1/3 items, at positions (0,0),(0,30),(0,60),(30,0),(30,30).
  #[test]
  fn column_with_wrap_five_children() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    tree.edit_style(root, |s| { s.flex_direction = FD::Column; s.flex_wrap = crate::style::FlexWrap::Wrap; }).unwrap();

    let mut children = Vec::new();
    for i in 0..5 {
      let child = tree.new_node();
      tree
        .edit_style(child, |s| {
          s.dimensions[Dim::Width as usize] = Value::points(30.0);
          s.dimensions[Dim::Height as usize] = Value::points(30.0);
        })
        .unwrap();
      tree.insert_child(root, child, i).unwrap();
      children.push(child);
    }

    compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

    let expected = [(0.0, 0.0), (0.0, 30.0), (0.0, 60.0), (30.0, 0.0), (30.0, 30.0)];
    for (&child, &(x, y)) in children.iter().zip(expected.iter()) {
      assert_eq!(tree.layout(child).position(Edge::Left), x);
      assert_eq!(tree.layout(child).position(Edge::Top), y);
    }
  }

  /// §8 scenario 5: align-items stretch, row parent 100×80, two `{flex_grow: 1}` children
  /// with no declared height: both measured 50×80 (stretched to the line's cross size by
  /// Step 7's single-line path and left unchanged by Step 8's default `Stretch`
  /// `align_content`).
  #[test]
  fn align_items_stretch_with_flex_grow() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    tree.edit_style(root, |s| s.flex_direction = FD::Row).unwrap();

    let a = tree.new_node();
    let b = tree.new_node();
    tree.edit_style(a, |s| s.flex_grow = 1.0).unwrap();
    tree.edit_style(b, |s| s.flex_grow = 1.0).unwrap();
    tree.insert_child(root, a, 0).unwrap();
    tree.insert_child(root, b, 1).unwrap();

    compute_layout(&mut tree, root, 100.0, 80.0, Direction::Ltr);

    assert_eq!(tree.layout(a).measured_dimension(Dim::Width), 50.0);
    assert_eq!(tree.layout(a).measured_dimension(Dim::Height), 80.0);
    assert_eq!(tree.layout(b).measured_dimension(Dim::Width), 50.0);
    assert_eq!(tree.layout(b).measured_dimension(Dim::Height), 80.0);
  }

  #[test]
  fn has_new_layout_set_after_compute() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);
    assert!(tree.node(root).has_new_layout);
    assert!(!tree.node(root).is_dirty);
  }
}
