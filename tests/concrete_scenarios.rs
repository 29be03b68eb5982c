//! End-to-end coverage for the remaining §8 concrete scenarios not already exercised by
//! the per-module unit tests: absolute positioning, aspect ratio, and RTL reflection
//! through a full `compute_layout` pass.

use flexnode::prelude::*;
use flexnode::style::{Align, Dimension, FlexDirection, PositionType};
use flexnode::value::Value;

/// §8 scenario 3: absolute child with top=10, right=10 in a 100x100 parent, child
/// width=20 height=20 -> position (70, 10), measured 20x20.
#[test]
fn absolute_child_top_right() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree
    .edit_style(child, |s| {
      s.position_type = PositionType::Absolute;
      s.dimensions[Dimension::Width as usize] = Value::points(20.0);
      s.dimensions[Dimension::Height as usize] = Value::points(20.0);
      s.position.set(flexnode::value::Edge::Top, Value::points(10.0));
      s.position.set(flexnode::value::Edge::Right, Value::points(10.0));
    })
    .unwrap();

  compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Left), 70.0);
  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Top), 10.0);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Width), 20.0);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Height), 20.0);
}

/// §8 scenario 4: child width=40, aspect-ratio=2 inside a 100x100 parent -> measured
/// 40x20.
#[test]
fn aspect_ratio_derives_height_from_width() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree
    .edit_style(child, |s| {
      s.dimensions[Dimension::Width as usize] = Value::points(40.0);
      s.aspect_ratio = 2.0;
    })
    .unwrap();

  compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

  assert_eq!(tree.layout(child).measured_dimension(Dimension::Width), 40.0);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Height), 20.0);
}

/// §8 scenario 7: row parent width 100, child width=30 margin-start=10. LTR position
/// (10, 0); RTL position (60, 0) = 100 - 10 - 30.
#[test]
fn rtl_reflection_through_full_layout() {
  let mut make_tree = || {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(root, child, 0).unwrap();
    tree.edit_style(root, |s| s.flex_direction = FlexDirection::Row).unwrap();
    tree
      .edit_style(child, |s| {
        s.dimensions[Dimension::Width as usize] = Value::points(30.0);
        s.margin.set(flexnode::value::Edge::Start, Value::points(10.0));
      })
      .unwrap();
    (tree, root, child)
  };

  let (mut ltr_tree, ltr_root, ltr_child) = make_tree();
  compute_layout(&mut ltr_tree, ltr_root, 100.0, 100.0, Direction::Ltr);
  assert_eq!(ltr_tree.layout(ltr_child).position(flexnode::value::Edge::Left), 10.0);

  let (mut rtl_tree, rtl_root, rtl_child) = make_tree();
  compute_layout(&mut rtl_tree, rtl_root, 100.0, 100.0, Direction::Rtl);
  assert_eq!(rtl_tree.layout(rtl_child).position(flexnode::value::Edge::Left), 60.0);
}

/// A column-direction child with `align-self: stretch` and no declared width is forced
/// to measure its cross axis exactly against the parent's available inner width before
/// its flex basis is computed, rather than shrinking to its content size — mirrors
/// `original_source/Yoga.c`'s cross-axis stretch-forcing step inside
/// `RYGNodeComputeFlexBasisForChild`, which a naive flex-basis port is easy to drop.
#[test]
fn stretched_child_measures_cross_axis_against_parent_width() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree.edit_style(root, |s| s.flex_direction = FlexDirection::Column).unwrap();
  tree
    .edit_style(child, |s| {
      s.dimensions[Dimension::Height as usize] = Value::points(20.0);
      s.align_self = Align::Stretch;
    })
    .unwrap();

  compute_layout(&mut tree, root, 80.0, 100.0, Direction::Ltr);

  assert_eq!(tree.layout(child).measured_dimension(Dimension::Width), 80.0);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Height), 20.0);
}

/// A row parent with padding on the cross axis and `align-items: center` must offset a
/// smaller child by both the parent's leading cross-axis padding and half the remaining
/// slack — not by the slack alone, and without double-counting the child's own cross
/// margin into the offset.
#[test]
fn align_items_center_respects_parent_padding_and_child_margin() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree
    .edit_style(root, |s| {
      s.flex_direction = FlexDirection::Row;
      s.align_items = Align::Center;
      s.padding.set(flexnode::value::Edge::Top, Value::points(10.0));
    })
    .unwrap();
  tree
    .edit_style(child, |s| {
      s.dimensions[Dimension::Width as usize] = Value::points(20.0);
      s.dimensions[Dimension::Height as usize] = Value::points(20.0);
      s.margin.set(flexnode::value::Edge::Top, Value::points(4.0));
      s.margin.set(flexnode::value::Edge::Bottom, Value::points(4.0));
    })
    .unwrap();

  // Parent height 100, top padding 10 -> inner cross space is 90, split around a 20-tall
  // child plus its 4+4 margin (28 total): top = 10 + (90 - 28) / 2 = 41, then + the
  // child's own 4pt leading margin = 45.
  compute_layout(&mut tree, root, 100.0, 100.0, Direction::Ltr);

  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Top), 45.0);
}

/// §8 scenario 5's stretch case, generalized to confirm the stretched child's cross-axis
/// *position* (not just its measured size) lands at the parent's leading padding/border,
/// since `align-items: stretch` previously remeasured the child without ever writing its
/// position.
#[test]
fn align_items_stretch_sets_child_position_not_just_size() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree
    .edit_style(root, |s| {
      s.flex_direction = FlexDirection::Row;
      s.padding.set(flexnode::value::Edge::Top, Value::points(6.0));
    })
    .unwrap();
  tree.edit_style(child, |s| s.dimensions[Dimension::Width as usize] = Value::points(20.0)).unwrap();

  compute_layout(&mut tree, root, 100.0, 50.0, Direction::Ltr);

  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Top), 6.0);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Height), 44.0);
}

/// A non-wrapping row with a fixed height must stretch its single line to that full
/// height for alignment purposes, even though the only child is shorter than the parent.
#[test]
fn non_wrapping_line_stretches_to_full_cross_axis() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();

  tree
    .edit_style(root, |s| {
      s.flex_direction = FlexDirection::Row;
      s.align_items = Align::FlexEnd;
    })
    .unwrap();
  tree
    .edit_style(child, |s| {
      s.dimensions[Dimension::Width as usize] = Value::points(10.0);
      s.dimensions[Dimension::Height as usize] = Value::points(10.0);
    })
    .unwrap();

  compute_layout(&mut tree, root, 50.0, 80.0, Direction::Ltr);

  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Top), 70.0);
}

/// §8 invariant 5 (idempotence): re-running `compute_layout` with identical inputs on an
/// untouched tree produces byte-identical positions and sizes.
#[test]
fn repeated_layout_with_identical_inputs_is_idempotent() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  let child = tree.new_node();
  tree.insert_child(root, child, 0).unwrap();
  tree.edit_style(root, |s| s.flex_direction = FlexDirection::Row).unwrap();
  tree.edit_style(child, |s| s.flex_grow = 1.0).unwrap();

  compute_layout(&mut tree, root, 100.0, 50.0, Direction::Ltr);
  let first_w = tree.layout(child).measured_dimension(Dimension::Width);
  let first_h = tree.layout(child).measured_dimension(Dimension::Height);
  let first_left = tree.layout(child).position(flexnode::value::Edge::Left);

  compute_layout(&mut tree, root, 100.0, 50.0, Direction::Ltr);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Width), first_w);
  assert_eq!(tree.layout(child).measured_dimension(Dimension::Height), first_h);
  assert_eq!(tree.layout(child).position(flexnode::value::Edge::Left), first_left);
}
