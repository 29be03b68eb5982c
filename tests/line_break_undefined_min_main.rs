//! Locks in the SPEC_FULL.md §9 Open Question decision for the Step 4 line-break test's
//! `outerFlexBasis = max(minMainResolved, basis) + margin`: `max` here mirrors
//! `original_source/Yoga.c`'s `fmaxf`, which ignores NaN and returns the other operand —
//! not a NaN-propagating `max` that would disable wrapping whenever a child leaves its
//! min-main-size unset (the overwhelmingly common case). See DESIGN.md.

use flexnode::prelude::*;
use flexnode::style::{Dimension, FlexDirection};
use flexnode::value::Value;

#[test]
fn wrap_with_undefined_min_main_breaks_normally_on_basis_overflow() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  tree
    .edit_style(root, |s| {
      s.flex_direction = FlexDirection::Row;
      s.flex_wrap = flexnode::style::FlexWrap::Wrap;
    })
    .unwrap();

  // Neither child declares a min-width, so `outerFlexBasis` falls back to each child's
  // own basis (fmaxf-style `max` ignores the NaN from the unset min-dimension) — the
  // combined 80pt basis still overflows the 50pt available width and forces a break.
  let mut children = Vec::new();
  for _ in 0..2 {
    let child = tree.new_node();
    tree.edit_style(child, |s| s.dimensions[Dimension::Width as usize] = Value::points(40.0)).unwrap();
    tree.insert_child(root, child, children.len()).unwrap();
    children.push(child);
  }

  compute_layout(&mut tree, root, 50.0, 100.0, Direction::Ltr);

  assert_eq!(tree.node(children[0]).line_index, 0);
  assert_eq!(tree.node(children[1]).line_index, 1);
}

#[test]
fn wrap_with_explicit_min_main_floors_the_line_break_basis() {
  let mut tree = Tree::new();
  let root = tree.new_node();
  tree
    .edit_style(root, |s| {
      s.flex_direction = FlexDirection::Row;
      s.flex_wrap = flexnode::style::FlexWrap::Wrap;
    })
    .unwrap();

  // Each child is only 10pt wide but declares min-width 45 — `outerFlexBasis` uses the
  // min, not the narrower basis, so two of them (90pt) still overflow a 50pt line even
  // though their combined declared widths (20pt) would not have.
  let mut children = Vec::new();
  for _ in 0..2 {
    let child = tree.new_node();
    tree
      .edit_style(child, |s| {
        s.dimensions[Dimension::Width as usize] = Value::points(10.0);
        s.min_dimensions[Dimension::Width as usize] = Value::points(45.0);
      })
      .unwrap();
    tree.insert_child(root, child, children.len()).unwrap();
    children.push(child);
  }

  compute_layout(&mut tree, root, 50.0, 100.0, Direction::Ltr);

  assert_eq!(tree.node(children[0]).line_index, 0);
  assert_eq!(tree.node(children[1]).line_index, 1);
}
