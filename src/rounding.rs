//! Post-layout pixel rounding (§4.11): an optional traversal that snaps every node's
//! position and measured size to integer pixels while preserving each node's own
//! fractional offset coherently between its rounded position and rounded extent.
//!
//! Transcribed from `original_source/Yoga.c`'s `RYGRoundToPixelGrid`, which rounds each
//! node independently from its own (parent-relative) position — no accumulated absolute
//! offset is threaded through the recursion. Gated by
//! [`crate::context::ExperimentalFeature::Rounding`] exactly as the reference embedding
//! API gates it, off by default.

use crate::node::{NodeId, Tree};
use crate::style::Dimension;
use crate::value::Edge;

/// `round(fractional + value) - round(fractional)`: rounds `value` so that its far edge
/// lands on the grid given how far `fractional` (the leading edge's own fractional
/// offset) has already eaten into the next integer pixel.
fn round_value_to_pixel_grid(value: f32, fractional: f32) -> f32 {
  (fractional + value).round() - fractional.round()
}

/// Recursively round `node`'s position and measured dimensions to the pixel grid.
pub fn round_to_pixel_grid(tree: &mut Tree, node: NodeId) {
  let left = tree.node(node).layout.position(Edge::Left);
  let top = tree.node(node).layout.position(Edge::Top);
  let width = tree.node(node).layout.measured_dimension(Dimension::Width);
  let height = tree.node(node).layout.measured_dimension(Dimension::Height);

  let left_fractional = left - left.floor();
  let top_fractional = top - top.floor();

  let rounded_width = round_value_to_pixel_grid(width, left_fractional);
  let rounded_height = round_value_to_pixel_grid(height, top_fractional);

  {
    let layout = &mut tree.node_mut(node).layout;
    layout.set_measured_dimension(Dimension::Width, rounded_width);
    layout.set_measured_dimension(Dimension::Height, rounded_height);
    layout.set_position(Edge::Left, left.round());
    layout.set_position(Edge::Top, top.round());
  }

  let children = tree.node(node).children().to_vec();
  for child in children {
    round_to_pixel_grid(tree, child);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::Tree;
  use crate::style::Dimension;
  use crate::value::Edge;

  #[test]
  fn rounds_fractional_position_and_width_together() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    tree.node_mut(node).layout.set_position(Edge::Left, 0.3);
    tree.node_mut(node).layout.set_position(Edge::Top, 0.0);
    tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, 10.4);
    tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, 5.0);

    round_to_pixel_grid(&mut tree, node);

    assert_eq!(tree.node(node).layout.position(Edge::Left), 0.0);
    // far edge sits at 0.3 + 10.4 = 10.7 -> rounds to 11; the leading 0.3 rounds to 0.
    assert_eq!(tree.node(node).layout.measured_dimension(Dimension::Width), 11.0);
  }

  #[test]
  fn zero_fractional_offset_rounds_plainly() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    tree.node_mut(node).layout.set_position(Edge::Left, 2.0);
    tree.node_mut(node).layout.set_position(Edge::Top, 3.0);
    tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, 4.6);
    tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, 4.4);

    round_to_pixel_grid(&mut tree, node);

    assert_eq!(tree.node(node).layout.position(Edge::Left), 2.0);
    assert_eq!(tree.node(node).layout.measured_dimension(Dimension::Width), 5.0);
    assert_eq!(tree.node(node).layout.measured_dimension(Dimension::Height), 4.0);
  }

  #[test]
  fn recurses_into_children_independently() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(root, child, 0).unwrap();

    tree.node_mut(root).layout.set_position(Edge::Left, 0.6);
    tree.node_mut(root).layout.set_measured_dimension(Dimension::Width, 20.0);
    tree.node_mut(root).layout.set_measured_dimension(Dimension::Height, 20.0);

    tree.node_mut(child).layout.set_position(Edge::Left, 0.5);
    tree.node_mut(child).layout.set_measured_dimension(Dimension::Width, 3.0);
    tree.node_mut(child).layout.set_measured_dimension(Dimension::Height, 3.0);

    round_to_pixel_grid(&mut tree, root);

    assert_eq!(tree.node(root).layout.position(Edge::Left), 1.0);
    assert_eq!(tree.node(child).layout.position(Edge::Left), 1.0);
  }
}
