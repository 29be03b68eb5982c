//! The node tree: an arena of [`Node`]s addressed by [`NodeId`], each node's per-node
//! [`Layout`] output, and the measure/baseline/print callback traits.
//!
//! The arena (`Vec<Option<Node>>` plus a free-list) replaces the graph-of-pointers shape
//! a C port of this algorithm would reach for; `parent` is a weak [`NodeId`] back-reference
//! rather than a strong handle, so there is no aliasing or lifetime hazard to manage. See
//! SPEC_FULL.md §9 for the reasoning.

use std::any::Any;

use crate::cache::CachedMeasurement;
use crate::context::LayoutContext;
use crate::error::{LayoutError, Result};
use crate::style::{Direction, Dimension, Style};
use crate::value::{Edge, Value};

/// An index into a [`Tree`]'s arena. Freed indices are recycled; retaining a `NodeId`
/// past `Tree::free`/`Tree::free_recursive` is a caller error the engine does not detect
/// once the slot has been reused (see SPEC_FULL.md §9's Open Questions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// `width(...)`/`height(...)`-shaped callback supplying a node's intrinsic content size.
pub trait MeasureFunc: Send + Sync {
  fn measure(
    &self,
    width: f32,
    width_mode: crate::cache::MeasureMode,
    height: f32,
    height_mode: crate::cache::MeasureMode,
  ) -> (f32, f32);
}

impl<F> MeasureFunc for F
where
  F: Fn(f32, crate::cache::MeasureMode, f32, crate::cache::MeasureMode) -> (f32, f32) + Send + Sync,
{
  fn measure(
    &self,
    width: f32,
    width_mode: crate::cache::MeasureMode,
    height: f32,
    height_mode: crate::cache::MeasureMode,
  ) -> (f32, f32) {
    self(width, width_mode, height, height_mode)
  }
}

/// Supplies a node's baseline offset from its top edge, given its measured size.
pub trait BaselineFunc: Send + Sync {
  fn baseline(&self, width: f32, height: f32) -> f32;
}

impl<F> BaselineFunc for F
where
  F: Fn(f32, f32) -> f32 + Send + Sync,
{
  fn baseline(&self, width: f32, height: f32) -> f32 {
    self(width, height)
  }
}

/// Invoked after a layout pass for caller-side debug tree dumping.
pub trait PrintFunc: Send + Sync {
  fn print(&self, node: &Node);
}

impl<F> PrintFunc for F
where
  F: Fn(&Node) + Send + Sync,
{
  fn print(&self, node: &Node) {
    self(node)
  }
}

/// Computed layout output for one node. Populated by `layout_node_internal` and read back
/// through the embedding API's layout getters.
///
/// `margin`/`border`/`padding` only ever have their Top/Bottom/Start/End slots written by
/// the algorithm (see §4.5 Step 0); Left/Right are derived on read by folding Start/End
/// against the resolved `direction`, matching §6's "edge getters fold Left↔End/Start under
/// RTL direction".
pub struct Layout {
  pub(crate) position: [f32; 4],
  pub(crate) dimensions: [f32; 2],
  pub(crate) measured_dimensions: [f32; 2],
  pub(crate) margin: [f32; 6],
  pub(crate) border: [f32; 6],
  pub(crate) padding: [f32; 6],
  pub direction: Direction,
  pub computed_flex_basis: f32,
  pub computed_flex_basis_generation: u32,
  pub generation_count: u32,
  pub last_parent_direction: Option<Direction>,
  pub cached_layout: Option<CachedMeasurement>,
  pub cached_measurements: Vec<CachedMeasurement>,
  pub next_cached_measurements_index: usize,
}

/// Cap on the number of measure-only cache slots per node (§4.4).
pub const MAX_CACHED_MEASUREMENTS: usize = 16;

impl Default for Layout {
  fn default() -> Self {
    Layout {
      position: [0.0; 4],
      dimensions: [f32::NAN; 2],
      measured_dimensions: [f32::NAN; 2],
      margin: [0.0; 6],
      border: [0.0; 6],
      padding: [0.0; 6],
      direction: Direction::Ltr,
      computed_flex_basis: f32::NAN,
      computed_flex_basis_generation: 0,
      generation_count: 0,
      last_parent_direction: None,
      cached_layout: None,
      cached_measurements: Vec::new(),
      next_cached_measurements_index: 0,
    }
  }
}

impl Layout {
  pub fn position(&self, edge: Edge) -> f32 {
    debug_assert!(matches!(edge, Edge::Left | Edge::Top | Edge::Right | Edge::Bottom));
    self.position[edge as usize]
  }

  pub(crate) fn set_position(&mut self, edge: Edge, value: f32) {
    self.position[edge as usize] = value;
  }

  pub fn dimension(&self, d: Dimension) -> f32 {
    self.dimensions[d as usize]
  }

  pub(crate) fn set_dimension(&mut self, d: Dimension, value: f32) {
    self.dimensions[d as usize] = value;
  }

  pub fn measured_dimension(&self, d: Dimension) -> f32 {
    self.measured_dimensions[d as usize]
  }

  pub(crate) fn set_measured_dimension(&mut self, d: Dimension, value: f32) {
    self.measured_dimensions[d as usize] = value;
  }

  pub(crate) fn set_margin(&mut self, edge: Edge, value: f32) {
    self.margin[edge as usize] = value;
  }

  pub(crate) fn set_border(&mut self, edge: Edge, value: f32) {
    self.border[edge as usize] = value;
  }

  pub(crate) fn set_padding(&mut self, edge: Edge, value: f32) {
    self.padding[edge as usize] = value;
  }

  fn raw_margin(&self, edge: Edge) -> f32 {
    self.margin[edge as usize]
  }

  fn raw_border(&self, edge: Edge) -> f32 {
    self.border[edge as usize]
  }

  fn raw_padding(&self, edge: Edge) -> f32 {
    self.padding[edge as usize]
  }

  /// Fold a physical Left/Right query to whichever of Start/End the resolved direction
  /// actually wrote; Top/Bottom/Start/End pass through unchanged.
  fn fold(&self, edge: Edge) -> Edge {
    match edge {
      Edge::Left => {
        if self.direction == Direction::Rtl {
          Edge::End
        } else {
          Edge::Start
        }
      }
      Edge::Right => {
        if self.direction == Direction::Rtl {
          Edge::Start
        } else {
          Edge::End
        }
      }
      other => other,
    }
  }

  pub fn margin(&self, edge: Edge) -> f32 {
    self.raw_margin(self.fold(edge))
  }

  pub fn border(&self, edge: Edge) -> f32 {
    self.raw_border(self.fold(edge))
  }

  pub fn padding(&self, edge: Edge) -> f32 {
    self.raw_padding(self.fold(edge))
  }
}

/// One node in a [`Tree`]: its style input, its computed [`Layout`] output, tree links,
/// and optional callbacks.
pub struct Node {
  pub style: Style,
  pub layout: Layout,
  pub(crate) parent: Option<NodeId>,
  pub(crate) children: Vec<NodeId>,
  pub measure: Option<Box<dyn MeasureFunc>>,
  pub baseline: Option<Box<dyn BaselineFunc>>,
  pub print: Option<Box<dyn PrintFunc>>,
  /// Opaque owner-stashed data; the engine never reads or writes this itself.
  pub context: Option<Box<dyn Any + Send + Sync>>,
  pub is_dirty: bool,
  pub has_new_layout: bool,
  pub line_index: usize,
}

impl Default for Node {
  fn default() -> Self {
    Node {
      style: Style::default(),
      layout: Layout::default(),
      parent: None,
      children: Vec::new(),
      measure: None,
      baseline: None,
      print: None,
      context: None,
      is_dirty: true,
      has_new_layout: false,
      line_index: 0,
    }
  }
}

impl Node {
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn has_measure_func(&self) -> bool {
    self.measure.is_some()
  }

  /// Invariant 4: resolved style dimension for the given physical dimension.
  pub fn resolved_dimension(&self, d: Dimension) -> Value {
    self.style.resolved_dimension(d)
  }
}

/// An arena of [`Node`]s, reached by [`NodeId`], owning the [`LayoutContext`] the tree's
/// generation counter and instance count are scoped to.
pub struct Tree {
  nodes: Vec<Option<Node>>,
  free_list: Vec<usize>,
  pub context: LayoutContext,
}

impl Default for Tree {
  fn default() -> Self {
    Tree::new()
  }
}

impl Tree {
  pub fn new() -> Self {
    Tree { nodes: Vec::new(), free_list: Vec::new(), context: LayoutContext::new() }
  }

  pub fn with_context(context: LayoutContext) -> Self {
    Tree { nodes: Vec::new(), free_list: Vec::new(), context }
  }

  pub(crate) fn try_ref(&self, id: NodeId) -> Result<&Node> {
    self.nodes.get(id.0).and_then(Option::as_ref).ok_or(LayoutError::StaleNodeId)
  }

  pub(crate) fn try_mut(&mut self, id: NodeId) -> Result<&mut Node> {
    self.nodes.get_mut(id.0).and_then(Option::as_mut).ok_or(LayoutError::StaleNodeId)
  }

  /// Panics if `id` has been freed. Used internally by the layout algorithm, which only
  /// ever walks live ids it obtained from the tree itself during the current pass.
  pub fn node(&self, id: NodeId) -> &Node {
    self.nodes[id.0].as_ref().expect("stale NodeId: node was freed")
  }

  pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
    self.nodes[id.0].as_mut().expect("stale NodeId: node was freed")
  }

  pub fn new_node(&mut self) -> NodeId {
    let slot = if let Some(idx) = self.free_list.pop() {
      self.nodes[idx] = Some(Node::default());
      idx
    } else {
      self.nodes.push(Some(Node::default()));
      self.nodes.len() - 1
    };
    self.context.register_instance();
    NodeId(slot)
  }

  pub fn instance_count(&self) -> usize {
    self.context.instance_count()
  }

  pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
    self.try_ref(parent)?;
    self.try_ref(child)?;
    if self.node(child).parent.is_some() {
      return Err(LayoutError::AlreadyHasParent);
    }
    if self.node(parent).measure.is_some() {
      return Err(LayoutError::MeasureFuncWithChildren);
    }
    let clamped_index = index.min(self.node(parent).children.len());
    self.node_mut(parent).children.insert(clamped_index, child);
    self.node_mut(child).parent = Some(parent);
    self.mark_dirty_internal(parent);
    Ok(())
  }

  pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
    self.try_ref(parent)?;
    self.try_ref(child)?;
    let position = self.node(parent).children.iter().position(|&c| c == child).ok_or(LayoutError::NotAChild)?;
    self.node_mut(parent).children.remove(position);
    self.node_mut(child).parent = None;
    self.mark_dirty_internal(parent);
    Ok(())
  }

  pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
    self.node(parent).children.get(index).copied()
  }

  pub fn parent(&self, node: NodeId) -> Option<NodeId> {
    self.node(node).parent
  }

  pub fn child_count(&self, parent: NodeId) -> usize {
    self.node(parent).children.len()
  }

  /// Detach `id` from its parent (if any) and orphan its children, then free the slot.
  pub fn free(&mut self, id: NodeId) -> Result<()> {
    self.try_ref(id)?;
    if let Some(parent) = self.node(id).parent {
      let _ = self.remove_child(parent, id);
    }
    let children = self.node(id).children.clone();
    for child in children {
      self.node_mut(child).parent = None;
    }
    self.nodes[id.0] = None;
    self.free_list.push(id.0);
    self.context.unregister_instance();
    Ok(())
  }

  /// Free `id` and its entire subtree, bottom-up.
  pub fn free_recursive(&mut self, id: NodeId) -> Result<()> {
    self.try_ref(id)?;
    let children = self.node(id).children.clone();
    for child in children {
      self.free_recursive(child)?;
    }
    self.free(id)
  }

  /// Restore `id` to a freshly-created node's state. Only valid when it has no parent and
  /// no children (the caller must detach/free those first).
  pub fn reset(&mut self, id: NodeId) -> Result<()> {
    self.try_ref(id)?;
    if self.node(id).parent.is_some() || !self.node(id).children.is_empty() {
      return Err(LayoutError::ResetNotEmpty);
    }
    *self.node_mut(id) = Node::default();
    Ok(())
  }

  /// Only valid for nodes with a measure function; the engine dirties every other node
  /// automatically as a consequence of style mutation (§4.13).
  pub fn mark_dirty(&mut self, id: NodeId) -> Result<()> {
    self.try_ref(id)?;
    if self.node(id).measure.is_none() {
      return Err(LayoutError::MarkDirtyWithoutMeasureFunc);
    }
    self.mark_dirty_internal(id);
    Ok(())
  }

  /// Marks `id` dirty and propagates upward, stopping at the first already-dirty
  /// ancestor (invariant 3: the remaining ancestors are already marked by construction).
  pub(crate) fn mark_dirty_internal(&mut self, id: NodeId) {
    let mut current = Some(id);
    while let Some(node_id) = current {
      let node = self.node_mut(node_id);
      if node.is_dirty {
        break;
      }
      node.is_dirty = true;
      current = node.parent;
    }
  }

  pub fn set_measure_func(&mut self, id: NodeId, measure: Box<dyn MeasureFunc>) -> Result<()> {
    self.try_ref(id)?;
    if !self.node(id).children.is_empty() {
      return Err(LayoutError::MeasureFuncWithChildren);
    }
    self.node_mut(id).measure = Some(measure);
    self.mark_dirty_internal(id);
    Ok(())
  }

  pub fn clear_measure_func(&mut self, id: NodeId) -> Result<()> {
    self.try_ref(id)?;
    self.node_mut(id).measure = None;
    self.mark_dirty_internal(id);
    Ok(())
  }

  pub fn set_baseline_func(&mut self, id: NodeId, baseline: Box<dyn BaselineFunc>) -> Result<()> {
    self.try_mut(id)?.baseline = Some(baseline);
    Ok(())
  }

  pub fn set_print_func(&mut self, id: NodeId, print: Box<dyn PrintFunc>) -> Result<()> {
    self.try_mut(id)?.print = Some(print);
    Ok(())
  }

  pub fn set_context(&mut self, id: NodeId, context: Box<dyn Any + Send + Sync>) -> Result<()> {
    self.try_mut(id)?.context = Some(context);
    Ok(())
  }

  /// Mutate `id`'s style through `edit`, then mark it dirty. Every generated style
  /// setter (§4.13) is built on top of this — callers may also reach for it directly for
  /// fields this crate doesn't expose a named setter for.
  pub fn edit_style(&mut self, id: NodeId, edit: impl FnOnce(&mut Style)) -> Result<()> {
    self.try_ref(id)?;
    edit(&mut self.node_mut(id).style);
    self.mark_dirty_internal(id);
    Ok(())
  }

  pub fn layout(&self, id: NodeId) -> &Layout {
    &self.node(id).layout
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_and_remove_child_updates_both_sides() {
    let mut tree = Tree::new();
    let parent = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(parent, child, 0).unwrap();
    assert_eq!(tree.child_count(parent), 1);
    assert_eq!(tree.parent(child), Some(parent));

    tree.remove_child(parent, child).unwrap();
    assert_eq!(tree.child_count(parent), 0);
    assert_eq!(tree.parent(child), None);
  }

  #[test]
  fn inserting_already_parented_child_errors() {
    let mut tree = Tree::new();
    let a = tree.new_node();
    let b = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(a, child, 0).unwrap();
    assert_eq!(tree.insert_child(b, child, 0), Err(LayoutError::AlreadyHasParent));
  }

  #[test]
  fn free_orphans_children_and_detaches_from_parent() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    let grandchild = tree.new_node();
    tree.insert_child(root, child, 0).unwrap();
    tree.insert_child(child, grandchild, 0).unwrap();

    tree.free(child).unwrap();
    assert_eq!(tree.child_count(root), 0);
    assert_eq!(tree.parent(grandchild), None);
  }

  #[test]
  fn free_recursive_frees_whole_subtree() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(root, child, 0).unwrap();
    let before = tree.instance_count();
    tree.free_recursive(root).unwrap();
    assert_eq!(tree.instance_count(), before - 2);
  }

  #[test]
  fn reset_rejects_non_empty_node() {
    let mut tree = Tree::new();
    let parent = tree.new_node();
    let child = tree.new_node();
    tree.insert_child(parent, child, 0).unwrap();
    assert_eq!(tree.reset(parent), Err(LayoutError::ResetNotEmpty));
    tree.remove_child(parent, child).unwrap();
    assert!(tree.reset(parent).is_ok());
  }

  #[test]
  fn mark_dirty_requires_measure_func() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    assert_eq!(tree.mark_dirty(id), Err(LayoutError::MarkDirtyWithoutMeasureFunc));
    tree.set_measure_func(id, Box::new(|_w, _wm, _h, _hm| (0.0, 0.0))).unwrap();
    assert!(tree.mark_dirty(id).is_ok());
  }

  #[test]
  fn dirty_propagation_stops_at_already_dirty_ancestor() {
    let mut tree = Tree::new();
    let root = tree.new_node();
    let mid = tree.new_node();
    let leaf = tree.new_node();
    tree.insert_child(root, mid, 0).unwrap();
    tree.insert_child(mid, leaf, 0).unwrap();
    tree.node_mut(root).is_dirty = false;
    tree.node_mut(mid).is_dirty = false;
    tree.node_mut(leaf).is_dirty = false;

    tree.mark_dirty_internal(leaf);
    assert!(tree.node(leaf).is_dirty);
    assert!(tree.node(mid).is_dirty);
    assert!(tree.node(root).is_dirty);
  }

  #[test]
  fn stale_node_id_after_free_is_reported() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.free(id).unwrap();
    assert_eq!(tree.insert_child(id, id, 0), Err(LayoutError::StaleNodeId));
  }

  #[test]
  fn rtl_folds_left_to_end() {
    let mut tree = Tree::new();
    let id = tree.new_node();
    tree.node_mut(id).layout.direction = Direction::Rtl;
    tree.node_mut(id).layout.set_margin(Edge::End, 7.0);
    assert_eq!(tree.layout(id).margin(Edge::Left), 7.0);
  }
}
