//! # Error Handling
//!
//! The layout algorithm itself is a pure computation: its internal invariants (measure-mode
//! and NaN pairing, baseline callback finiteness, edge-shorthand misuse) are `debug_assert!`
//! contracts that abort debug builds and compile out of release builds — see the crate's
//! top-level docs for the reasoning.
//!
//! [`LayoutError`] covers the smaller set of contract violations that are reachable from
//! ordinary safe caller code and therefore need a recoverable `Result`, rather than a panic:
//! mutating a tree in a way that would break the child/parent invariant, or reconfiguring the
//! allocator hooks while nodes are still live.

use thiserror::Error;

/// Type alias for `Result<T, LayoutError>` used throughout the tree-mutation API.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Recoverable contract violations raised by the tree-mutation and context APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
  /// Attempted to insert a child that already belongs to another parent.
  #[error("node already has a parent; remove it before inserting elsewhere")]
  AlreadyHasParent,

  /// Attempted to give a node both children and a measure function.
  #[error("a node with a measure function cannot also have children")]
  MeasureFuncWithChildren,

  /// Attempted to reset a node that still has children or a parent.
  #[error("cannot reset a node that still has children or a parent")]
  ResetNotEmpty,

  /// `mark_dirty` was called on a node without a measure function.
  #[error("mark_dirty is only valid on nodes with a measure function")]
  MarkDirtyWithoutMeasureFunc,

  /// `remove_child` was called with a child that isn't actually a child of the given parent.
  #[error("node is not a child of the given parent")]
  NotAChild,

  /// The allocator hooks were swapped while the instance counter was nonzero.
  #[error("cannot change allocator hooks while {0} node(s) are still live")]
  AllocatorSwapWhileLive(usize),

  /// A `NodeId` was used after its node was freed.
  #[error("node id refers to a freed node")]
  StaleNodeId,
}
