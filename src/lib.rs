//! # flexnode
//!
//! A standalone flexbox layout engine: build a tree of nodes, attach styles, ask the
//! engine to compute each node's position and size against an available width/height.
//!
//! ## Architecture
//!
//! - [`node`] — the arena-backed node tree ([`node::Tree`], [`node::NodeId`]) and its
//!   computed [`node::Layout`] output.
//! - [`style`] — the per-node style fields and the enums they draw from.
//! - [`value`] — the point/percent/auto/undefined value lattice and the nine-edge
//!   fallback rules styles are resolved through.
//! - [`accessors`] — named getters/setters over [`node::Tree`] for every style field and
//!   computed layout value.
//! - [`axis`] — main/cross axis resolution, direction folding, and the edge-algebra
//!   helpers the algorithm is built from.
//! - [`cache`] — the per-node measurement cache and its compatibility predicate.
//! - [`algorithm`] — the recursive layout core.
//! - [`rounding`] — the optional post-layout pixel-rounding pass.
//! - [`driver`] — [`driver::compute_layout`], the entry point that ties the above
//!   together.
//! - [`context`] — bundled engine-wide state (generation counter, experimental feature
//!   flags, logger) instead of free globals.
//! - [`logger`] — the pluggable diagnostic logging trait.
//! - [`error`] — the crate's `Result`/error type for recoverable contract violations.
//!
//! Internal algorithmic invariants that a caller cannot trip through the public API are
//! `debug_assert!` contracts rather than `Result`s — they abort debug builds and compile
//! out of release builds. [`error::LayoutError`] covers the smaller set of contract
//! violations safe caller code actually can trigger (double-parenting a node, resetting
//! a non-empty one, and so on).

pub mod accessors;
pub mod algorithm;
pub mod axis;
pub mod cache;
pub mod context;
pub mod driver;
pub mod error;
pub mod logger;
pub mod node;
pub mod rounding;
pub mod style;
pub mod value;

pub mod prelude {
  pub use crate::cache::{CachedMeasurement, MeasureMode};
  pub use crate::context::{ExperimentalFeature, LayoutContext};
  pub use crate::driver::compute_layout;
  pub use crate::error::{LayoutError, Result};
  pub use crate::logger::{LogLevel, Logger, NullLogger, StdioLogger};
  pub use crate::node::{BaselineFunc, Layout, MeasureFunc, Node, NodeId, PrintFunc, Tree};
  pub use crate::rounding::round_to_pixel_grid;
  pub use crate::style::{
    Align, Dimension, Direction, Display, FlexDirection, FlexWrap, JustifyContent, Overflow, PositionType, Style,
  };
  pub use crate::value::{computed_edge_value, resolve, resolve_margin, Edge, Edges, Unit, Value};

  #[cfg(feature = "tracing")]
  pub use crate::logger::TracingLogger;
}
