//! Numeric style values (point / percent / auto / undefined) and their resolution against
//! a reference size.
//!
//! Mirrors the teacher's `SizeValue`/`resolve_size_value` pair in spirit (a tagged-union
//! value type with a resolver that takes a reference size), generalized to the full
//! point/percent/auto/undefined lattice and `f32` precision the layout algorithm needs.

use std::fmt;

/// The unit a [`Value`]'s scalar is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  /// No value has been set; the scalar is NaN and carries no meaning.
  Undefined,
  /// An absolute length.
  Point,
  /// A percentage of some reference size, resolved at layout time.
  Percent,
  /// The engine should compute this value itself (e.g. auto margins).
  Auto,
}

/// A style scalar paired with the unit it's expressed in.
///
/// `Undefined`/`Auto` values carry `scalar = NaN`; equality and hashing are not derived
/// because NaN never compares equal to itself under `PartialEq` — use [`Value::is_undefined`]
/// or [`floats_equal`](crate::cache::floats_equal) instead of `==` on the scalar.
#[derive(Debug, Clone, Copy)]
pub struct Value {
  pub scalar: f32,
  pub unit: Unit,
}

impl Value {
  pub const UNDEFINED: Value = Value { scalar: f32::NAN, unit: Unit::Undefined };
  pub const AUTO: Value = Value { scalar: f32::NAN, unit: Unit::Auto };
  pub const ZERO: Value = Value { scalar: 0.0, unit: Unit::Point };

  pub fn points(v: f32) -> Value {
    if v.is_nan() {
      Value::AUTO
    } else {
      Value { scalar: v, unit: Unit::Point }
    }
  }

  pub fn percent(v: f32) -> Value {
    if v.is_nan() {
      Value::AUTO
    } else {
      Value { scalar: v, unit: Unit::Percent }
    }
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self.unit, Unit::Undefined)
  }

  pub fn is_auto(&self) -> bool {
    matches!(self.unit, Unit::Auto)
  }

  /// True when this value resolves to a finite, non-negative scalar against some size
  /// (i.e. it is neither Undefined nor Auto). Does not itself check sign.
  pub fn is_defined(&self) -> bool {
    matches!(self.unit, Unit::Point | Unit::Percent)
  }
}

impl Default for Value {
  fn default() -> Self {
    Value::UNDEFINED
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.unit {
      Unit::Undefined => write!(f, "undefined"),
      Unit::Auto => write!(f, "auto"),
      Unit::Point => write!(f, "{}", self.scalar),
      Unit::Percent => write!(f, "{}%", self.scalar),
    }
  }
}

/// Resolve a style value against a reference size.
///
/// Returns `NaN` for `Undefined`/`Auto`, the scalar itself for `Point`, and
/// `scalar * reference_size / 100` for `Percent`.
pub fn resolve(value: Value, reference_size: f32) -> f32 {
  match value.unit {
    Unit::Undefined | Unit::Auto => f32::NAN,
    Unit::Point => value.scalar,
    Unit::Percent => value.scalar * reference_size / 100.0,
  }
}

/// Like [`resolve`], but `Auto` resolves to `0` instead of `NaN` — margins default to zero
/// rather than undefined.
pub fn resolve_margin(value: Value, reference_size: f32) -> f32 {
  if value.is_auto() {
    0.0
  } else {
    resolve(value, reference_size)
  }
}

/// The nine edges a [`crate::style::Style`] may assign a [`Value`] to: four physical
/// edges, Start/End (logical, direction-dependent), and three shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
  Left,
  Top,
  Right,
  Bottom,
  Start,
  End,
  Horizontal,
  Vertical,
  All,
}

/// One [`Value`] per [`Edge`], in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Edges {
  values: [Value; 9],
}

impl Default for Edges {
  fn default() -> Self {
    Edges { values: [Value::UNDEFINED; 9] }
  }
}

impl Edges {
  pub fn get(&self, edge: Edge) -> Value {
    self.values[edge as usize]
  }

  pub fn set(&mut self, edge: Edge, value: Value) {
    self.values[edge as usize] = value;
  }
}

/// Resolve an edge shorthand to the effective value for a physical edge, per the CSS-like
/// fallback chain:
///
/// 1. `edges[edge]` if defined;
/// 2. if `edge` is Top/Bottom: `edges[Vertical]` if defined;
/// 3. if `edge` is Left/Right/Start/End: `edges[Horizontal]` if defined;
/// 4. `edges[All]` if defined;
/// 5. if `edge` is Start/End: explicit `Value::UNDEFINED` (no further fallback);
/// 6. otherwise `default`.
///
/// Requesting a shorthand edge (`Horizontal`/`Vertical`/`All`) itself is a programming
/// error.
pub fn computed_edge_value(edges: &Edges, edge: Edge, default: Value) -> Value {
  debug_assert!(
    !matches!(edge, Edge::Horizontal | Edge::Vertical | Edge::All),
    "computed_edge_value must be called with a physical or logical edge, not a shorthand"
  );

  let direct = edges.get(edge);
  if !direct.is_undefined() {
    return direct;
  }

  if matches!(edge, Edge::Top | Edge::Bottom) {
    let vertical = edges.get(Edge::Vertical);
    if !vertical.is_undefined() {
      return vertical;
    }
  }

  if matches!(edge, Edge::Left | Edge::Right | Edge::Start | Edge::End) {
    let horizontal = edges.get(Edge::Horizontal);
    if !horizontal.is_undefined() {
      return horizontal;
    }
  }

  let all = edges.get(Edge::All);
  if !all.is_undefined() {
    return all;
  }

  if matches!(edge, Edge::Start | Edge::End) {
    return Value::UNDEFINED;
  }

  default
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_matches_unit() {
    assert!(resolve(Value::UNDEFINED, 100.0).is_nan());
    assert!(resolve(Value::AUTO, 100.0).is_nan());
    assert_eq!(resolve(Value::points(10.0), 100.0), 10.0);
    assert_eq!(resolve(Value::percent(50.0), 100.0), 50.0);
  }

  #[test]
  fn resolve_margin_treats_auto_as_zero() {
    assert_eq!(resolve_margin(Value::AUTO, 100.0), 0.0);
    assert!(resolve_margin(Value::UNDEFINED, 100.0).is_nan());
  }

  #[test]
  fn edge_fallback_priority() {
    let mut edges = Edges::default();
    edges.set(Edge::All, Value::points(4.0));
    assert_eq!(computed_edge_value(&edges, Edge::Top, Value::ZERO).scalar, 4.0);

    edges.set(Edge::Vertical, Value::points(8.0));
    assert_eq!(computed_edge_value(&edges, Edge::Top, Value::ZERO).scalar, 8.0);

    edges.set(Edge::Top, Value::points(2.0));
    assert_eq!(computed_edge_value(&edges, Edge::Top, Value::ZERO).scalar, 2.0);
  }

  #[test]
  fn start_end_do_not_fall_back_to_default() {
    let edges = Edges::default();
    let v = computed_edge_value(&edges, Edge::Start, Value::points(99.0));
    assert!(v.is_undefined());
  }

  #[test]
  fn non_logical_edge_falls_back_to_default() {
    let edges = Edges::default();
    let v = computed_edge_value(&edges, Edge::Top, Value::points(7.0));
    assert_eq!(v.scalar, 7.0);
  }
}
