//! The recursive flex layout engine: `layout_node_internal` (cache gate) and `layout_impl`
//! (the eleven-step core), plus their two satellite computations, child flex-basis
//! resolution (§4.9) and absolute-child placement (§4.10).
//!
//! Decomposition is grounded in the teacher's `LayoutEngine` method split
//! (`compute_flex_children` → `compute_flex_line`/`compute_flex_wrap` →
//! `distribute_main_axis`/`distribute_cross_axis`), generalized from the teacher's
//! single-pass `u16`-cell grow/shrink to the two-pass `f32` freeze/apply resolution of
//! `original_source/Yoga.c`'s `RYGNodelayoutImpl`/`RYGResolveFlexibleLength`.

use crate::axis::{
  align_item, axis_dimension, bound_axis, bound_axis_within_min_and_max, flex_direction_cross, flex_direction_resolve,
  is_baseline_layout, is_leading_pos_defined, is_trailing_pos_defined, leading_border, leading_margin, leading_margin_is_auto,
  leading_padding, leading_padding_and_border, leading_position, margin_for_axis, padding_and_border_for_axis, relative_position,
  resolve_direction, trailing_border, trailing_margin, trailing_margin_is_auto, trailing_padding, trailing_padding_and_border,
  trailing_position,
};

use crate::cache::{can_use_cached_measurement, CachedMeasurement, MeasureMode};
use crate::context::ExperimentalFeature;
use crate::node::{NodeId, Tree, MAX_CACHED_MEASUREMENTS};
use crate::style::{Align, Dimension, Direction, Display, FlexDirection, FlexWrap, JustifyContent, PositionType, Style};
use crate::value::{resolve, Edge, Value};

fn is_style_dim_defined(style: &Style, dim: Dimension, owner_size: f32) -> bool {
  let resolved = style.resolved_dimension(dim);
  !(resolved.is_undefined() || (resolved.is_defined() && resolved.scalar < 0.0) || (resolved.unit == crate::value::Unit::Percent && owner_size.is_nan()))
    && !resolve(resolved, owner_size).is_nan()
}

fn is_layout_dim_defined(tree: &Tree, node: NodeId, dim: Dimension) -> bool {
  let measured = tree.node(node).layout.measured_dimension(dim);
  !measured.is_nan() && measured >= 0.0
}

fn dim_with_margin(tree: &Tree, node: NodeId, axis: FlexDirection, width_size: f32) -> f32 {
  let dim = axis_dimension(axis);
  tree.node(node).layout.measured_dimension(dim) + margin_for_axis(&tree.node(node).style, axis, width_size)
}

/// §4.3 baseline offset: a node's own callback if it has one, else the baseline of the
/// first non-absolute child on line 0 whose `align_self` resolves to `Baseline`, else the
/// node's own measured height. Mirrors `original_source/Yoga.c`'s `RYGBaseline`.
fn baseline(tree: &mut Tree, node: NodeId) -> f32 {
  if let Some(callback) = tree.node_mut(node).baseline.take() {
    let width = tree.node(node).layout.measured_dimension(Dimension::Width);
    let height = tree.node(node).layout.measured_dimension(Dimension::Height);
    let result = callback.baseline(width, height);
    tree.node_mut(node).baseline = Some(callback);
    return result;
  }

  let style = tree.node(node).style.clone();
  let children = tree.node(node).children().to_vec();
  let baseline_child = children.into_iter().find(|&child| {
    let child_style = tree.node(child).style.clone();
    tree.node(child).line_index == 0 && child_style.position_type != PositionType::Absolute && align_item(&style, child_style.align_self) == Align::Baseline
  });

  match baseline_child {
    Some(child) => {
      let child_baseline = baseline(tree, child);
      child_baseline + tree.node(child).layout.position(Edge::Top)
    }
    None => tree.node(node).layout.measured_dimension(Dimension::Height),
  }
}

/// §4.5 `layout_node_internal` — the measurement-cache gate around `layout_impl`.
#[allow(clippy::too_many_arguments)]
pub fn layout_node_internal(
  tree: &mut Tree,
  node: NodeId,
  available_width: f32,
  available_height: f32,
  parent_direction: Direction,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
  perform_layout: bool,
  reason: &str,
) -> bool {
  debug_assert!(
    !available_width.is_nan() || width_mode == MeasureMode::Undefined,
    "undefined available width must carry MeasureMode::Undefined"
  );
  debug_assert!(
    !available_height.is_nan() || height_mode == MeasureMode::Undefined,
    "undefined available height must carry MeasureMode::Undefined"
  );

  let current_generation = tree.context.generation();
  let is_dirty = tree.node(node).is_dirty;
  let generation_count = tree.node(node).layout.generation_count;
  let last_parent_direction = tree.node(node).layout.last_parent_direction;

  let needs_recompute = (is_dirty && generation_count != current_generation) || last_parent_direction != Some(parent_direction);

  if needs_recompute {
    tree.node_mut(node).layout.cached_layout = None;
    tree.node_mut(node).layout.next_cached_measurements_index = 0;
  } else {
    let has_measure = tree.node(node).has_measure_func();
    let margin_row = leading_margin(&tree.node(node).style, FlexDirection::Row, parent_width)
      + trailing_margin(&tree.node(node).style, FlexDirection::Row, parent_width);
    let margin_column = leading_margin(&tree.node(node).style, FlexDirection::Column, parent_width)
      + trailing_margin(&tree.node(node).style, FlexDirection::Column, parent_width);

    let try_entry = |entry: &CachedMeasurement| {
      can_use_cached_measurement(
        width_mode,
        available_width,
        height_mode,
        available_height,
        entry.width_mode,
        entry.available_width,
        entry.height_mode,
        entry.available_height,
        entry.computed_width,
        entry.computed_height,
        margin_row,
        margin_column,
      )
    };

    let exact_match = |entry: &CachedMeasurement| {
      entry.width_mode == width_mode
        && entry.height_mode == height_mode
        && crate::cache::floats_equal(entry.available_width, available_width)
        && crate::cache::floats_equal(entry.available_height, available_height)
    };

    let hit = if has_measure {
      tree
        .node(node)
        .layout
        .cached_layout
        .filter(try_entry)
        .or_else(|| tree.node(node).layout.cached_measurements.iter().copied().find(try_entry))
    } else if perform_layout {
      tree.node(node).layout.cached_layout.filter(|e| exact_match(e))
    } else {
      tree.node(node).layout.cached_measurements.iter().copied().find(|e| exact_match(e))
    };

    if let Some(entry) = hit {
      let layout = &mut tree.node_mut(node).layout;
      layout.set_measured_dimension(Dimension::Width, entry.computed_width);
      layout.set_measured_dimension(Dimension::Height, entry.computed_height);
      tree.context.log(crate::logger::LogLevel::Debug, &format!("cache hit ({reason})"));
      return false;
    }
  }

  tree.context.log(crate::logger::LogLevel::Debug, &format!("cache miss, running layout_impl ({reason})"));
  layout_impl(
    tree,
    node,
    available_width,
    available_height,
    parent_direction,
    width_mode,
    height_mode,
    parent_width,
    parent_height,
    perform_layout,
  );

  let computed_width = tree.node(node).layout.measured_dimension(Dimension::Width);
  let computed_height = tree.node(node).layout.measured_dimension(Dimension::Height);
  let new_entry = CachedMeasurement {
    available_width,
    available_height,
    width_mode,
    height_mode,
    computed_width,
    computed_height,
  };

  {
    let layout = &mut tree.node_mut(node).layout;
    if perform_layout {
      layout.cached_layout = Some(new_entry);
    } else {
      if layout.cached_measurements.len() < MAX_CACHED_MEASUREMENTS {
        layout.cached_measurements.push(new_entry);
        layout.next_cached_measurements_index = layout.cached_measurements.len() % MAX_CACHED_MEASUREMENTS;
      } else {
        // Intentionally not LRU; see SPEC_FULL.md §9 Open Questions.
        let idx = layout.next_cached_measurements_index;
        layout.cached_measurements[idx] = new_entry;
        layout.next_cached_measurements_index = (idx + 1) % MAX_CACHED_MEASUREMENTS;
      }
    }
    layout.last_parent_direction = Some(parent_direction);
    layout.generation_count = current_generation;
  }

  true
}

/// §4.6 measure-function nodes.
fn measure_leaf_with_callback(
  tree: &mut Tree,
  node: NodeId,
  available_width: f32,
  available_height: f32,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  margin_row: f32,
  margin_column: f32,
) {
  let inner_w = available_width - margin_row - padding_and_border_for_axis(&tree.node(node).style, FlexDirection::Row, available_width);
  let inner_h = available_height - margin_column - padding_and_border_for_axis(&tree.node(node).style, FlexDirection::Column, available_height);

  let (measured_w, measured_h) = if width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly {
    (available_width - margin_row, available_height - margin_column)
  } else if inner_w <= 0.0 || inner_h <= 0.0 {
    (0.0, 0.0)
  } else {
    let callback_width_mode = if width_mode == MeasureMode::Exactly { MeasureMode::Exactly } else { width_mode };
    let callback_height_mode = if height_mode == MeasureMode::Exactly { MeasureMode::Exactly } else { height_mode };
    let (mw, mh) = {
      let measure = tree.node(node).measure.as_ref().expect("measure_leaf_with_callback requires a measure func");
      measure.measure(inner_w, callback_width_mode, inner_h, callback_height_mode)
    };
    let w = if matches!(width_mode, MeasureMode::Undefined | MeasureMode::AtMost) { mw } else { available_width - margin_row };
    let h = if matches!(height_mode, MeasureMode::Undefined | MeasureMode::AtMost) { mh } else { available_height - margin_column };
    let _ = (callback_width_mode, callback_height_mode);
    (w, h)
  };

  let bounded_w = bound_axis(&tree.node(node).style, FlexDirection::Row, measured_w, available_width, available_width);
  let bounded_h = bound_axis(&tree.node(node).style, FlexDirection::Column, measured_h, available_height, available_width);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, bounded_w);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, bounded_h);
}

/// §4.7 empty containers.
fn measure_empty_container(
  tree: &mut Tree,
  node: NodeId,
  available_width: f32,
  available_height: f32,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  margin_row: f32,
  margin_column: f32,
) {
  let style = tree.node(node).style.clone();
  let w = if matches!(width_mode, MeasureMode::Undefined | MeasureMode::AtMost) {
    padding_and_border_for_axis(&style, FlexDirection::Row, available_width)
  } else {
    available_width - margin_row
  };
  let h = if matches!(height_mode, MeasureMode::Undefined | MeasureMode::AtMost) {
    padding_and_border_for_axis(&style, FlexDirection::Column, available_height)
  } else {
    available_height - margin_column
  };
  let bounded_w = bound_axis(&style, FlexDirection::Row, w, available_width, available_width);
  let bounded_h = bound_axis(&style, FlexDirection::Column, h, available_height, available_width);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, bounded_w);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, bounded_h);
}

/// §4.8 fixed-size shortcut: only applies in measure-only mode.
fn fixed_size_shortcut_applies(available_width: f32, available_height: f32, width_mode: MeasureMode, height_mode: MeasureMode) -> bool {
  (width_mode == MeasureMode::AtMost && available_width <= 0.0)
    || (height_mode == MeasureMode::AtMost && available_height <= 0.0)
    || (width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly)
}

fn apply_fixed_size_shortcut(
  tree: &mut Tree,
  node: NodeId,
  available_width: f32,
  available_height: f32,
  margin_row: f32,
  margin_column: f32,
) {
  let w = if available_width.is_nan() || available_width <= 0.0 { 0.0 } else { available_width - margin_row };
  let h = if available_height.is_nan() || available_height <= 0.0 { 0.0 } else { available_height - margin_column };
  let style = tree.node(node).style.clone();
  let bounded_w = bound_axis(&style, FlexDirection::Row, w, available_width, available_width);
  let bounded_h = bound_axis(&style, FlexDirection::Column, h, available_height, available_width);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, bounded_w);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, bounded_h);
}

/// Per-child scratch state threaded through steps 3-8 of one `layout_impl` invocation.
/// Never stored on the node itself; rebuilt fresh per call (see SPEC_FULL.md §9).
struct LineChild {
  id: NodeId,
  flex_basis: f32,
  main_size: f32,
  cross_size: f32,
  is_flexible: bool,
  is_relative: bool,
}

/// §4.5 `layout_impl` — the eleven-step core algorithm.
#[allow(clippy::too_many_arguments)]
fn layout_impl(
  tree: &mut Tree,
  node: NodeId,
  available_width: f32,
  available_height: f32,
  parent_direction: Direction,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
  perform_layout: bool,
) {
  // --- Step 0: preamble ---
  let style_direction = tree.node(node).style.direction;
  let direction = resolve_direction(style_direction, parent_direction);
  tree.node_mut(node).layout.direction = direction;

  let row_axis = flex_direction_resolve(FlexDirection::Row, direction);
  {
    let style = tree.node(node).style.clone();
    let layout = &mut tree.node_mut(node).layout;
    layout.set_margin(Edge::Start, leading_margin(&style, row_axis, parent_width));
    layout.set_margin(Edge::End, trailing_margin(&style, row_axis, parent_width));
    layout.set_margin(Edge::Top, leading_margin(&style, FlexDirection::Column, parent_width));
    layout.set_margin(Edge::Bottom, trailing_margin(&style, FlexDirection::Column, parent_width));

    layout.set_border(Edge::Start, leading_border(&style, row_axis));
    layout.set_border(Edge::End, trailing_border(&style, row_axis));
    layout.set_border(Edge::Top, leading_border(&style, FlexDirection::Column));
    layout.set_border(Edge::Bottom, trailing_border(&style, FlexDirection::Column));

    layout.set_padding(Edge::Start, leading_padding(&style, row_axis, parent_width));
    layout.set_padding(Edge::End, trailing_padding(&style, row_axis, parent_width));
    layout.set_padding(Edge::Top, leading_padding(&style, FlexDirection::Column, parent_width));
    layout.set_padding(Edge::Bottom, trailing_padding(&style, FlexDirection::Column, parent_width));
  }

  let margin_row = tree.node(node).layout.margin(Edge::Left) + tree.node(node).layout.margin(Edge::Right);
  let margin_column = tree.node(node).layout.margin(Edge::Top) + tree.node(node).layout.margin(Edge::Bottom);

  if tree.node(node).has_measure_func() {
    measure_leaf_with_callback(tree, node, available_width, available_height, width_mode, height_mode, margin_row, margin_column);
    return;
  }

  if tree.node(node).children().is_empty() {
    measure_empty_container(tree, node, available_width, available_height, width_mode, height_mode, margin_row, margin_column);
    return;
  }

  if !perform_layout && fixed_size_shortcut_applies(available_width, available_height, width_mode, height_mode) {
    apply_fixed_size_shortcut(tree, node, available_width, available_height, margin_row, margin_column);
    return;
  }

  // --- Step 1: axes ---
  let style = tree.node(node).style.clone();
  let main_axis = flex_direction_resolve(style.flex_direction, direction);
  let cross_axis = flex_direction_cross(style.flex_direction, direction);
  let is_main_axis_row = main_axis.is_row();

  let padding_border_row = padding_and_border_for_axis(&style, FlexDirection::Row, parent_width);
  let padding_border_column = padding_and_border_for_axis(&style, FlexDirection::Column, parent_width);

  // Max dimension overrides the predefined dimension; min dimension in turn overrides both.
  let min_inner_width = resolve(style.min_dimension(Dimension::Width), parent_width) - margin_row - padding_border_row;
  let max_inner_width = resolve(style.max_dimension(Dimension::Width), parent_width) - margin_row - padding_border_row;
  let min_inner_height = resolve(style.min_dimension(Dimension::Height), parent_height) - margin_column - padding_border_column;
  let max_inner_height = resolve(style.max_dimension(Dimension::Height), parent_height) - margin_column - padding_border_column;

  let mut available_inner_width = available_width - margin_row - padding_border_row;
  if !available_inner_width.is_nan() {
    available_inner_width = available_inner_width.min(max_inner_width).max(min_inner_width);
  }
  let mut available_inner_height = available_height - margin_column - padding_border_column;
  if !available_inner_height.is_nan() {
    available_inner_height = available_inner_height.min(max_inner_height).max(min_inner_height);
  }

  let (available_inner_main, available_inner_cross) =
    if is_main_axis_row { (available_inner_width, available_inner_height) } else { (available_inner_height, available_inner_width) };

  let (measure_mode_main, measure_mode_cross) = if is_main_axis_row { (width_mode, height_mode) } else { (height_mode, width_mode) };

  // --- Step 2: single-flex optimization ---
  let children: Vec<NodeId> = tree.node(node).children().to_vec();
  let mut single_flex_child: Option<NodeId> = None;
  if measure_mode_main == MeasureMode::Exactly {
    let mut candidate = None;
    let mut disqualified = false;
    for &child in &children {
      let child_style = &tree.node(child).style;
      if child_style.position_type == PositionType::Absolute {
        continue;
      }
      if child_style.flex_grow() > 0.0 && child_style.flex_shrink() > 0.0 {
        if candidate.is_some() {
          disqualified = true;
          break;
        }
        candidate = Some(child);
      }
    }
    if !disqualified {
      single_flex_child = candidate;
    }
  }

  // --- Step 3: flex basis for each child, split relative/absolute ---
  let mut relative_children: Vec<NodeId> = Vec::new();
  let mut absolute_children: Vec<NodeId> = Vec::new();
  let mut basis_by_child: std::collections::HashMap<NodeId, f32> = std::collections::HashMap::new();
  let mut total_flex_basis = 0.0f32;

  for &child in &children {
    if tree.node(child).style.display == Display::None {
      zero_out_layout_recursively(tree, child);
      continue;
    }

    let child_style = tree.node(child).style.clone();
    if perform_layout {
      let child_row = leading_margin(&child_style, FlexDirection::Row, available_inner_width)
        + relative_position(&child_style, FlexDirection::Row, available_inner_width);
      let child_col = leading_margin(&child_style, FlexDirection::Column, available_inner_width)
        + relative_position(&child_style, FlexDirection::Column, available_inner_height);
      tree.node_mut(child).layout.set_position(Edge::Left, child_row);
      tree.node_mut(child).layout.set_position(Edge::Top, child_col);
    }

    if child_style.position_type == PositionType::Absolute {
      absolute_children.push(child);
      continue;
    }

    relative_children.push(child);
    let basis = if Some(child) == single_flex_child {
      0.0
    } else {
      compute_flex_basis_for_child(
        tree,
        child,
        &style,
        main_axis,
        is_main_axis_row,
        direction,
        available_inner_width,
        available_inner_height,
        width_mode,
        height_mode,
        available_inner_width,
        available_inner_height,
      )
    };
    basis_by_child.insert(child, basis);
    total_flex_basis += basis + margin_for_axis(&child_style, main_axis, available_inner_width);
  }

  let _flex_basis_overflows = !available_inner_main.is_nan() && total_flex_basis > available_inner_main;

  let node_is_baseline_layout =
    is_baseline_layout(&style, relative_children.iter().map(|&id| (true, tree.node(id).style.align_self)));

  // --- Step 4: line collection ---
  let wrap = style.flex_wrap != FlexWrap::NoWrap;
  let mut lines: Vec<Vec<NodeId>> = Vec::new();
  let mut current_line: Vec<NodeId> = Vec::new();
  let mut current_line_main: f32 = 0.0;

  for &child in &relative_children {
    let child_style = tree.node(child).style.clone();
    let basis = basis_by_child[&child];
    // SPEC_FULL.md §9: `outerFlexBasis = max(minMainResolved, basis) + margin`, where
    // `max` is `original_source/Yoga.c`'s `fmaxf` — it ignores NaN and returns the other
    // operand, so an undefined min-main-size (the common case) falls back to `basis`
    // rather than disabling the line-break test. See `line_break_undefined_min_main`.
    let main_axis_parent_size = if is_main_axis_row { parent_width } else { parent_height };
    let min_main_resolved = resolve(child_style.min_dimension(axis_dimension(main_axis)), main_axis_parent_size);
    let outer = min_main_resolved.max(basis) + margin_for_axis(&child_style, main_axis, available_inner_width);
    if wrap && !current_line.is_empty() && !available_inner_main.is_nan() && current_line_main + outer > available_inner_main {
      lines.push(std::mem::take(&mut current_line));
      current_line_main = 0.0;
    }
    tree.node_mut(child).line_index = lines.len();
    current_line.push(child);
    current_line_main += outer;
  }
  if !current_line.is_empty() || lines.is_empty() {
    lines.push(current_line);
  }

  let can_skip_flex = !perform_layout && measure_mode_cross == MeasureMode::Exactly;

  let mut max_line_main_dim = 0.0f32;
  let mut total_line_cross_dim = 0.0f32;

  for line in &lines {
    let mut line_children: Vec<LineChild> = line
      .iter()
      .map(|&id| {
        let child_style = tree.node(id).style.clone();
        LineChild {
          id,
          flex_basis: basis_by_child[&id],
          main_size: basis_by_child[&id],
          cross_size: f32::NAN,
          is_flexible: child_style.flex_grow() > 0.0 || child_style.flex_shrink() > 0.0,
          is_relative: child_style.position_type == PositionType::Relative,
        }
      })
      .collect();

    // --- Step 5: resolve flexible lengths (two-pass freeze/apply) ---
    let size_consumed: f32 = line_children
      .iter()
      .map(|c| c.flex_basis + margin_for_axis(&tree.node(c.id).style, main_axis, available_inner_width))
      .sum();

    let effective_available_main = if available_inner_main.is_nan() {
      if size_consumed < 0.0 {
        0.0
      } else {
        size_consumed
      }
    } else {
      available_inner_main
    };

    let mut remaining_free_space = if available_inner_main.is_nan() { -size_consumed } else { available_inner_main - size_consumed };

    let mut total_grow: f32 = line_children.iter().filter(|c| c.is_relative).map(|c| tree.node(c.id).style.flex_grow()).sum();
    let mut total_shrink_scaled: f32 = line_children
      .iter()
      .filter(|c| c.is_relative)
      .map(|c| -tree.node(c.id).style.flex_shrink() * c.flex_basis)
      .sum();

    if !can_skip_flex && (remaining_free_space != 0.0) {
      // Pass 1: freeze constrained items.
      for child in line_children.iter_mut().filter(|c| c.is_relative && c.is_flexible) {
        let child_style = tree.node(child.id).style.clone();
        let share = if remaining_free_space > 0.0 && total_grow > 0.0 {
          (child_style.flex_grow() / total_grow) * remaining_free_space
        } else if remaining_free_space < 0.0 && total_shrink_scaled != 0.0 {
          (-child_style.flex_shrink() * child.flex_basis / total_shrink_scaled) * remaining_free_space
        } else {
          0.0
        };
        let hypothetical = child.flex_basis + share;
        let clamped = bound_axis(&child_style, main_axis, hypothetical, effective_available_main, available_inner_width);
        if (clamped - hypothetical).abs() > crate::cache::FLOAT_EPSILON {
          remaining_free_space -= clamped - child.flex_basis;
          if remaining_free_space > 0.0 {
            total_grow -= child_style.flex_grow();
          } else {
            total_shrink_scaled -= -child_style.flex_shrink() * child.flex_basis;
          }
          child.main_size = clamped;
          child.is_flexible = false;
        }
      }

      // Pass 2: apply sizes to the remaining flexible items.
      for child in line_children.iter_mut().filter(|c| c.is_relative && c.is_flexible) {
        let child_style = tree.node(child.id).style.clone();
        let share = if remaining_free_space > 0.0 && total_grow > 0.0 {
          (child_style.flex_grow() / total_grow) * remaining_free_space
        } else if remaining_free_space < 0.0 && total_shrink_scaled != 0.0 {
          (-child_style.flex_shrink() * child.flex_basis / total_shrink_scaled) * remaining_free_space
        } else {
          0.0
        };
        let hypothetical = child.flex_basis + share;
        child.main_size = bound_axis(&child_style, main_axis, hypothetical, effective_available_main, available_inner_width);
      }
    } else {
      for child in line_children.iter_mut().filter(|c| c.is_relative) {
        child.main_size = child.flex_basis;
      }
    }

    for child in line_children.iter_mut() {
      let child_style = tree.node(child.id).style.clone();
      let cross_dim = child_style.resolved_dimension(axis_dimension(cross_axis));
      let requires_stretch = style.align_items == Align::Stretch
        && !cross_dim.is_defined()
        && !available_inner_cross.is_nan();

      let (child_cross_avail, child_cross_mode) = if requires_stretch {
        (available_inner_cross, MeasureMode::Exactly)
      } else if cross_dim.is_defined() {
        (resolve(cross_dim, available_inner_cross), MeasureMode::Exactly)
      } else {
        (available_inner_cross, if available_inner_cross.is_nan() { MeasureMode::Undefined } else { MeasureMode::AtMost })
      };

      let (child_w, child_h, width_m, height_m) = if is_main_axis_row {
        (child.main_size, child_cross_avail, MeasureMode::Exactly, child_cross_mode)
      } else {
        (child_cross_avail, child.main_size, child_cross_mode, MeasureMode::Exactly)
      };

      layout_node_internal(
        tree,
        child.id,
        child_w,
        child_h,
        direction,
        width_m,
        height_m,
        available_inner_width,
        available_inner_height,
        perform_layout && !requires_stretch,
        "flex-resolve",
      );

      child.cross_size = tree.node(child.id).layout.measured_dimension(axis_dimension(cross_axis));
    }

    // --- Step 6: main-axis justification ---
    if measure_mode_main == MeasureMode::AtMost && remaining_free_space > 0.0 {
      let main_axis_parent_size = if is_main_axis_row { parent_width } else { parent_height };
      let min_main_resolved = resolve(style.min_dimension(axis_dimension(main_axis)), main_axis_parent_size);
      remaining_free_space = if !min_main_resolved.is_nan() && min_main_resolved >= 0.0 {
        (min_main_resolved - size_consumed).max(0.0)
      } else {
        0.0
      };
    }

    let auto_margin_count = line_children
      .iter()
      .filter(|c| c.is_relative)
      .filter(|c| {
        let edge = if is_main_axis_row { Edge::Start } else { Edge::Top };
        let other = if is_main_axis_row { Edge::End } else { Edge::Bottom };
        tree.node(c.id).style.margin_edge(edge).is_auto() || tree.node(c.id).style.margin_edge(other).is_auto()
      })
      .count();

    let items_on_line = line_children.len();
    let (mut leading, between) = if auto_margin_count > 0 {
      (0.0, 0.0)
    } else {
      match style.justify_content {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::Center => (remaining_free_space / 2.0, 0.0),
        JustifyContent::FlexEnd => (remaining_free_space, 0.0),
        JustifyContent::SpaceBetween => {
          if items_on_line > 1 {
            (0.0, remaining_free_space / (items_on_line - 1) as f32)
          } else {
            (0.0, 0.0)
          }
        }
        JustifyContent::SpaceAround => {
          let b = if items_on_line > 0 { remaining_free_space / items_on_line as f32 } else { 0.0 };
          (b / 2.0, b)
        }
      }
    };

    let mut main_dim = leading + padding_and_border_start(&style, main_axis, available_inner_width);
    let mut line_cross_dim = 0.0f32;

    for (i, child) in line_children.iter().enumerate() {
      let child_style = tree.node(child.id).style.clone();
      main_dim += leading_margin(&child_style, main_axis, available_inner_width);
      if perform_layout {
        let edge = if is_main_axis_row { Edge::Left } else { Edge::Top };
        tree.node_mut(child.id).layout.set_position(edge, main_dim);
      }
      main_dim += child.main_size;
      main_dim += trailing_margin(&child_style, main_axis, available_inner_width);
      if i + 1 < items_on_line {
        main_dim += between;
      }
      line_cross_dim = line_cross_dim.max(child.cross_size + margin_for_axis(&child_style, cross_axis, available_inner_width));
    }

    for &child in absolute_children.iter() {
      if tree.node(child).line_index != 0 {
        continue;
      }
      let child_style = tree.node(child).style.clone();
      if is_leading_pos_defined(&child_style, main_axis) {
        let edge = if is_main_axis_row { Edge::Left } else { Edge::Top };
        let pos = leading_position(&child_style, main_axis, available_inner_main) + leading_border(&style, main_axis) + leading_margin(&child_style, main_axis, available_inner_main);
        tree.node_mut(child).layout.set_position(edge, pos);
      }
    }

    max_line_main_dim = max_line_main_dim.max(main_dim);

    // A non-wrapping container stretches its single line to fill the full cross axis
    // when that axis measures Exactly, rather than shrinking to the line's content.
    if !wrap && measure_mode_cross == MeasureMode::Exactly {
      line_cross_dim = available_inner_cross;
    }

    let padding_border_cross = padding_and_border_for_axis(&style, cross_axis, available_inner_width);
    let cross_axis_parent_size = if is_main_axis_row { parent_height } else { parent_width };

    // The cross size used for alignment slack (`remaining_cross` below) is bounded
    // against the node's own min/max, separately from `line_cross_dim` (which instead
    // accumulates into the node's final measured cross size at Step 9).
    let mut container_cross_axis = available_inner_cross;
    if matches!(measure_mode_cross, MeasureMode::Undefined | MeasureMode::AtMost) {
      container_cross_axis =
        bound_axis_within_min_and_max(&style, cross_axis, line_cross_dim + padding_border_cross, cross_axis_parent_size) - padding_border_cross;
      if measure_mode_cross == MeasureMode::AtMost {
        container_cross_axis = container_cross_axis.min(available_inner_cross);
      }
    }
    line_cross_dim =
      bound_axis_within_min_and_max(&style, cross_axis, line_cross_dim + padding_border_cross, cross_axis_parent_size) - padding_border_cross;

    // --- Step 7: cross-axis alignment within the line ---
    if perform_layout {
      let edge_for_cross = if is_main_axis_row { Edge::Top } else { Edge::Left };
      for child in &line_children {
        let child_style = tree.node(child.id).style.clone();
        if child_style.position_type == PositionType::Absolute {
          let offset = if is_leading_pos_defined(&child_style, cross_axis) {
            leading_position(&child_style, cross_axis, available_inner_cross) + leading_border(&style, cross_axis) + leading_margin(&child_style, cross_axis, available_inner_width)
          } else {
            leading_border(&style, cross_axis) + leading_margin(&child_style, cross_axis, available_inner_width)
          };
          tree.node_mut(child.id).layout.set_position(edge_for_cross, offset);
          continue;
        }

        let align = align_item(&style, child_style.align_self);
        let leading_margin_auto = leading_margin_is_auto(&child_style, cross_axis);
        let trailing_margin_auto = trailing_margin_is_auto(&child_style, cross_axis);
        let cross_dim_defined = child_style.resolved_dimension(axis_dimension(cross_axis)).is_defined();

        // The container's own leading padding/border on the cross axis applies to every
        // line; alignment then adds slack on top of it.
        let mut leading_cross = leading_padding_and_border(&style, cross_axis, available_inner_width);

        if align == Align::Stretch && !leading_margin_auto && !trailing_margin_auto && !cross_dim_defined {
          let (child_w, child_h, width_m, height_m) = if is_main_axis_row {
            (child.main_size, line_cross_dim, MeasureMode::Exactly, MeasureMode::Exactly)
          } else {
            (line_cross_dim, child.main_size, MeasureMode::Exactly, MeasureMode::Exactly)
          };
          layout_node_internal(tree, child.id, child_w, child_h, direction, width_m, height_m, available_inner_width, available_inner_height, true, "stretch");
        } else {
          let remaining_cross = container_cross_axis - child.cross_size - margin_for_axis(&child_style, cross_axis, available_inner_width);
          if leading_margin_auto && trailing_margin_auto {
            leading_cross += remaining_cross / 2.0;
          } else if trailing_margin_auto {
            // No-op: the trailing auto margin absorbs the slack.
          } else if leading_margin_auto {
            leading_cross += remaining_cross;
          } else {
            match align {
              Align::FlexStart | Align::Auto => {}
              Align::Center => leading_cross += remaining_cross / 2.0,
              _ => leading_cross += remaining_cross,
            }
          }
        }

        // The seed written in Step 3 already carries this child's own leading margin and
        // relative position; Step 7 only adds the line offset and alignment slack on top.
        let base = tree.node(child.id).layout.position(edge_for_cross);
        tree.node_mut(child.id).layout.set_position(edge_for_cross, base + total_line_cross_dim + leading_cross);
      }
    }

    // §4.3 baseline alignment for a single-line container is instead handled entirely by
    // Step 8 below, which always runs when `node_is_baseline_layout` is true.
    total_line_cross_dim += line_cross_dim;
  }

  // --- Step 9: final dimensions ---
  let overflow_scroll = style.overflow == crate::style::Overflow::Scroll;
  let measured_w = if is_main_axis_row {
    final_axis_dimension(&style, FlexDirection::Row, width_mode, available_width, margin_row, max_line_main_dim, overflow_scroll, available_inner_width, padding_border_row)
  } else {
    final_axis_dimension(&style, FlexDirection::Row, width_mode, available_width, margin_row, total_line_cross_dim, overflow_scroll, available_inner_width, padding_border_row)
  };
  let measured_h = if is_main_axis_row {
    final_axis_dimension(&style, FlexDirection::Column, height_mode, available_height, margin_column, total_line_cross_dim, overflow_scroll, available_inner_height, padding_border_column)
  } else {
    final_axis_dimension(&style, FlexDirection::Column, height_mode, available_height, margin_column, max_line_main_dim, overflow_scroll, available_inner_height, padding_border_column)
  };
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Width, measured_w);
  tree.node_mut(node).layout.set_measured_dimension(Dimension::Height, measured_h);

  // --- Step 10: wrap-reverse reflection ---
  if style.flex_wrap == FlexWrap::WrapReverse {
    let measured_cross = tree.node(node).layout.measured_dimension(axis_dimension(cross_axis));
    for &child in &relative_children {
      let edge = if is_main_axis_row { Edge::Top } else { Edge::Left };
      let child_cross = tree.node(child).layout.measured_dimension(axis_dimension(cross_axis));
      let pos = tree.node(child).layout.position(edge);
      tree.node_mut(child).layout.set_position(edge, measured_cross - pos - child_cross);
    }
  }

  // --- Step 8: multi-line align-content (applied after final sizing, as in the source) ---
  if perform_layout && (lines.len() > 1 || style.align_content == Align::Stretch || node_is_baseline_layout) && !available_inner_cross.is_nan() {
    distribute_align_content(
      tree,
      &lines,
      &style,
      cross_axis,
      direction,
      is_main_axis_row,
      available_inner_width,
      available_inner_height,
      available_inner_cross,
      total_line_cross_dim,
    );
  }

  // --- Step 11: absolute children + trailing positions ---
  if perform_layout {
    for &child in &absolute_children {
      layout_absolute_child(tree, node, child, direction, main_axis, cross_axis, is_main_axis_row, available_inner_width, available_inner_height);
    }

    if main_axis.is_reverse() || cross_axis.is_reverse() {
      for &child in &relative_children {
        if main_axis.is_reverse() {
          set_trailing(tree, node, child, main_axis, is_main_axis_row);
        }
        if cross_axis.is_reverse() {
          set_trailing(tree, node, child, cross_axis, is_main_axis_row);
        }
      }
    }
  }
}

fn padding_and_border_start(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  leading_padding_and_border(style, axis, width_size)
}

fn set_trailing(tree: &mut Tree, parent: NodeId, child: NodeId, axis: FlexDirection, is_main_axis_row: bool) {
  let parent_measured = tree.node(parent).layout.measured_dimension(axis_dimension(axis));
  let child_measured = tree.node(child).layout.measured_dimension(axis_dimension(axis));
  let edge = if axis.is_row() { Edge::Left } else { Edge::Top };
  let _ = is_main_axis_row;
  let leading = tree.node(child).layout.position(edge);
  tree.node_mut(child).layout.set_position(edge, parent_measured - child_measured - leading);
}

#[allow(clippy::too_many_arguments)]
fn final_axis_dimension(
  style: &Style,
  axis: FlexDirection,
  mode: MeasureMode,
  available: f32,
  margin: f32,
  content_size: f32,
  overflow_scroll: bool,
  available_inner: f32,
  padding_border: f32,
) -> f32 {
  match mode {
    MeasureMode::Exactly => available - margin,
    MeasureMode::AtMost if overflow_scroll => {
      bound_axis_within_min_and_max(style, axis, content_size, available_inner).min(available_inner + padding_border).max(padding_border)
    }
    _ => bound_axis(style, axis, content_size, available_inner, available_inner),
  }
}

fn zero_out_layout_recursively(tree: &mut Tree, node: NodeId) {
  {
    let layout = &mut tree.node_mut(node).layout;
    layout.set_position(Edge::Left, 0.0);
    layout.set_position(Edge::Top, 0.0);
    layout.set_position(Edge::Right, 0.0);
    layout.set_position(Edge::Bottom, 0.0);
    layout.set_dimension(Dimension::Width, 0.0);
    layout.set_dimension(Dimension::Height, 0.0);
    layout.set_measured_dimension(Dimension::Width, 0.0);
    layout.set_measured_dimension(Dimension::Height, 0.0);
  }
  let children = tree.node(node).children().to_vec();
  for child in children {
    zero_out_layout_recursively(tree, child);
  }
}

/// §4.9 Child flex basis computation.
#[allow(clippy::too_many_arguments)]
fn compute_flex_basis_for_child(
  tree: &mut Tree,
  child: NodeId,
  parent_style: &Style,
  main_axis: FlexDirection,
  is_main_axis_row: bool,
  direction: Direction,
  available_inner_width: f32,
  available_inner_height: f32,
  container_width_mode: MeasureMode,
  container_height_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
) -> f32 {
  let style = tree.node(child).style.clone();
  let main_parent_size = if is_main_axis_row { parent_width } else { parent_height };
  let padding_border = padding_and_border_for_axis(&style, main_axis, parent_width);

  let resolved_basis = resolve(style.flex_basis, main_parent_size);
  let web_flex_basis = tree.context.is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis);
  let generation_stale = tree.node(child).layout.computed_flex_basis_generation != tree.context.generation();

  if !resolved_basis.is_nan() && !main_parent_size.is_nan() && (generation_stale || web_flex_basis) {
    tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
    tree.node_mut(child).layout.computed_flex_basis = resolved_basis.max(padding_border);
    return tree.node(child).layout.computed_flex_basis;
  }

  let is_row_style_dim_defined = is_style_dim_defined(&style, Dimension::Width, parent_width);
  let is_column_style_dim_defined = is_style_dim_defined(&style, Dimension::Height, parent_height);

  if is_main_axis_row && is_row_style_dim_defined {
    let resolved = resolve(style.resolved_dimension(Dimension::Width), parent_width);
    let basis = resolved.max(padding_and_border_for_axis(&style, FlexDirection::Row, parent_width));
    tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
    tree.node_mut(child).layout.computed_flex_basis = basis;
    return basis;
  }
  if !is_main_axis_row && is_column_style_dim_defined {
    let resolved = resolve(style.resolved_dimension(Dimension::Height), parent_height);
    let basis = resolved.max(padding_and_border_for_axis(&style, FlexDirection::Column, parent_width));
    tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
    tree.node_mut(child).layout.computed_flex_basis = basis;
    return basis;
  }

  let main_dim = axis_dimension(main_axis);
  let mut child_width = f32::NAN;
  let mut child_height = f32::NAN;
  let mut child_width_mode = MeasureMode::Undefined;
  let mut child_height_mode = MeasureMode::Undefined;

  let margin_row = margin_for_axis(&style, FlexDirection::Row, parent_width);
  let margin_column = margin_for_axis(&style, FlexDirection::Column, parent_width);

  if is_row_style_dim_defined {
    child_width = resolve(style.resolved_dimension(Dimension::Width), parent_width) + margin_row;
    child_width_mode = MeasureMode::Exactly;
  }
  if is_column_style_dim_defined {
    child_height = resolve(style.resolved_dimension(Dimension::Height), parent_height) + margin_column;
    child_height_mode = MeasureMode::Exactly;
  }

  // The W3C spec doesn't say anything about the 'overflow' property, but all major
  // browsers appear to implement the following logic.
  let width_overflow_guard = style.overflow != crate::style::Overflow::Scroll || !is_main_axis_row;
  if width_overflow_guard && child_width_mode == MeasureMode::Undefined && !available_inner_width.is_nan() {
    child_width = available_inner_width;
    child_width_mode = MeasureMode::AtMost;
  }
  let height_overflow_guard = style.overflow != crate::style::Overflow::Scroll || is_main_axis_row;
  if height_overflow_guard && child_height_mode == MeasureMode::Undefined && !available_inner_height.is_nan() {
    child_height = available_inner_height;
    child_height_mode = MeasureMode::AtMost;
  }

  // If the child has no defined size in the cross axis and is set to stretch, measure
  // that axis exactly against the parent's available inner size.
  if !is_main_axis_row
    && !available_inner_width.is_nan()
    && !is_row_style_dim_defined
    && container_width_mode == MeasureMode::Exactly
    && align_item(parent_style, style.align_self) == Align::Stretch
  {
    child_width = available_inner_width;
    child_width_mode = MeasureMode::Exactly;
  }
  if is_main_axis_row
    && !available_inner_height.is_nan()
    && !is_column_style_dim_defined
    && container_height_mode == MeasureMode::Exactly
    && align_item(parent_style, style.align_self) == Align::Stretch
  {
    child_height = available_inner_height;
    child_height_mode = MeasureMode::Exactly;
  }

  if style.has_aspect_ratio() {
    if !is_main_axis_row && child_width_mode == MeasureMode::Exactly {
      let basis = ((child_width - margin_row) / style.aspect_ratio).max(padding_and_border_for_axis(&style, FlexDirection::Column, parent_width));
      tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
      tree.node_mut(child).layout.computed_flex_basis = basis;
      return basis;
    } else if is_main_axis_row && child_height_mode == MeasureMode::Exactly {
      let basis = ((child_height - margin_column) * style.aspect_ratio).max(padding_and_border_for_axis(&style, FlexDirection::Row, parent_width));
      tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
      tree.node_mut(child).layout.computed_flex_basis = basis;
      return basis;
    }
  }

  constrain_max_size_for_mode(resolve(style.max_dimension(Dimension::Width), parent_width), &mut child_width_mode, &mut child_width);
  constrain_max_size_for_mode(resolve(style.max_dimension(Dimension::Height), parent_height), &mut child_height_mode, &mut child_height);

  layout_node_internal(
    tree,
    child,
    child_width,
    child_height,
    direction,
    child_width_mode,
    child_height_mode,
    parent_width,
    parent_height,
    false,
    "measure",
  );

  let measured_main = tree.node(child).layout.measured_dimension(main_dim);
  let basis = measured_main.max(padding_border);
  tree.node_mut(child).layout.computed_flex_basis_generation = tree.context.generation();
  tree.node_mut(child).layout.computed_flex_basis = basis;
  basis
}

/// `RYGConstrainMaxSizeForMode`: clamps `size` to `max_size` without letting an
/// `Undefined` mode's size grow past it either, except that an `Undefined` mode is
/// promoted to `AtMost` only when `max_size` is itself defined.
fn constrain_max_size_for_mode(max_size: f32, mode: &mut MeasureMode, size: &mut f32) {
  match *mode {
    MeasureMode::Exactly | MeasureMode::AtMost => {
      if !max_size.is_nan() && *size > max_size {
        *size = max_size;
      }
    }
    MeasureMode::Undefined => {
      if !max_size.is_nan() {
        *mode = MeasureMode::AtMost;
        *size = max_size;
      }
    }
  }
}

/// §4.10 absolute-child layout.
#[allow(clippy::too_many_arguments)]
fn layout_absolute_child(
  tree: &mut Tree,
  parent: NodeId,
  child: NodeId,
  direction: Direction,
  main_axis: FlexDirection,
  cross_axis: FlexDirection,
  is_main_axis_row: bool,
  available_inner_width: f32,
  available_inner_height: f32,
) {
  let style = tree.node(child).style.clone();
  let parent_style = tree.node(parent).style.clone();

  let mut child_width = f32::NAN;
  let mut child_height = f32::NAN;

  if is_style_dim_defined(&style, Dimension::Width, available_inner_width) {
    child_width = resolve(style.resolved_dimension(Dimension::Width), available_inner_width);
  } else if is_leading_pos_defined(&style, FlexDirection::Row) && is_trailing_pos_defined(&style, FlexDirection::Row) {
    let parent_w = tree.node(parent).layout.measured_dimension(Dimension::Width);
    child_width = parent_w - leading_border(&parent_style, FlexDirection::Row) - trailing_border(&parent_style, FlexDirection::Row)
      - leading_position(&style, FlexDirection::Row, available_inner_width)
      - trailing_position(&style, FlexDirection::Row, available_inner_width);
  }

  if is_style_dim_defined(&style, Dimension::Height, available_inner_height) {
    child_height = resolve(style.resolved_dimension(Dimension::Height), available_inner_height);
  } else if is_leading_pos_defined(&style, FlexDirection::Column) && is_trailing_pos_defined(&style, FlexDirection::Column) {
    let parent_h = tree.node(parent).layout.measured_dimension(Dimension::Height);
    child_height = parent_h - leading_border(&parent_style, FlexDirection::Column) - trailing_border(&parent_style, FlexDirection::Column)
      - leading_position(&style, FlexDirection::Column, available_inner_height)
      - trailing_position(&style, FlexDirection::Column, available_inner_height);
  }

  if style.has_aspect_ratio() {
    if child_width.is_nan() && !child_height.is_nan() {
      child_width = child_height * style.aspect_ratio;
    } else if child_height.is_nan() && !child_width.is_nan() {
      child_height = child_width / style.aspect_ratio;
    }
  }

  if child_width.is_nan() || child_height.is_nan() {
    let width_mode = if child_width.is_nan() { MeasureMode::Undefined } else { MeasureMode::Exactly };
    let height_mode = if child_height.is_nan() { MeasureMode::Undefined } else { MeasureMode::Exactly };
    let avail_w = if child_width.is_nan() { available_inner_width } else { child_width };
    let avail_h = if child_height.is_nan() { available_inner_height } else { child_height };
    layout_node_internal(tree, child, avail_w, avail_h, direction, width_mode, height_mode, avail_w, avail_h, false, "abs-measure");
    if child_width.is_nan() {
      child_width = tree.node(child).layout.measured_dimension(Dimension::Width);
    }
    if child_height.is_nan() {
      child_height = tree.node(child).layout.measured_dimension(Dimension::Height);
    }
  }

  layout_node_internal(
    tree,
    child,
    child_width,
    child_height,
    direction,
    MeasureMode::Exactly,
    MeasureMode::Exactly,
    child_width,
    child_height,
    true,
    "abs-final",
  );

  let parent_w = tree.node(parent).layout.measured_dimension(Dimension::Width);
  let parent_h = tree.node(parent).layout.measured_dimension(Dimension::Height);

  if is_trailing_pos_defined(&style, FlexDirection::Row) && !is_leading_pos_defined(&style, FlexDirection::Row) {
    let pos = parent_w - child_width - trailing_border(&parent_style, FlexDirection::Row) - trailing_position(&style, FlexDirection::Row, available_inner_width);
    tree.node_mut(child).layout.set_position(Edge::Left, pos);
  } else if !is_leading_pos_defined(&style, FlexDirection::Row) && is_main_axis_row && parent_style.justify_content == JustifyContent::Center {
    tree.node_mut(child).layout.set_position(Edge::Left, (parent_w - child_width) / 2.0);
  } else if !is_leading_pos_defined(&style, FlexDirection::Row) && is_main_axis_row && parent_style.justify_content == JustifyContent::FlexEnd {
    tree.node_mut(child).layout.set_position(Edge::Left, parent_w - child_width);
  }

  if is_trailing_pos_defined(&style, FlexDirection::Column) && !is_leading_pos_defined(&style, FlexDirection::Column) {
    let pos = parent_h - child_height - trailing_border(&parent_style, FlexDirection::Column) - trailing_position(&style, FlexDirection::Column, available_inner_height);
    tree.node_mut(child).layout.set_position(Edge::Top, pos);
  } else if !is_leading_pos_defined(&style, FlexDirection::Column) && align_item(&parent_style, style.align_self) == Align::Center {
    tree.node_mut(child).layout.set_position(Edge::Top, (parent_h - child_height) / 2.0);
  } else if !is_leading_pos_defined(&style, FlexDirection::Column) && align_item(&parent_style, style.align_self) == Align::FlexEnd {
    tree.node_mut(child).layout.set_position(Edge::Top, parent_h - child_height);
  }

  let _ = cross_axis;
}

/// §4.5 Step 8: distribute remaining cross-axis space across lines per `align_content`,
/// then re-derive each line's own height (max child cross extent, or baseline ascent +
/// descent for baseline-aligned children) and position each child against it. Mirrors
/// `original_source/Yoga.c`'s multi-line content alignment block, including the
/// `RYGAlignStretch` child re-measure: a child that didn't declare its own cross
/// dimension is re-laid-out at the line's (possibly grown) height.
#[allow(clippy::too_many_arguments)]
fn distribute_align_content(
  tree: &mut Tree,
  lines: &[Vec<NodeId>],
  style: &Style,
  cross_axis: FlexDirection,
  direction: Direction,
  is_main_axis_row: bool,
  available_inner_width: f32,
  available_inner_height: f32,
  available_inner_cross: f32,
  total_line_cross_dim: f32,
) {
  let remaining = available_inner_cross - total_line_cross_dim;
  let line_count = lines.len().max(1);

  let mut cross_dim_lead = 0.0f32;
  let mut current_lead = leading_padding_and_border(style, cross_axis, available_inner_width);

  match style.align_content {
    Align::FlexEnd => current_lead += remaining,
    Align::Center => current_lead += remaining / 2.0,
    Align::Stretch => {
      if available_inner_cross > total_line_cross_dim {
        cross_dim_lead = remaining / line_count as f32;
      }
    }
    Align::SpaceAround => {
      if available_inner_cross > total_line_cross_dim {
        current_lead += remaining / (2.0 * line_count as f32);
        if line_count > 1 {
          cross_dim_lead = remaining / line_count as f32;
        }
      } else {
        current_lead += remaining / 2.0;
      }
    }
    Align::SpaceBetween => {
      if available_inner_cross > total_line_cross_dim && line_count > 1 {
        cross_dim_lead = remaining / (line_count - 1) as f32;
      }
    }
    Align::Auto | Align::FlexStart | Align::Baseline => {}
  }

  for line in lines {
    let mut line_height = 0.0f32;
    let mut max_ascent = 0.0f32;
    let mut max_descent = 0.0f32;

    for &child in line {
      let child_style = tree.node(child).style.clone();
      if child_style.display == Display::None || child_style.position_type != PositionType::Relative {
        continue;
      }
      if is_layout_dim_defined(tree, child, axis_dimension(cross_axis)) {
        let measured = tree.node(child).layout.measured_dimension(axis_dimension(cross_axis));
        line_height = line_height.max(measured + margin_for_axis(&child_style, cross_axis, available_inner_width));
      }
      if align_item(style, child_style.align_self) == Align::Baseline {
        let ascent = baseline(tree, child) + leading_margin(&child_style, FlexDirection::Column, available_inner_width);
        let descent =
          tree.node(child).layout.measured_dimension(Dimension::Height) + margin_for_axis(&child_style, FlexDirection::Column, available_inner_width) - ascent;
        max_ascent = max_ascent.max(ascent);
        max_descent = max_descent.max(descent);
        line_height = line_height.max(max_ascent + max_descent);
      }
    }
    line_height += cross_dim_lead;

    for &child in line {
      let child_style = tree.node(child).style.clone();
      if child_style.display == Display::None || child_style.position_type != PositionType::Relative {
        continue;
      }
      let edge = if is_main_axis_row { Edge::Top } else { Edge::Left };
      match align_item(style, child_style.align_self) {
        Align::FlexStart | Align::Auto => {
          let pos = current_lead + leading_margin(&child_style, cross_axis, available_inner_width);
          tree.node_mut(child).layout.set_position(edge, pos);
        }
        Align::FlexEnd => {
          let measured = tree.node(child).layout.measured_dimension(axis_dimension(cross_axis));
          let pos = current_lead + line_height - trailing_margin(&child_style, cross_axis, available_inner_width) - measured;
          tree.node_mut(child).layout.set_position(edge, pos);
        }
        Align::Center => {
          let measured = tree.node(child).layout.measured_dimension(axis_dimension(cross_axis));
          let pos = current_lead + (line_height - measured) / 2.0;
          tree.node_mut(child).layout.set_position(edge, pos);
        }
        Align::Stretch => {
          let pos = current_lead + leading_margin(&child_style, cross_axis, available_inner_width);
          tree.node_mut(child).layout.set_position(edge, pos);

          if !is_style_dim_defined(&child_style, axis_dimension(cross_axis), available_inner_cross) {
            let measured_w = tree.node(child).layout.measured_dimension(Dimension::Width);
            let measured_h = tree.node(child).layout.measured_dimension(Dimension::Height);
            let child_w = if is_main_axis_row { measured_w + margin_for_axis(&child_style, cross_axis, available_inner_width) } else { line_height };
            let child_h = if !is_main_axis_row { measured_h + margin_for_axis(&child_style, cross_axis, available_inner_width) } else { line_height };

            if !crate::cache::floats_equal(child_w, measured_w) || !crate::cache::floats_equal(child_h, measured_h) {
              layout_node_internal(
                tree,
                child,
                child_w,
                child_h,
                direction,
                MeasureMode::Exactly,
                MeasureMode::Exactly,
                available_inner_width,
                available_inner_height,
                true,
                "stretch",
              );
            }
          }
        }
        Align::Baseline => {
          let pos = current_lead + max_ascent - baseline(tree, child) + leading_position(&child_style, FlexDirection::Column, available_inner_cross);
          tree.node_mut(child).layout.set_position(Edge::Top, pos);
        }
        Align::SpaceBetween | Align::SpaceAround => {}
      }
    }

    current_lead += line_height;
  }
}
