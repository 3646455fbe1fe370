//! Grid inference from absolutely positioned rectangles
//!
//! Used when components move from free placement into a grid: given only
//! their pixel bounds, derive a small set of grid lines ("axes") per
//! dimension and express every rectangle as a cell range plus residual
//! insets against those lines.
//!
//! The search is a greedy heuristic, applied independently per dimension:
//!
//! 1. Seed one axis per trailing edge, except the outermost edge which the
//!    container boundary replaces.
//! 2. For each axis in turn, move it to another rectangle's leading or
//!    trailing edge (strictly between its neighbours) whenever that
//!    strictly lowers the number of rectangles it cuts through. Rectangles
//!    are tried in input order, so ties go to the earliest one.
//! 3. Drop duplicate axes, then every axis that no rectangle ends on and no
//!    rectangle fits under. An axis a trailing edge lands on always stays, so
//!    input already aligned to the grid keeps every one of its lines.
//! 4. Bound the result by `0` and the container extent.
//!
//! Every stage is a single bounded pass over the axes, so inference always
//! terminates in `O(axes × rectangles²)`.

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::constraints::{Constraint, Fill};
use super::engine::KoalaLayout;
use super::error::LayoutError;
use super::types::{Insets, Rect, Size};

/// A rectangle whose grid placement should be inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceItem {
    /// Current on-screen bounds
    pub bounds: Rect,
    /// The component's natural size, used to record the size delta as pad
    pub preferred: Size,
}

impl InferenceItem {
    pub fn new(bounds: Rect, preferred: Size) -> Self {
        Self { bounds, preferred }
    }
}

/// Sorted, duplicate-free grid lines along one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSet(Vec<i32>);

impl AxisSet {
    pub fn lines(&self) -> &[i32] {
        &self.0
    }

    /// Number of cells between the lines
    pub fn cells(&self) -> u32 {
        self.0.len().saturating_sub(1) as u32
    }
}

/// Result of [`infer_grid`]
#[derive(Debug, Clone, PartialEq)]
pub struct InferredGrid {
    pub axes_x: AxisSet,
    pub axes_y: AxisSet,
    /// One constraint per input rectangle, in input order
    pub constraints: Vec<Constraint>,
}

impl InferredGrid {
    pub fn columns(&self) -> u32 {
        self.axes_x.cells()
    }

    pub fn rows(&self) -> u32 {
        self.axes_y.cells()
    }

    /// Build a layout whose grid matches the inferred axes, assigning the
    /// constraints to `keys` in order
    pub fn into_layout<K, I>(self, keys: I) -> Result<KoalaLayout<K>, LayoutError>
    where
        K: Eq + Hash + Clone,
        I: IntoIterator<Item = K>,
    {
        let mut layout = KoalaLayout::new(self.columns(), self.rows())?;
        for (key, constraint) in keys.into_iter().zip(self.constraints) {
            layout.set_constraints(key, constraint);
        }
        Ok(layout)
    }
}

/// A rectangle projected onto one dimension
#[derive(Debug, Clone, Copy)]
struct Interval {
    start: i32,
    end: i32,
}

/// Where an interval lands among the final axes
#[derive(Debug, Default)]
struct Cover {
    cell: u32,
    span: u32,
    lead: i32,
    trail: i32,
}

/// Leading sentinel kept at index 0 while axes are being searched
const FLOOR: i32 = i32::MIN;

/// Derive grid lines and per-rectangle constraints from pixel bounds
#[tracing::instrument(skip(items), fields(count = items.len()))]
pub fn infer_grid(items: &[InferenceItem], container: Size) -> InferredGrid {
    let horizontal: Vec<Interval> = items
        .iter()
        .map(|item| Interval {
            start: item.bounds.x,
            end: item.bounds.right(),
        })
        .collect();
    let vertical: Vec<Interval> = items
        .iter()
        .map(|item| Interval {
            start: item.bounds.y,
            end: item.bounds.bottom(),
        })
        .collect();

    let axes_x = derive_axes(&horizontal, container.width);
    let axes_y = derive_axes(&vertical, container.height);
    debug!(
        columns = axes_x.cells(),
        rows = axes_y.cells(),
        "inferred grid"
    );

    let constraints = items
        .iter()
        .zip(horizontal.iter().zip(&vertical))
        .map(|(item, (h, v))| {
            let x = cover(*h, axes_x.lines());
            let y = cover(*v, axes_y.lines());
            Constraint::cell(x.cell, y.cell, x.span, y.span)
                .with_fill(Fill::Both)
                .with_insets(Insets::new(y.lead, x.lead, y.trail, x.trail))
                .with_pad(
                    size_delta(item.bounds.width, item.preferred.width),
                    size_delta(item.bounds.height, item.preferred.height),
                )
        })
        .collect();

    InferredGrid {
        axes_x,
        axes_y,
        constraints,
    }
}

/// On-screen extent minus natural extent; nothing for collapsed components
fn size_delta(current: i32, preferred: i32) -> i32 {
    if current > 0 {
        current - preferred
    } else {
        0
    }
}

fn derive_axes(spans: &[Interval], extent: i32) -> AxisSet {
    let mut lines = vec![0];
    lines.extend(
        interior_axes(spans)
            .into_iter()
            .filter(|&line| line > 0 && line < extent),
    );
    lines.push(extent.max(0));
    AxisSet(lines)
}

/// Axes strictly inside the container, sorted
fn interior_axes(spans: &[Interval]) -> Vec<i32> {
    if spans.len() < 2 {
        return Vec::new();
    }
    let min = spans.iter().map(|s| s.start).min().unwrap_or(0);
    let max = spans.iter().map(|s| s.end).max().unwrap_or(0);
    let leading = spans.iter().position(|s| s.start == min).unwrap_or(0);

    let mut axes = vec![FLOOR];
    axes.extend(spans.iter().map(|s| s.end).filter(|&end| end != max));
    axes.sort_unstable();
    trace!(?axes, "seeded axes");

    shift_axes(&mut axes, spans, leading, min, max);

    axes.sort_unstable();
    axes.dedup();
    remove_redundant(&mut axes, spans);

    if axes.len() > 1 && axes.last() == Some(&max) {
        axes.pop();
    }
    axes.remove(0);
    axes
}

/// Number of intervals that strictly straddle `line`
fn crossings(spans: &[Interval], line: i32) -> usize {
    spans
        .iter()
        .filter(|s| s.start < line && s.end > line)
        .count()
}

fn shift_axes(axes: &mut [i32], spans: &[Interval], leading: usize, min: i32, max: i32) {
    for i in 1..axes.len() {
        let upper = axes.get(i + 1).copied().unwrap_or(max);
        let mut crossed = crossings(spans, axes[i]);
        for (j, span) in spans.iter().enumerate() {
            if j == leading {
                continue;
            }
            let start = span.start;
            if start < axes[i] && start > axes[i - 1] && start != min {
                let candidate = crossings(spans, start);
                if crossed > candidate {
                    trace!(from = axes[i], to = start, "shifting axis to leading edge");
                    axes[i] = start;
                    crossed = candidate;
                }
            }
            let end = span.end;
            if end > axes[i] && end < upper {
                let candidate = crossings(spans, end);
                if crossed > candidate {
                    trace!(from = axes[i], to = end, "shifting axis to trailing edge");
                    axes[i] = end;
                    crossed = candidate;
                }
            }
        }
    }
}

/// Drop every axis that no interval ends on and no interval fits under
/// between it and the previous axis
fn remove_redundant(axes: &mut Vec<i32>, spans: &[Interval]) {
    let mut previous = axes[0];
    let mut keep = vec![true; axes.len()];
    for (i, &line) in axes.iter().enumerate().skip(1) {
        keep[i] = spans.iter().any(|s| {
            s.end == line || (s.start < line && s.start >= previous && s.end <= line)
        });
        if !keep[i] {
            trace!(axis = line, "dropping unsupported axis");
        }
        previous = line;
    }
    let mut flags = keep.into_iter();
    axes.retain(|_| flags.next().unwrap_or(true));
}

/// Locate an interval among the final axes
fn cover(span: Interval, axes: &[i32]) -> Cover {
    let mut found = Cover {
        span: 1,
        ..Cover::default()
    };
    for j in 1..axes.len() {
        let (low, high) = (axes[j - 1], axes[j]);
        if span.start < high && span.start >= low {
            found.cell = (j - 1) as u32;
            found.lead = span.start - low;
        }
        if span.end <= high && span.end > low {
            found.span = j as u32 - found.cell;
            found.trail = high - span.end;
        }
    }
    found
}
