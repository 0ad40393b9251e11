//! Pie chart data derived from statistics, plus the geometry the canvas
//! renderer and hover tooltip need.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::stats::Statistics;

pub const GENERATED_COLOR: &str = "#FFD700";
pub const SAVED_COLOR: &str = "#FF4500";

/// Canvas angle of 12 o'clock; arcs run clockwise from here.
pub const START_ANGLE: f64 = -FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u64,
    pub color: &'static str,
}

impl ChartSlice {
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

pub fn to_chart_slices(stats: &Statistics) -> [ChartSlice; 2] {
    [
        ChartSlice {
            label: "Generated",
            value: stats.generated,
            color: GENERATED_COLOR,
        },
        ChartSlice {
            label: "Saved",
            value: stats.saved,
            color: SAVED_COLOR,
        },
    ]
}

/// Angular span of one slice, in canvas radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieArc {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl PieArc {
    fn covers(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }
}

/// Zero-valued slices get no arc. All zeros yields no arcs at all.
pub fn pie_arcs(slices: &[ChartSlice]) -> Vec<PieArc> {
    let total: f64 = slices.iter().map(|s| s.value as f64).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = START_ANGLE;
    let mut arcs = Vec::with_capacity(slices.len());
    for (index, slice) in slices.iter().enumerate() {
        if slice.value == 0 {
            continue;
        }
        let end = start + TAU * (slice.value as f64 / total);
        arcs.push(PieArc { index, start, end });
        start = end;
    }
    // float drift; the last arc closes the circle exactly
    if let Some(last) = arcs.last_mut() {
        last.end = START_ANGLE + TAU;
    }
    arcs
}

/// Index of the slice under `point`, if it lies inside the pie.
pub fn slice_at(arcs: &[PieArc], center: (f64, f64), radius: f64, point: (f64, f64)) -> Option<usize> {
    let dx = point.0 - center.0;
    let dy = point.1 - center.1;
    if dx * dx + dy * dy > radius * radius {
        return None;
    }
    // canvas y grows downward, so atan2 already measures clockwise
    let angle = START_ANGLE + (dy.atan2(dx) - START_ANGLE).rem_euclid(TAU);
    arcs.iter().find(|arc| arc.covers(angle)).map(|arc| arc.index)
}
