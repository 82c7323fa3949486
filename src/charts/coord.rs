//! plotters coordinates for the benchmark chart.
//!
//! Both wrap a stock coordinate for mapping and only replace the key points,
//! so the mesh labels land on the categories and on the measured values.

use plotters::coord::combinators::LogCoord;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::IntoLogRange;
use std::ops::Range;

/// Categorical x-axis: category `i` sits at `i`, with half a slot of room on either side.
pub struct CategoryCoord {
    inner: RangedCoordf64,
    count: usize,
}

impl CategoryCoord {
    pub fn new(count: usize) -> Self {
        let end = count.max(1) as f64 - 0.5;
        Self {
            inner: (-0.5..end).into(),
            count,
        }
    }
}

impl Ranged for CategoryCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        (0..self.count).map(|i| i as f64).collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

/// Log10 y-axis whose ticks are exactly the given values.
pub struct ObservedLogCoord {
    inner: LogCoord<f64>,
    ticks: Vec<f64>,
}

impl ObservedLogCoord {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: range.log_scale().into(),
            ticks,
        }
    }
}

impl Ranged for ObservedLogCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}
