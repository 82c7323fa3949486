//! Log-scale axis helpers shared by the static and interactive charts.

/// Fraction of the data span added on each side of the axis (in log space).
const AXIS_MARGIN: f64 = 0.05;
/// Half-width in decades used when every value is the same.
const SINGLE_VALUE_PAD: f64 = 0.5;

/// Base-10 y-axis: range in exponents plus ticks at the observed values.
#[derive(Debug, Clone, PartialEq)]
pub struct LogAxis {
    pub min_exp: f64,
    pub max_exp: f64,
    /// Distinct positive values, ascending.
    pub ticks: Vec<f64>,
}

impl LogAxis {
    /// Build the axis for a set of values. Non-positive values are left out.
    pub fn from_values(values: &[f64]) -> Self {
        let mut ticks: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| is_plottable(v))
            .collect();
        ticks.sort_by(|a, b| a.total_cmp(b));
        ticks.dedup();

        let (min_exp, max_exp) = match (ticks.first(), ticks.last()) {
            (Some(&lo), Some(&hi)) => {
                let (lo, hi) = (lo.log10(), hi.log10());
                let span = hi - lo;
                if span <= f64::EPSILON {
                    (lo - SINGLE_VALUE_PAD, hi + SINGLE_VALUE_PAD)
                } else {
                    (lo - span * AXIS_MARGIN, hi + span * AXIS_MARGIN)
                }
            }
            _ => (-1.0, 0.0),
        };

        Self {
            min_exp,
            max_exp,
            ticks,
        }
    }

    pub fn min_value(&self) -> f64 {
        10f64.powf(self.min_exp)
    }

    pub fn max_value(&self) -> f64 {
        10f64.powf(self.max_exp)
    }
}

/// Points that can be drawn on a log axis, as `(category index, value)`.
pub fn plottable_points(values: &[f64]) -> Vec<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| is_plottable(v))
        .collect()
}

/// Consecutive plottable points. A value that can't be drawn ends the current run.
pub fn plottable_runs(values: &[f64]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (idx, &value) in values.iter().enumerate() {
        if is_plottable(value) {
            current.push((idx, value));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Number of values left off a log axis.
pub fn unplottable_count(values: &[f64]) -> usize {
    values.iter().filter(|&&v| !is_plottable(v)).count()
}

/// Only finite, strictly positive values have a position on a log axis.
pub fn is_plottable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Format a tick value like printf `%g`: 6 significant digits, trailing zeros
/// removed, scientific notation when the exponent is below -4 or at least 6.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    // The exponent after rounding to 6 significant digits decides the style
    let scientific = format!("{:.5e}", value);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return scientific;
    };

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        return trim_zeros(&format!("{:.*}", decimals, value)).to_string();
    }

    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_covers_values_with_margin() {
        let axis = LogAxis::from_values(&[0.012, 0.018, 0.031]);
        assert!(axis.min_value() < 0.012);
        assert!(axis.max_value() > 0.031);

        let span = 0.031f64.log10() - 0.012f64.log10();
        assert!((axis.min_exp - (0.012f64.log10() - span * 0.05)).abs() < 1e-12);
        assert!((axis.max_exp - (0.031f64.log10() + span * 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_ticks_are_the_observed_values_sorted() {
        let axis = LogAxis::from_values(&[0.031, 0.012, 0.018, 0.012]);
        assert_eq!(axis.ticks, vec![0.012, 0.018, 0.031]);
    }

    #[test]
    fn test_single_value_gets_half_a_decade() {
        let axis = LogAxis::from_values(&[0.5]);
        assert_eq!(axis.ticks, vec![0.5]);
        assert!((axis.min_exp - (0.5f64.log10() - 0.5)).abs() < 1e-12);
        assert!((axis.max_exp - (0.5f64.log10() + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_values_use_fallback_range() {
        let axis = LogAxis::from_values(&[]);
        assert!(axis.ticks.is_empty());
        assert_eq!((axis.min_exp, axis.max_exp), (-1.0, 0.0));
    }

    #[test]
    fn test_non_positive_values_are_excluded() {
        let axis = LogAxis::from_values(&[0.0, -2.0, 0.1, 1.0]);
        assert_eq!(axis.ticks, vec![0.1, 1.0]);

        let points = plottable_points(&[0.0, 0.1, -1.0, 1.0]);
        assert_eq!(points, vec![(1, 0.1), (3, 1.0)]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.012), "0.012");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(3.0), "3");
        assert_eq!(format_tick(1234.5), "1234.5");
        assert_eq!(format_tick(0.123456789), "0.123457");
        assert_eq!(format_tick(0.0001), "0.0001");
        assert_eq!(format_tick(0.00001), "1e-05");
        assert_eq!(format_tick(25_000_000.0), "2.5e+07");
        assert_eq!(format_tick(123456.0), "123456");
    }

    #[test]
    fn test_format_tick_rounds_before_choosing_notation() {
        assert_eq!(format_tick(999999.7), "1e+06");
        assert_eq!(format_tick(1.5e100), "1.5e+100");
    }

    #[test]
    fn test_runs_break_at_unplottable_values() {
        let runs = plottable_runs(&[1.0, 0.0, 2.0, 3.0, -1.0]);
        assert_eq!(runs, vec![vec![(0, 1.0)], vec![(2, 2.0), (3, 3.0)]]);
        assert!(plottable_runs(&[0.0, -1.0]).is_empty());
        assert_eq!(plottable_runs(&[1.0, 2.0]), vec![vec![(0, 1.0), (1, 2.0)]]);
    }

    #[test]
    fn test_unplottable_count() {
        assert_eq!(unplottable_count(&[1.0, 0.0, -3.0, f64::NAN, 2.0]), 3);
        assert_eq!(unplottable_count(&[0.5]), 0);
    }
}
