//! Scales, quantiles, ticks and number formatting used by the renderers.

/// Linear interpolation between order statistics (the R-7 definition).
/// `sorted` must be ascending.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let (first, last) = (sorted.first()?, sorted.last()?);
    if p <= 0.0 || sorted.len() == 1 {
        return Some(*first);
    }
    if p >= 1.0 {
        return Some(*last);
    }

    let position = (sorted.len() - 1) as f64 * p;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = position.floor() as usize;
    let low = sorted[lower];
    let high = sorted[(lower + 1).min(sorted.len() - 1)];
    Some((high - low).mul_add(position - lower as f64, low))
}

/// Sorts a copy of `values` (ignoring NaN) and returns the `p` quantile.
pub fn quantile_unsorted(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    quantile(&sorted, p)
}

/// Square-root scale anchored at zero: `domain [0, max] -> range [0, radius]`.
///
/// Negative and NaN inputs map to zero, so radii are never negative. Values
/// above `max` are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    max: f64,
    radius: f64,
}

impl SqrtScale {
    pub const fn new(max: f64, radius: f64) -> Self {
        Self { max, radius }
    }

    /// Fits the domain to the `p` quantile of `values`.
    pub fn fitted(values: &[f64], p: f64, radius: f64) -> Self {
        let max = quantile_unsorted(values, p).unwrap_or(0.0).max(0.0);
        Self::new(max, radius)
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.max <= 0.0 || value.is_nan() || value <= 0.0 {
            return 0.0;
        }
        value.sqrt() / self.max.sqrt() * self.radius
    }

    pub const fn domain_max(&self) -> f64 {
        self.max
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(0.0, self.max, count)
    }
}

/// "Nice" ticks between `start` and `stop`: multiples of 1, 2 or 5 × 10^k.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return if (stop - start).abs() < f64::EPSILON && count > 0 {
            vec![start]
        } else {
            Vec::new()
        };
    }

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Work in integer multiples of the increment to avoid drift.
    let (increment, inverted) = if power < 0.0 {
        (10_f64.powf(-power) / factor, true)
    } else {
        (10_f64.powf(power) * factor, false)
    };
    let to_index = |value: f64| {
        if inverted {
            value * increment
        } else {
            value / increment
        }
    };
    let from_index = |index: f64| {
        if inverted {
            index / increment
        } else {
            index * increment
        }
    };

    let mut first = to_index(start).round();
    let mut last = to_index(stop).round();
    if from_index(first) < start {
        first += 1.0;
    }
    if from_index(last) > stop {
        last -= 1.0;
    }

    let mut values = Vec::new();
    let mut index = first;
    while index <= last {
        values.push(from_index(index));
        index += 1.0;
    }
    values
}

fn group_thousands(integer: &str) -> String {
    let (sign, digits) = integer
        .strip_prefix('-')
        .map_or(("", integer), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Whole count with thousands separators: `12345.0 -> "12,345"`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    group_thousands(&format!("{:.0}", value.round()))
}

/// Axis label for a tick `step` apart from its neighbours: whole steps read
/// as counts, fractional steps keep the decimals they need (`0.5 -> "0.5"`).
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return format_count(value);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let text = format!("{value:.decimals$}");
    match text.split_once('.') {
        Some((integer, fraction)) => format!("{}.{fraction}", group_thousands(integer)),
        None => group_thousands(&text),
    }
}

/// Two significant digits with thousands separators: `1234 -> "1,200"`,
/// `5 -> "5.0"`.
pub fn format_significant(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    let unit = 10_f64.powi(magnitude - 1);
    let rounded = (value / unit).round() * unit;
    #[allow(clippy::cast_sign_loss)]
    let decimals = (1 - magnitude).max(0) as usize;

    let text = format!("{rounded:.decimals$}");
    match text.split_once('.') {
        Some((integer, fraction)) => format!("{}.{fraction}", group_thousands(integer)),
        None => group_thousands(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() -> Result<(), Box<dyn std::error::Error>> {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_close(quantile(&values, 0.5).ok_or("median")?, 2.5);
        assert_close(quantile(&values, 0.0).ok_or("minimum")?, 1.0);
        assert_close(quantile(&values, 1.0).ok_or("maximum")?, 4.0);
        assert_eq!(quantile(&[], 0.5), None);
        Ok(())
    }

    #[test]
    fn quantile_unsorted_ignores_nan() -> Result<(), Box<dyn std::error::Error>> {
        let values = [4.0, f64::NAN, 1.0, 3.0, 2.0];
        assert_close(quantile_unsorted(&values, 0.5).ok_or("median")?, 2.5);
        Ok(())
    }

    #[test]
    fn sqrt_scale_maps_zero_to_zero() {
        let scale = SqrtScale::new(100.0, 15.0);
        assert_close(scale.apply(0.0), 0.0);
        assert_close(scale.apply(-4.0), 0.0);
        assert_close(scale.apply(f64::NAN), 0.0);
        assert_close(scale.apply(100.0), 15.0);
        assert_close(scale.apply(25.0), 7.5);
    }

    #[test]
    fn sqrt_scale_is_monotonic() {
        let scale = SqrtScale::new(250.0, 15.0);
        let mut previous = 0.0;
        for count in 0..1_000 {
            let radius = scale.apply(f64::from(count));
            assert!(radius >= previous, "radius fell at {count}");
            assert!(radius >= 0.0);
            previous = radius;
        }
    }

    #[test]
    fn empty_domain_scale_is_flat_zero() {
        let scale = SqrtScale::fitted(&[], 0.9995, 15.0);
        assert_close(scale.apply(50.0), 0.0);
    }

    #[test]
    fn ticks_use_nice_steps() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 1_000.0, 5), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1_000.0]);
        assert_eq!(ticks(0.0, 1.0, 2), vec![0.0, 0.5, 1.0]);
        assert!(ticks(5.0, 1.0, 5).is_empty());
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_234_567.0), "1,234,567");
    }

    #[test]
    fn significant_format_matches_legend_labels() {
        assert_eq!(format_significant(1_234.0), "1,200");
        assert_eq!(format_significant(50.0), "50");
        assert_eq!(format_significant(5.0), "5.0");
        assert_eq!(format_significant(0.25), "0.25");
    }

    #[test]
    fn tick_labels_keep_fractional_steps() {
        let labels: Vec<String> = [0.0, 0.5, 1.0, 1.5].iter().map(|v| format_tick(*v, 0.5)).collect();
        assert_eq!(labels, ["0.0", "0.5", "1.0", "1.5"]);
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
        assert_eq!(format_tick(2_000.0, 500.0), "2,000");
        assert_eq!(format_tick(3.0, 1.0), "3");
    }
}
