use crate::core::Extrema;

const MAX_X_TICKS: usize = 512;
const NICE_STEPS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

/// Running state of the x-axis tick sequence.
///
/// The interval only ever doubles or halves, and the anchor only moves by
/// whole intervals, so ticks stay glued to the same data values while the
/// viewport scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XTickSequence {
    interval: Option<f64>,
    anchor: Option<f64>,
}

impl XTickSequence {
    #[must_use]
    pub fn interval(&self) -> Option<f64> {
        self.interval
    }

    #[must_use]
    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Ascending tick values covering `[left, right]`.
    ///
    /// `base_interval` seeds the interval on first use (typically the data
    /// sampling step) and `initial_anchor` the anchor (typically the last
    /// visible timestamp). A degenerate scale yields no ticks.
    pub fn compute(
        &mut self,
        left: f64,
        right: f64,
        pixel_x: f64,
        min_label_width_px: f64,
        base_interval: f64,
        initial_anchor: f64,
    ) -> Vec<f64> {
        if !(pixel_x.is_finite() && pixel_x > 0.0)
            || !(left.is_finite() && right.is_finite())
            || right <= left
            || !(min_label_width_px > 0.0)
        {
            return Vec::new();
        }

        let mut interval = match self.interval {
            Some(interval) if interval > 0.0 && interval.is_finite() => interval,
            _ if base_interval > 0.0 && base_interval.is_finite() => base_interval,
            _ => right - left,
        };
        while interval / pixel_x < min_label_width_px {
            interval *= 2.0;
        }
        while interval / pixel_x > 2.0 * min_label_width_px {
            interval /= 2.0;
        }
        self.interval = Some(interval);

        let mut anchor = match self.anchor {
            Some(anchor) if anchor.is_finite() => anchor,
            _ if initial_anchor.is_finite() => initial_anchor,
            _ => right,
        };
        let offset = right - anchor;
        if !(0.0..interval).contains(&offset) {
            anchor += (offset / interval).floor() * interval;
        }
        self.anchor = Some(anchor);

        let mut values = Vec::new();
        let mut step = 0.0;
        while values.len() < MAX_X_TICKS {
            let value = anchor - step * interval;
            if value < left {
                break;
            }
            values.push(value);
            step += 1.0;
        }
        values.reverse();
        values
    }
}

/// Evenly spaced y ticks inside `extrema`, `count - 1` or `count` of them.
/// Returns the values and the step.
///
/// Grid-aligned "nice" steps (`1`, `2`, `2.5` or `5` times a power of ten) win
/// when one of them yields `count` values, then `count - 1`. Otherwise the
/// range is split evenly from its minimum.
#[must_use]
pub fn nice_y_ticks(extrema: Extrema, count: usize) -> (Vec<f64>, f64) {
    let span = extrema.span();
    if count < 2 || !span.is_finite() || span <= 0.0 {
        return (Vec::new(), 0.0);
    }
    let raw_step = span / (count - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let nice = [count, count - 1].into_iter().find_map(|wanted| {
        nice_steps(magnitude).find(|step| grid_bounds(extrema, *step).1 == wanted)
    });

    match nice {
        Some(step) => {
            let (first, len) = grid_bounds(extrema, step);
            let values = (0..len).map(|k| (first + k as f64) * step).collect();
            (values, step)
        }
        None => {
            let values = (0..count)
                .map(|k| extrema.min + k as f64 * raw_step)
                .collect();
            (values, raw_step)
        }
    }
}

/// Candidate steps around `magnitude`, largest first.
fn nice_steps(magnitude: f64) -> impl Iterator<Item = f64> {
    [10.0 * magnitude, magnitude, magnitude / 10.0]
        .into_iter()
        .flat_map(|scale| NICE_STEPS.iter().rev().map(move |factor| factor * scale))
}

/// First grid multiple of `step` inside `extrema` and how many follow it.
fn grid_bounds(extrema: Extrema, step: f64) -> (f64, usize) {
    let first = (extrema.min / step).ceil();
    let last = (extrema.max / step).floor();
    let len = if last >= first {
        (last - first) as usize + 1
    } else {
        0
    };
    (first, len)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{XTickSequence, nice_y_ticks};
    use crate::core::Extrema;

    #[test]
    fn interval_stays_within_one_to_two_label_widths() {
        let mut ticks = XTickSequence::default();
        let values = ticks.compute(0.0, 1000.0, 2.0, 60.0, 1.0, 1000.0);
        let interval = ticks.interval().expect("interval");
        assert!(interval / 2.0 >= 60.0 && interval / 2.0 <= 120.0);
        assert_eq!(values.last().copied(), Some(1000.0));
        assert!(values.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn small_scroll_keeps_tick_values() {
        let mut ticks = XTickSequence::default();
        let before = ticks.compute(0.0, 1000.0, 2.0, 60.0, 1.0, 1000.0);
        let after = ticks.compute(10.0, 1010.0, 2.0, 60.0, 1.0, 1000.0);
        let interval = ticks.interval().expect("interval");
        // Every tick still visible keeps its exact value.
        for value in after.iter().filter(|value| **value >= 10.0) {
            assert!(before.contains(value) || *value > 1000.0 - interval);
        }
        assert_eq!(ticks.anchor(), Some(1000.0));
    }

    #[test]
    fn anchor_moves_by_whole_intervals() {
        let mut ticks = XTickSequence::default();
        ticks.compute(0.0, 1000.0, 2.0, 60.0, 1.0, 1000.0);
        let interval = ticks.interval().expect("interval");
        ticks.compute(500.0, 1500.0 + interval * 0.5, 2.0, 60.0, 1.0, 1000.0);
        let anchor = ticks.anchor().expect("anchor");
        let shift = (anchor - 1000.0) / interval;
        assert_relative_eq!(shift, shift.round());
    }

    #[test]
    fn degenerate_scale_has_no_ticks() {
        let mut ticks = XTickSequence::default();
        assert!(ticks.compute(5.0, 5.0, 1.0, 60.0, 1.0, 5.0).is_empty());
        assert!(ticks.compute(0.0, 5.0, 0.0, 60.0, 1.0, 5.0).is_empty());
    }

    #[test]
    fn y_ticks_are_nice_and_bounded() {
        let (values, step) = nice_y_ticks(Extrema::new(0.0, 237.0), 6);
        assert_eq!(step, 50.0);
        assert_eq!(values, vec![0.0, 50.0, 100.0, 150.0, 200.0]);

        let (values, step) = nice_y_ticks(Extrema::new(0.0, 100.0), 6);
        assert_eq!(step, 20.0);
        assert_eq!(values.len(), 6);

        assert!(nice_y_ticks(Extrema::new(3.0, 3.0), 6).0.is_empty());
    }

    #[test]
    fn y_ticks_come_five_or_six_at_a_time() {
        let (values, step) = nice_y_ticks(Extrema::new(3.0, 14.0), 6);
        assert_eq!(step, 2.0);
        assert_eq!(values, vec![4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);

        // No nice step fits, so the range is split evenly.
        let (values, step) = nice_y_ticks(Extrema::new(1.0, 9.0), 6);
        assert_relative_eq!(step, 1.6);
        assert_eq!(values.len(), 6);
        assert_eq!(values[0], 1.0);
        assert_relative_eq!(values[5], 9.0, epsilon = 1e-12);

        for min in [-730.0, -12.5, 0.0, 0.3, 3.0, 41.0, 999.0] {
            for span in [0.07, 1.0, 7.3, 8.0, 11.0, 95.0, 237.0, 1_234.5, 86_400.0] {
                let extrema = Extrema::new(min, min + span);
                let (values, step) = nice_y_ticks(extrema, 6);
                assert!((5..=6).contains(&values.len()), "{extrema:?} -> {values:?}");
                assert!(values.iter().all(|value| *value >= min - 1e-9 * span));
                assert!(values.iter().all(|value| *value <= min + span + 1e-9 * span));
                for pair in values.windows(2) {
                    assert_relative_eq!(pair[1] - pair[0], step, max_relative = 1e-9);
                }
            }
        }
    }
}
