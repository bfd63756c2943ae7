use chrono::{DateTime, Utc};

const DAY_MS: f64 = 86_400_000.0;

/// Formats an x-axis timestamp (milliseconds since the Unix epoch).
///
/// Intervals of a day or more show the date (`Mar 5`), shorter ones the time
/// of day (`14:30`). Values outside chrono's range fall back to plain numbers.
#[must_use]
pub fn format_x_label(timestamp_ms: f64, interval_ms: f64) -> String {
    if !timestamp_ms.is_finite() {
        return "nan".to_owned();
    }
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms.round() as i64) else {
        return format!("{timestamp_ms:.0}");
    };
    let pattern = if interval_ms >= DAY_MS { "%b %-d" } else { "%H:%M" };
    dt.format(pattern).to_string()
}

/// Formats a y-axis value with a precision derived from the tick step.
///
/// Thousands and millions are abbreviated (`12.5K`, `3M`).
#[must_use]
pub fn format_y_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let magnitude = value.abs();
    let (scaled, scaled_step, suffix) = if magnitude >= 1_000_000.0 {
        (value / 1_000_000.0, step / 1_000_000.0, "M")
    } else if magnitude >= 1_000.0 {
        (value / 1_000.0, step / 1_000.0, "K")
    } else {
        (value, step, "")
    };
    let precision = decimals_for_step(scaled_step);
    let mut text = format!("{scaled:.precision$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_owned();
    }
    text.push_str(suffix);
    text
}

fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 1;
    }
    (-step.log10().floor()) as usize + 1
}
