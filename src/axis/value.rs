//! Linear value-axis tick planning.

use super::{Tick, TickPlan};

/// Plans ticks over a linear numeric domain.
///
/// The step is the domain width normalized into `[1, 10)` by a decimal
/// exponent, then snapped to a 1 / 0.5 / 0.2 / 0.1 multiple of that power of
/// ten. Labels divide out a power-of-1000 display factor so large and tiny
/// domains keep a readable digit count.
pub fn plan(domain: (f64, f64)) -> TickPlan {
    let (d0, d1) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };

    let (factor, suffix) = display_factor(d0.abs().max(d1.abs()));

    if d1 == d0 {
        let decimals = label_decimals(0.0);
        return TickPlan {
            ticks: vec![Tick {
                value: d0,
                label: format_value(d0, factor, decimals),
            }],
            axis_suffix: suffix,
            display_factor: factor,
            required_thickness: 0.0,
        };
    }

    let width = d1 - d0;
    let step = tick_step(width);
    let decimals = label_decimals(width / factor);

    let mut ticks = Vec::new();
    // First step-aligned value at or above d0.
    let mut k = (d0 / step).ceil();
    let eps = step * 1e-9;
    while k * step <= d1 + eps {
        let value = k * step;
        // Guard against -0.0 labels from float rounding.
        let value = if value == 0.0 { 0.0 } else { value };
        ticks.push(Tick {
            value,
            label: format_value(value, factor, decimals),
        });
        k += 1.0;
    }

    TickPlan {
        ticks,
        axis_suffix: suffix,
        display_factor: factor,
        required_thickness: 0.0,
    }
}

/// Step for a domain of `width`: the width is normalized into `[1, 10)` and
/// banded to 1.0 / 0.5 / 0.2 / 0.1 of the normalizing power of ten.
pub fn tick_step(width: f64) -> f64 {
    let exp = -width.log10().floor();
    let scaled = width * 10f64.powf(exp);
    let band = if scaled >= 6.0 {
        1.0
    } else if scaled >= 2.5 {
        0.5
    } else if scaled >= 1.2 {
        0.2
    } else {
        0.1
    };
    band / 10f64.powf(exp)
}

/// Power-of-1000 multiplier keeping labels in a readable digit range, with
/// the suffix shown next to the axis title.
fn display_factor(max_abs: f64) -> (f64, Option<String>) {
    if max_abs == 0.0 || !max_abs.is_finite() {
        return (1.0, None);
    }
    let k = (max_abs.log10() / 3.0).trunc() as i32;
    if k == 0 {
        (1.0, None)
    } else {
        (1000f64.powi(k), Some(format!("×1e{}", 3 * k)))
    }
}

/// Decimal digits for labels, from the display-scaled domain width.
fn label_decimals(scaled_width: f64) -> usize {
    let w = scaled_width.abs();
    if w >= 15.0 {
        0
    } else if w >= 1.5 {
        1
    } else if w >= 0.15 {
        2
    } else if w >= 0.015 {
        3
    } else if w >= 0.0015 {
        4
    } else {
        5
    }
}

fn format_value(value: f64, factor: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value / factor)
}
