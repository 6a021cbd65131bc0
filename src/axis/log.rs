//! Logarithmic value-axis tick planning.

use super::{Tick, TickPlan};
use crate::scales::LOG_FLOOR;

/// Decade spans below this get sub-decade (2–9×) minor ticks.
const SUB_DECADE_SPAN: f64 = 5.0;

/// Plans ticks over a logarithmic domain.
///
/// Non-positive bounds are remapped to the [`LOG_FLOOR`] power-of-ten floor.
/// That silently widens the requested domain; it is kept for parity with the
/// upstream behavior and surfaced with a warning instead of being fixed here.
pub fn plan(domain: (f64, f64)) -> TickPlan {
    let (mut d0, mut d1) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };

    if d0 <= 0.0 || d1 <= 0.0 {
        tracing::warn!(
            d0,
            d1,
            floor = LOG_FLOOR,
            "non-positive log-axis domain remapped to floor"
        );
        d0 = d0.max(LOG_FLOOR);
        d1 = d1.max(LOG_FLOOR);
    }
    if d1 <= d0 {
        d1 = d0 * 10.0;
    }

    let lo = d0.log10();
    let hi = d1.log10();
    let span = hi - lo;

    let step = decade_step(span);
    let mut exps: Vec<i32> = Vec::new();
    // Align decade exponents to the step so coarse spacing stays stable while
    // panning.
    let mut e = lo.ceil() as i32;
    let rem = e.rem_euclid(step);
    if rem != 0 {
        e += step - rem;
    }
    while (e as f64) <= hi + 1e-9 {
        exps.push(e);
        e += step;
    }

    let eps_lo = d0 * (1.0 - 1e-9);
    let eps_hi = d1 * (1.0 + 1e-9);
    let mut values: Vec<f64> = exps.iter().map(|&e| 10f64.powi(e)).collect();

    if span < SUB_DECADE_SPAN {
        let first_decade = lo.floor() as i32;
        let last_decade = hi.floor() as i32;
        for e in first_decade..=last_decade {
            let decade = 10f64.powi(e);
            for m in 2..=9 {
                let v = m as f64 * decade;
                if v >= eps_lo && v <= eps_hi {
                    values.push(v);
                }
            }
        }
    }

    values.retain(|&v| v >= eps_lo && v <= eps_hi);
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();

    // A domain narrower than the gap between mantissa integers catches no
    // decade or minor tick; fall back to marking the domain start.
    if values.is_empty() {
        values.push(d0);
    }

    let ticks = values
        .into_iter()
        .map(|v| Tick {
            value: v,
            label: format_value(v),
        })
        .collect();

    TickPlan {
        ticks,
        axis_suffix: None,
        display_factor: 1.0,
        required_thickness: 0.0,
    }
}

/// Whole decades per tick. Spans under three decades step one decade at a
/// time; wider spans group decades so roughly ten major ticks remain.
fn decade_step(span: f64) -> i32 {
    if span < 3.0 {
        return 1;
    }
    let ideal = span / 10.0;
    if ideal <= 1.0 {
        return 1;
    }
    let base = 10f64.powf(ideal.log10().floor());
    let rel = ideal / base;
    let stable = if rel <= 1.0 {
        1.0
    } else if rel <= 2.0 {
        2.0
    } else if rel <= 5.0 {
        5.0
    } else {
        10.0
    };
    (base * stable).round() as i32
}

/// `-floor(log10(x))` digits for sub-unit values, none otherwise.
fn format_value(value: f64) -> String {
    let decimals = if value < 1.0 {
        (-value.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format!("{:.*}", decimals, value)
}
