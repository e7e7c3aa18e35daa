// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick and legend labels.

/// Formats a tick value with just enough decimals for `step`, grouping thousands.
///
/// `format_tick_with_step(1500.0, 500.0)` is `"1,500"`; `format_tick_with_step(0.25, 0.05)` is
/// `"0.25"`.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let decimals = decimals_for_step(step);
    let s = format!("{:.*}", decimals, value + 0.0);
    let s = if s.starts_with('-') && s.bytes().all(|b| matches!(b, b'-' | b'0' | b'.')) {
        s[1..].to_string()
    } else {
        s
    };
    group_thousands(&s)
}

/// Formats a number the shortest way that round-trips (`6`, `6.5`, `-0.25`).
pub fn format_number(value: f64) -> String {
    format!("{}", value + 0.0)
}

fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let exp = -step.abs().log10().floor();
    if exp <= 0.0 {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "positive and clamped to a small range"
        )]
        let d = exp.min(20.0) as i32;
        // Steps like 0.25 need one more digit than their magnitude.
        let scaled = step * 10_f64.powi(d);
        let d = d.unsigned_abs() as usize;
        if (scaled - scaled.round()).abs() > 1e-9 { d + 1 } else { d }
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}
