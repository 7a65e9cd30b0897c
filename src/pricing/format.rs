// src/pricing/format.rs
use serde::{Deserialize, Serialize};

/// Rendered in place of a missing or non-finite value.
pub const NO_VALUE: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Currency,
    Percent,
    Number,
}

pub fn format_value(value: Option<f64>, variant: Variant) -> String {
    match value.filter(|v| v.is_finite()) {
        None => NO_VALUE.to_string(),
        Some(v) => match variant {
            Variant::Currency => currency(v),
            Variant::Percent => percent(v),
            Variant::Number => number(v),
        },
    }
}

/// `1234.5` -> `$1,234.50`, `-3` -> `-$3.00`.
pub fn currency(value: f64) -> String {
    let (negative, digits) = fixed(value, 2);
    format!("{}${}", if negative { "-" } else { "" }, digits)
}

/// Takes a fraction: `0.255` -> `25.50%`.
pub fn percent(value: f64) -> String {
    let (negative, digits) = fixed(value * 100.0, 2);
    format!("{}{}%", if negative { "-" } else { "" }, digits)
}

/// Grouped, at most two decimals, no trailing zeros.
pub fn number(value: f64) -> String {
    let (negative, digits) = fixed(value, 2);
    let trimmed = if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits.as_str()
    };
    format!("{}{}", if negative { "-" } else { "" }, trimmed)
}

// Sign and grouped magnitude rounded to `decimals` places. A value that
// rounds to zero is never negative.
fn fixed(value: f64, decimals: u32) -> (bool, String) {
    let factor = 10u64.pow(decimals);
    let units = (value.abs() * factor as f64).round() as u64;
    let whole = group_thousands(units / factor);
    let digits = if decimals == 0 {
        whole
    } else {
        format!("{whole}.{:0width$}", units % factor, width = decimals as usize)
    };
    (value < 0.0 && units != 0, digits)
}

fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_and_pads() {
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(-3.0), "-$3.00");
        assert_eq!(currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_scales_fraction() {
        assert_eq!(percent(0.255), "25.50%");
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(percent(-0.1), "-10.00%");
    }

    #[test]
    fn number_trims_trailing_zeros() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(1234.5), "1,234.5");
        assert_eq!(number(0.125), "0.13");
    }

    #[test]
    fn missing_and_non_finite_render_as_placeholder() {
        for variant in [Variant::Currency, Variant::Percent, Variant::Number] {
            assert_eq!(format_value(None, variant), NO_VALUE);
            assert_eq!(format_value(Some(f64::NAN), variant), NO_VALUE);
            assert_eq!(format_value(Some(f64::INFINITY), variant), NO_VALUE);
        }
        assert_eq!(format_value(Some(0.0), Variant::Currency), "$0.00");
    }
}
