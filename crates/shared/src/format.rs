use numfmt::{Formatter, Precision, Scales};

/// Significant digits kept in legend and tooltip values.
const SIGNIFICANT_DIGITS: i32 = 2;

/// Fraction digits shown after rounding, as en-US number formatting does by default.
const MAX_FRACTION_DIGITS: i32 = 3;

/// Enough mantissa digits to spell out any finite `f64` exactly.
const EXACT_DIGITS: usize = 800;

/// Format a metric value for display: two significant digits, then en-US
/// grouping (`1234.5` -> `"1,200"`). Exactly zero is always `"0"`.
///
/// Rounding looks at the exact binary value, so `4.35` (stored just below
/// 4.35) gives `"4.3"`. Only a true half rounds away from zero.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let magnitude = value.abs();
    let significant = ExactDecimal::of(magnitude)
        .map(|d| d.round_at(d.exponent - SIGNIFICANT_DIGITS + 1))
        .unwrap_or(magnitude);
    let shown = ExactDecimal::of(significant)
        .map(|d| d.round_at(-MAX_FRACTION_DIGITS))
        .unwrap_or(significant);
    if shown == 0.0 {
        return "0".to_string();
    }

    let mut formatter = en_us_formatter();
    let text = formatter.fmt2(shown);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    };
    if value < 0.0 {
        format!("-{text}")
    } else {
        text.to_string()
    }
}

/// Comma grouping, at most three fraction digits, no unit scaling.
fn en_us_formatter() -> Formatter {
    Formatter::new()
        .separator(',')
        .unwrap_or_else(|_| Formatter::new())
        .scales(Scales::none())
        .precision(Precision::Decimals(MAX_FRACTION_DIGITS as u8))
}

/// Exact decimal expansion of a positive finite `f64`: `d0.d1d2... x 10^exponent`.
#[derive(Debug, Clone, PartialEq)]
struct ExactDecimal {
    digits: Vec<u8>,
    exponent: i32,
}

impl ExactDecimal {
    fn of(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        let text = format!("{:.*e}", EXACT_DIGITS, value);
        let (mantissa, exponent) = text.split_once('e')?;
        Some(Self {
            digits: mantissa
                .bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect(),
            exponent: exponent.parse().ok()?,
        })
    }

    /// Round to a multiple of `10^lowest`. The first dropped digit decides,
    /// so an exact half rounds up and anything below it rounds down.
    fn round_at(&self, lowest: i32) -> f64 {
        let keep = self.exponent - lowest + 1;
        if keep < 0 {
            return 0.0;
        }
        let keep = keep as usize;
        if keep > 18 {
            // Past f64 precision; nothing left to round.
            return self.value();
        }
        let mut n = self
            .digits
            .iter()
            .take(keep)
            .fold(0u64, |acc, d| acc * 10 + u64::from(*d));
        if self.digits.get(keep).is_some_and(|d| *d >= 5) {
            n += 1;
        }
        format!("{n}e{lowest}").parse().unwrap_or_else(|_| self.value())
    }

    fn value(&self) -> f64 {
        let digits: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        format!("0.{digits}e{}", self.exponent + 1)
            .parse()
            .unwrap_or(0.0)
    }
}
