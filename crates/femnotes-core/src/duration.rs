//! Section durations such as `"1h 23m 45s"`.
//!
//! Accepts a sequence of decimal numbers, each with an optional fraction and
//! a unit suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), e.g. `1h2m3.5s`.
//! Spaces are ignored.

use std::time::Duration;

use crate::error::{FemError, Result};

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 60 * 60 * 1_000_000_000),
];

pub fn parse_duration(text: &str) -> Result<Duration> {
    let compact: String = text.chars().filter(|c| *c != ' ').collect();
    let fail = |reason: &str| FemError::DurationUnparseable {
        duration: text.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = compact.strip_prefix('+').unwrap_or(&compact);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(fail("empty duration"));
    }
    if rest.starts_with('-') {
        return Err(fail("negative duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let whole_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (whole, after) = rest.split_at(whole_len);

        let (fraction, after) = match after.strip_prefix('.') {
            Some(after) => {
                let len = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
                after.split_at(len)
            }
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(fail("expected a number"));
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| {
                if unit.is_empty() {
                    fail("missing unit")
                } else {
                    fail(&format!("unknown unit {unit:?}"))
                }
            })?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| fail("number out of range"))?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(|| fail("overflow"))?;

        // Digits past nanosecond precision cannot change the result.
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| fail("invalid fraction"))?;
            let fraction_nanos = digits * scale / 10u128.pow(fraction.len() as u32);
            nanos = nanos
                .checked_add(fraction_nanos)
                .ok_or_else(|| fail("overflow"))?;
        }

        total = total.checked_add(nanos).ok_or_else(|| fail("overflow"))?;
        rest = after;
    }

    let secs = u64::try_from(total / 1_000_000_000).map_err(|_| fail("overflow"))?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

/// Render a duration as `1h2m3s`, dropping leading zero components.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = total_secs % 3600 / 60;
    let seconds = total_secs % 60;
    let nanos = duration.subsec_nanos();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&seconds.to_string());
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('s');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_section_durations() {
        let cases = [
            ("1h 23m 45s", Duration::from_secs(3600 + 23 * 60 + 45)),
            ("23m", Duration::from_secs(23 * 60)),
            ("45s", Duration::from_secs(45)),
            ("1h2m", Duration::from_secs(3720)),
            ("1.5h", Duration::from_secs(5400)),
            ("1.5s", Duration::from_millis(1500)),
            ("250ms", Duration::from_millis(250)),
            ("3us", Duration::from_micros(3)),
            ("0", Duration::ZERO),
            ("+10s", Duration::from_secs(10)),
        ];

        for (text, want) in cases {
            assert_eq!(parse_duration(text).unwrap(), want, "text {text:?}");
        }
    }

    #[test]
    fn rejects_malformed_durations() {
        let near_limit = format!("{}.9h", u128::MAX / (3600 * 1_000_000_000));
        for text in ["", " ", "abc", "10", "1x", "h", "1h-2m", "-5m", "1..5s", &near_limit] {
            let err = parse_duration(text).unwrap_err();
            assert!(
                matches!(err, FemError::DurationUnparseable { .. }),
                "text {text:?}: {err}"
            );
        }
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(3720)), "1h2m0s");
        assert_eq!(format_duration(Duration::from_secs(5025)), "1h23m45s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }
}
