//! Typed views over raw cell text
//!
//! Cells are always stored as text. These conversions are permissive: they
//! read the longest usable prefix and fall back to a zero value instead of
//! failing.

/// Parse the leading integer of `text`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12abc"`
/// reads as `12`. Returns `0` when there is no integer prefix or it overflows.
pub fn to_int(text: &str) -> i64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    s[..end].parse().unwrap_or(0)
}

/// Parse the leading floating point number of `text`.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and the `inf`/`infinity`/`nan` spellings. Returns `0.0` when
/// there is no numeric prefix.
pub fn to_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let rest = s[end..].to_ascii_lowercase();
    if rest.starts_with("inf") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    if rest.starts_with("nan") {
        return f64::NAN;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // Only take the exponent if at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Read `text` as a boolean.
///
/// `true`/`false` in any case are recognized; anything else is read as an
/// integer and is true when non-zero.
pub fn to_bool(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return true;
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return false;
    }
    to_int(trimmed) != 0
}
