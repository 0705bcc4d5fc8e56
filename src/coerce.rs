//! Numeric coercion for raw table cells.
//!
//! A cell is numeric when, after trimming surrounding ASCII whitespace, it is an
//! optionally signed integer or decimal (`12`, `-3.5`, `+.25`, `7.`).
//! Everything else, including empty and absent cells, is non-numeric and
//! coerces to zero.

/// Parses a cell that holds a plain integer or decimal number.
///
/// Returns `None` for empty text, free text, exponent notation and the
/// `nan`/`inf` spellings that `f64::from_str` would otherwise accept.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let text = raw.trim_ascii();
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    text.parse::<f64>().ok()
}

/// Coerces a cell to a number, mapping missing or non-numeric cells to `0.0`.
pub fn coerce(cell: Option<&str>) -> f64 {
    cell.and_then(parse_numeric).unwrap_or(0.0)
}
