// Human-readable count and number helpers used by the response shaper

/// Abbreviate a raw count: `1500000` -> `"1.5M"`, `2500` -> `"2.5K"`, `999` -> `"999"`.
/// Anything that is not an integer renders as `"0"`.
pub fn format_count(raw: impl AsRef<str>) -> String {
    let count = match raw.as_ref().trim().parse::<i64>() {
        Ok(count) => count,
        Err(_) => return "0".to_string(),
    };

    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Same as `format_count` for an optional upstream field; missing means zero.
pub fn format_optional_count(raw: Option<&str>) -> String {
    format_count(raw.unwrap_or("0"))
}

/// Round to `decimals` places; exact ties go to the even digit (2.25 -> 2.2).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
