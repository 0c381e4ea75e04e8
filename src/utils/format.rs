//! Number formatting for summary output

/// Format an integer with `,` as the thousands separator
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with three decimals and a `%` suffix
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.3}%")
}
