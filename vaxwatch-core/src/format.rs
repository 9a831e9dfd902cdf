//! French display formatting for report output
//!
//! Matches the legacy dashboard formatting: fr-FR digit grouping with
//! spaces, one decimal for percentages, whole euros for currency.

/// Group digits in threes with spaces (fr-FR style): 1280000 -> "1 280 000"
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    grouped
}

/// One-decimal percentage: 52.2 -> "52.2%"
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Whole euros with fr-FR grouping: 12800000.0 -> "12 800 000 €"
///
/// The amount is rounded to the nearest euro; negative amounts keep their
/// sign in front of the grouped digits.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} €", sign, format_number(rounded.abs() as u64))
}
