use super::Decimal;
use rust_decimal::RoundingStrategy;

/// Format a decimal dollar amount as `$X,XXX.XX`.
///
/// Rounds half-up to 2 decimal places, inserts thousands separators, and
/// keeps the sign inside the `$` (e.g. `$-10.00`).
pub(crate) fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    // Always "digits.dd" after formatting with 2 decimal places
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${sign}{grouped}.{frac_part}")
}
