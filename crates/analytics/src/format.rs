//! Display helpers shared by the report labels and the terminal renderer.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Formats an integer with comma thousands separators (`1234567` -> `"1,234,567"`).
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `"RM 1,250,000"` style currency string.
pub fn format_currency(symbol: &str, amount: i64) -> String {
    format!("{} {}", symbol, group_thousands(amount))
}

/// Rounds a currency amount to whole units, ties to even.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Rounds to a whole number and converts for display.
pub fn decimal_to_whole(amount: Decimal) -> i64 {
    round_currency(amount).to_i64().unwrap_or_default()
}

/// Rounds an `f64` to `places` decimal places, ties to even.
pub fn round_f64(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn formats_currency() {
        assert_eq!(format_currency("RM", 912_345), "RM 912,345");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(decimal_to_whole(dec!(850000.5)), 850_000);
        assert_eq!(decimal_to_whole(dec!(850001.5)), 850_002);
        assert_eq!(decimal_to_whole(dec!(850001.2)), 850_001);
        assert_eq!(round_f64(3.25, 1), 3.2);
        assert_eq!(round_f64(3.36, 1), 3.4);
        assert_eq!(round_f64(512.6, 0), 513.0);
    }
}
