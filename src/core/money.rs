//! Rounding of computed amounts for presentation.

use rust_decimal::prelude::*;

/// Rounds an amount to cents, halves away from zero. Non-finite values have
/// no decimal form and yield `None`.
pub fn to_cents(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

pub fn format_money(value: f64, currency: &str) -> String {
    match to_cents(value) {
        Some(cents) => format!("{currency} {cents:.2}"),
        None => format!("{currency} N/A"),
    }
}

pub fn format_percentage(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(pct) => format!("{:.2}%", pct.round_dp(2)),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_cents_away_from_zero() {
        assert_eq!(to_cents(0.125), Some(Decimal::new(13, 2)));
        assert_eq!(to_cents(-0.125), Some(Decimal::new(-13, 2)));
        assert_eq!(to_cents(79.5168), Some(Decimal::new(7952, 2)));
        assert_eq!(to_cents(4.2749), Some(Decimal::new(427, 2)));
        assert_eq!(to_cents(0.0), Some(Decimal::ZERO));
        assert_eq!(to_cents(f64::NAN), None);
    }

    #[test]
    fn formats_with_currency_and_two_places() {
        assert_eq!(format_money(85.5, "BRL"), "BRL 85.50");
        assert_eq!(format_money(163.1726, "USD"), "USD 163.17");
        assert_eq!(format_money(f64::INFINITY, "BRL"), "BRL N/A");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percentage(1.65), "1.65%");
        assert_eq!(format_percentage(21.0), "21.00%");
    }
}
