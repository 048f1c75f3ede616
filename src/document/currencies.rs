//! ISO 4217 currency lookup and display formatting.
//!
//! The model stores a bare 3-letter code; everything visual (symbol,
//! grouping, decimal places) lives here. Unknown or absent codes fall back
//! to USD for display — the model value is never rewritten.

use rust_decimal::Decimal;

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCIES.binary_search_by(|(c, _)| c.cmp(&code)).is_ok()
}

/// Format an amount in `en-US` style for the given currency: symbol (or
/// code prefix), thousands grouping, two decimal places, half-up rounding.
///
/// Rounding here is display-only; totals themselves stay exact.
pub fn format_amount(code: &str, amount: Decimal) -> String {
    let code = code.trim();
    let code = if is_known_currency_code(code) {
        code
    } else {
        "USD"
    };

    let rounded = amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = grouped_2dp(rounded.abs());

    match symbol_for(code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code} {digits}"),
    }
}

fn symbol_for(code: &str) -> Option<&'static str> {
    CURRENCIES
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .and_then(|i| CURRENCIES[i].1)
}

/// Render a non-negative decimal with exactly two fraction digits and
/// comma-grouped integer digits.
fn grouped_2dp(value: Decimal) -> String {
    let text = value.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };

    let mut frac = frac_part;
    frac.truncate(2);
    while frac.len() < 2 {
        frac.push('0');
    }

    let mut grouped = String::new();
    let bytes = int_part.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }

    format!("{grouped}.{frac}")
}

/// Sorted list of common ISO 4217 currency codes with display symbols
/// where one is unambiguous. Sorted for binary search.
static CURRENCIES: &[(&str, Option<&str>)] = &[
    ("AED", None),
    ("AUD", Some("A$")),
    ("BGN", None),
    ("BRL", Some("R$")),
    ("CAD", Some("CA$")),
    ("CHF", None),
    ("CNY", Some("CN¥")),
    ("CZK", None),
    ("DKK", None),
    ("EGP", None),
    ("EUR", Some("€")),
    ("GBP", Some("£")),
    ("HKD", Some("HK$")),
    ("HUF", None),
    ("IDR", None),
    ("ILS", Some("₪")),
    ("INR", Some("₹")),
    ("ISK", None),
    ("JPY", Some("¥")),
    ("KES", None),
    ("KRW", Some("₩")),
    ("MXN", Some("MX$")),
    ("MYR", None),
    ("NGN", Some("₦")),
    ("NOK", None),
    ("NZD", Some("NZ$")),
    ("PHP", Some("₱")),
    ("PLN", None),
    ("RON", None),
    ("SAR", None),
    ("SEK", None),
    ("SGD", Some("S$")),
    ("THB", Some("฿")),
    ("TRY", Some("₺")),
    ("TWD", Some("NT$")),
    ("UAH", Some("₴")),
    ("USD", Some("$")),
    ("VND", Some("₫")),
    ("ZAR", None),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn known_currencies() {
        assert!(is_known_currency_code("USD"));
        assert!(is_known_currency_code("EUR"));
        assert!(is_known_currency_code("INR"));
        assert!(!is_known_currency_code("XYZ"));
        assert!(!is_known_currency_code(""));
        assert!(!is_known_currency_code("usd"));
    }

    #[test]
    fn list_is_sorted() {
        for window in CURRENCIES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "currency codes not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }

    #[test]
    fn formats_with_symbol_and_grouping() {
        assert_eq!(format_amount("USD", dec!(0)), "$0.00");
        assert_eq!(format_amount("USD", dec!(1234567.5)), "$1,234,567.50");
        assert_eq!(format_amount("EUR", dec!(49.9)), "€49.90");
        assert_eq!(format_amount("CHF", dec!(12.345)), "CHF 12.35");
    }

    #[test]
    fn unknown_or_blank_code_falls_back_to_usd() {
        assert_eq!(format_amount("???", dec!(5)), "$5.00");
        assert_eq!(format_amount("", dec!(5)), "$5.00");
    }

    #[test]
    fn negative_amounts_place_sign_before_symbol() {
        assert_eq!(format_amount("USD", dec!(-130)), "-$130.00");
    }
}
