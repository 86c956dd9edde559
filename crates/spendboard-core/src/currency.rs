//! Locale-to-currency mapping and money formatting
//!
//! Spend is carried as integer cents everywhere; conversion to a decimal
//! display string happens only here, at the edge.

/// ISO 4217 currency code for a locale's region subtag, when known.
///
/// The locale is expected in BCP-47-like form ("fr-FR"); a missing or
/// unknown region yields `None` and callers fall back to USD.
pub fn currency_for_locale(locale: &str) -> Option<&'static str> {
    let region = locale.split('-').nth(1)?;
    let code = match region {
        "US" => "USD",
        "GB" => "GBP",
        "JP" => "JPY",
        "CN" => "CNY",
        "KR" => "KRW",
        "IN" => "INR",
        "BR" => "BRL",
        "CH" => "CHF",
        "CA" => "CAD",
        "AU" => "AUD",
        "SE" => "SEK",
        "NO" => "NOK",
        "DK" => "DKK",
        "PL" => "PLN",
        "CZ" => "CZK",
        "TR" => "TRY",
        "TH" => "THB",
        "MX" => "MXN",
        "ZA" => "ZAR",
        // Eurozone
        "AT" | "BE" | "DE" | "ES" | "FI" | "FR" | "GR" | "IE" | "IT" | "NL" | "PT" => "EUR",
        _ => return None,
    };
    Some(code)
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "BRL" => "R$",
        "CHF" => "CHF ",
        "CAD" => "CA$",
        "AUD" => "A$",
        "SEK" => "kr ",
        "NOK" => "kr ",
        "DKK" => "kr ",
        "PLN" => "zł",
        "CZK" => "Kč ",
        "TRY" => "₺",
        "THB" => "฿",
        "MXN" => "MX$",
        "ZAR" => "R ",
        _ => "",
    }
}

/// Format integer cents as a two-decimal amount with the currency symbol,
/// e.g. `format_cents(2700, "USD")` is `"$27.00"`. Unknown codes render
/// bare ("27.00").
pub fn format_cents(cents: u64, code: &str) -> String {
    format!(
        "{}{}.{:02}",
        currency_symbol(code),
        cents / 100,
        cents % 100
    )
}
