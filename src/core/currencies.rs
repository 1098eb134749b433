//! ISO 4217 currency codes and their minor units.
//!
//! The minor unit count decides how many decimal places offer amounts are
//! rounded to for display and submission.

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// Number of minor-unit digits for `code` (2 for EUR, 0 for JPY, 3 for KWD).
/// `None` for unknown codes.
pub fn minor_units(code: &str) -> Option<u32> {
    lookup(code).map(|(_, units)| units)
}

fn lookup(code: &str) -> Option<(&'static str, u32)> {
    CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| CURRENCIES[i])
}

/// Sorted list of common ISO 4217 currency codes with minor units.
/// Sorted for binary search.
static CURRENCIES: &[(&str, u32)] = &[
    ("AED", 2), // UAE Dirham
    ("AMD", 2), // Armenian Dram
    ("AUD", 2), // Australian Dollar
    ("BAM", 2), // Convertible Mark
    ("BGN", 2), // Bulgarian Lev
    ("BHD", 3), // Bahraini Dinar
    ("BRL", 2), // Brazilian Real
    ("CAD", 2), // Canadian Dollar
    ("CHF", 2), // Swiss Franc
    ("CLP", 0), // Chilean Peso
    ("CNY", 2), // Chinese Yuan
    ("CZK", 2), // Czech Koruna
    ("DKK", 2), // Danish Krone
    ("EGP", 2), // Egyptian Pound
    ("EUR", 2), // Euro
    ("GBP", 2), // Pound Sterling
    ("GEL", 2), // Georgian Lari
    ("HKD", 2), // Hong Kong Dollar
    ("HUF", 2), // Hungarian Forint
    ("IDR", 2), // Indonesian Rupiah
    ("ILS", 2), // Israeli Shekel
    ("INR", 2), // Indian Rupee
    ("ISK", 0), // Icelandic Krona
    ("JOD", 3), // Jordanian Dinar
    ("JPY", 0), // Japanese Yen
    ("KES", 2), // Kenyan Shilling
    ("KRW", 0), // South Korean Won
    ("KWD", 3), // Kuwaiti Dinar
    ("KZT", 2), // Kazakhstani Tenge
    ("MKD", 2), // Macedonian Denar
    ("MXN", 2), // Mexican Peso
    ("MYR", 2), // Malaysian Ringgit
    ("NGN", 2), // Nigerian Naira
    ("NOK", 2), // Norwegian Krone
    ("NZD", 2), // New Zealand Dollar
    ("OMR", 3), // Omani Rial
    ("PHP", 2), // Philippine Peso
    ("PLN", 2), // Polish Zloty
    ("RON", 2), // Romanian Leu
    ("RSD", 2), // Serbian Dinar
    ("SAR", 2), // Saudi Riyal
    ("SEK", 2), // Swedish Krona
    ("SGD", 2), // Singapore Dollar
    ("THB", 2), // Thai Baht
    ("TRY", 2), // Turkish Lira
    ("TWD", 2), // New Taiwan Dollar
    ("UAH", 2), // Ukrainian Hryvnia
    ("USD", 2), // US Dollar
    ("VND", 0), // Vietnamese Dong
    ("ZAR", 2), // South African Rand
];
