//! Currency table used to render the budget in the recommendation prompt.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub country: &'static str,
}

pub const DEFAULT_CURRENCY_CODE: &str = "INR";

const fn currency(
    code: &'static str,
    symbol: &'static str,
    name: &'static str,
    country: &'static str,
) -> Currency {
    Currency {
        code,
        symbol,
        name,
        country,
    }
}

pub const CURRENCIES: &[Currency] = &[
    currency("USD", "$", "US Dollar", "United States"),
    currency("EUR", "€", "Euro", "European Union"),
    currency("GBP", "£", "British Pound", "United Kingdom"),
    currency("INR", "₹", "Indian Rupee", "India"),
    currency("CAD", "C$", "Canadian Dollar", "Canada"),
    currency("AUD", "A$", "Australian Dollar", "Australia"),
    currency("JPY", "¥", "Japanese Yen", "Japan"),
    currency("CNY", "¥", "Chinese Yuan", "China"),
    currency("SGD", "S$", "Singapore Dollar", "Singapore"),
    currency("HKD", "HK$", "Hong Kong Dollar", "Hong Kong"),
    currency("NZD", "NZ$", "New Zealand Dollar", "New Zealand"),
    currency("CHF", "Fr", "Swiss Franc", "Switzerland"),
    currency("SEK", "kr", "Swedish Krona", "Sweden"),
    currency("NOK", "kr", "Norwegian Krone", "Norway"),
    currency("DKK", "kr", "Danish Krone", "Denmark"),
    currency("AED", "د.إ", "UAE Dirham", "United Arab Emirates"),
    currency("SAR", "﷼", "Saudi Riyal", "Saudi Arabia"),
    currency("ZAR", "R", "South African Rand", "South Africa"),
    currency("BRL", "R$", "Brazilian Real", "Brazil"),
    currency("MXN", "$", "Mexican Peso", "Mexico"),
    currency("KRW", "₩", "South Korean Won", "South Korea"),
    currency("THB", "฿", "Thai Baht", "Thailand"),
    currency("MYR", "RM", "Malaysian Ringgit", "Malaysia"),
    currency("IDR", "Rp", "Indonesian Rupiah", "Indonesia"),
    currency("PHP", "₱", "Philippine Peso", "Philippines"),
    currency("PKR", "₨", "Pakistani Rupee", "Pakistan"),
    currency("BDT", "৳", "Bangladeshi Taka", "Bangladesh"),
    currency("LKR", "Rs", "Sri Lankan Rupee", "Sri Lanka"),
    currency("NPR", "रू", "Nepalese Rupee", "Nepal"),
    currency("VND", "₫", "Vietnamese Dong", "Vietnam"),
    currency("EGP", "E£", "Egyptian Pound", "Egypt"),
    currency("NGN", "₦", "Nigerian Naira", "Nigeria"),
    currency("KES", "KSh", "Kenyan Shilling", "Kenya"),
    currency("GHS", "₵", "Ghanaian Cedi", "Ghana"),
    currency("TRY", "₺", "Turkish Lira", "Turkey"),
    currency("RUB", "₽", "Russian Ruble", "Russia"),
    currency("PLN", "zł", "Polish Zloty", "Poland"),
    currency("CZK", "Kč", "Czech Koruna", "Czech Republic"),
    currency("HUF", "Ft", "Hungarian Forint", "Hungary"),
    currency("ILS", "₪", "Israeli Shekel", "Israel"),
    currency("CLP", "$", "Chilean Peso", "Chile"),
    currency("ARS", "$", "Argentine Peso", "Argentina"),
    currency("COP", "$", "Colombian Peso", "Colombia"),
    currency("PEN", "S/", "Peruvian Sol", "Peru"),
];

/// IANA time zone → currency code. Anything unmapped resolves to USD.
const TIMEZONE_CURRENCIES: &[(&str, &str)] = &[
    ("America/New_York", "USD"),
    ("America/Chicago", "USD"),
    ("America/Los_Angeles", "USD"),
    ("America/Denver", "USD"),
    ("Europe/London", "GBP"),
    ("Europe/Paris", "EUR"),
    ("Europe/Berlin", "EUR"),
    ("Europe/Rome", "EUR"),
    ("Europe/Madrid", "EUR"),
    ("Asia/Kolkata", "INR"),
    ("Asia/Dubai", "AED"),
    ("Asia/Tokyo", "JPY"),
    ("Asia/Shanghai", "CNY"),
    ("Asia/Singapore", "SGD"),
    ("Asia/Hong_Kong", "HKD"),
    ("Australia/Sydney", "AUD"),
    ("Australia/Melbourne", "AUD"),
    ("America/Toronto", "CAD"),
    ("America/Vancouver", "CAD"),
];

/// Case-insensitive lookup by ISO code.
pub fn find(code: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

pub fn detect_from_timezone(timezone: &str) -> &'static Currency {
    TIMEZONE_CURRENCIES
        .iter()
        .find(|(tz, _)| *tz == timezone)
        .and_then(|(_, code)| find(code))
        .unwrap_or(&CURRENCIES[0])
}

/// Formats a whole amount with the currency symbol and comma-grouped digits,
/// e.g. `₹650,000`.
pub fn format_amount(amount: u64, currency: &Currency) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", currency.symbol, grouped)
}
