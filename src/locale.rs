use std::collections::HashMap;

lazy_static! {
    /// Known page locale prefixes. The first entry is the default.
    static ref LOCALES: Vec<Locale> = vec![
        Locale::new("us", "us", "en-US"),
        Locale::new("uk", "gb", "en-GB"),
        Locale::new("ca", "ca", "en-CA"),
        Locale::new("au", "au", "en-AU"),
        Locale::new("in", "in", "en-IN"),
        Locale::new("fr", "fr", "fr-FR"),
        Locale::new("de", "de", "de-DE"),
        Locale::new("it", "it", "it-IT"),
        Locale::new("es", "es", "es-ES"),
        Locale::new("nl", "nl", "nl-NL"),
        Locale::new("dk", "dk", "da-DK"),
        Locale::new("se", "se", "sv-SE"),
        Locale::new("no", "no", "nb-NO"),
        Locale::new("br", "br", "pt-BR"),
        Locale::new("jp", "jp", "ja-JP"),
        Locale::new("kr", "kr", "ko-KR"),
    ];

    static ref CURRENCIES: Vec<Currency> = vec![
        Currency::new("USD", "$", false, '.'),
        Currency::new("GBP", "£", false, '.'),
        Currency::new("EUR", "€", true, ','),
        Currency::new("CAD", "CA$", false, '.'),
        Currency::new("AUD", "A$", false, '.'),
        Currency::new("INR", "₹", false, '.'),
        Currency::new("DKK", "kr.", true, ','),
        Currency::new("SEK", "kr", true, ','),
        Currency::new("NOK", "kr", true, ','),
        Currency::new("BRL", "R$", false, ','),
        Currency::new("JPY", "¥", false, '.'),
        Currency::new("KRW", "₩", false, '.'),
    ];

    static ref COUNTRY_CURRENCY: HashMap<&'static str, &'static str> = vec![
        ("us", "USD"),
        ("gb", "GBP"),
        ("ca", "CAD"),
        ("au", "AUD"),
        ("in", "INR"),
        ("fr", "EUR"),
        ("de", "EUR"),
        ("it", "EUR"),
        ("es", "EUR"),
        ("nl", "EUR"),
        ("at", "EUR"),
        ("be", "EUR"),
        ("fi", "EUR"),
        ("ie", "EUR"),
        ("pt", "EUR"),
        ("lu", "EUR"),
        ("dk", "DKK"),
        ("se", "SEK"),
        ("no", "NOK"),
        ("br", "BRL"),
        ("jp", "JPY"),
        ("kr", "KRW"),
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    prefix: &'static str,
    country: &'static str,
    language: &'static str,
}

impl Locale {
    const fn new(prefix: &'static str, country: &'static str, language: &'static str) -> Self {
        Self {
            prefix,
            country,
            language,
        }
    }

    pub fn from_prefix(prefix: &str) -> &'static Locale {
        LOCALES
            .iter()
            .find(|l| l.prefix == prefix)
            .unwrap_or(&LOCALES[0])
    }

    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub const fn country(&self) -> &'static str {
        self.country
    }

    pub const fn language(&self) -> &'static str {
        self.language
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    code: &'static str,
    symbol: &'static str,
    symbol_after: bool,
    decimal_separator: char,
}

impl Currency {
    const fn new(
        code: &'static str,
        symbol: &'static str,
        symbol_after: bool,
        decimal_separator: char,
    ) -> Self {
        Self {
            code,
            symbol,
            symbol_after,
            decimal_separator,
        }
    }

    pub fn from_code(code: &str) -> Option<&'static Currency> {
        CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn for_country(country: &str) -> Option<&'static Currency> {
        let code = COUNTRY_CURRENCY.get(country.to_lowercase().as_str())?;
        Self::from_code(code)
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// `9.99` becomes `$9.99` or `9,99 €` depending on the currency.
    pub fn format(&self, price: &str) -> String {
        let amount = price.replace('.', &self.decimal_separator.to_string());
        if self.symbol_after {
            format!("{amount} {}", self.symbol)
        } else {
            format!("{}{amount}", self.symbol)
        }
    }
}

/// Formats `price` in `currency`; unknown currency codes are appended verbatim.
pub fn format_price(price: &str, currency: &str) -> String {
    match Currency::from_code(currency) {
        Some(c) => c.format(price),
        None => format!("{price} {currency}"),
    }
}
