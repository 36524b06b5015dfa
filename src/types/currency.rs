use std::collections::HashSet;

/// Active ISO 4217 alphabetic codes. Testing and "no currency" codes (`XTS`, `XXX`)
/// are not included.
const ISO_4217_ACTIVE: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV",
    "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHE", "CHF",
    "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUP", "CVE", "CZK",
    "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP",
    "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL",
    "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD",
    "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT",
    "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR",
    "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN",
    "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF",
    "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD",
    "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP",
    "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU",
    "UYW", "UZS", "VED", "VES", "VND", "VUV", "WST", "XAF", "XCD", "XCG",
    "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWG",
];

/// Read-only membership set of currency codes accepted on deals.
///
/// Built once at startup and shared (usually behind an `Arc`) with every validator.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    codes: HashSet<String>
}

impl CurrencyTable {
    /// Builds the table of active ISO 4217 currencies.
    pub fn iso_4217() -> Self {
        Self::from_codes(ISO_4217_ACTIVE.iter().copied())
    }

    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            codes: codes.into_iter().map(|code| code.trim().to_ascii_uppercase()).collect()
        }
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&code.to_ascii_uppercase())
    }
}
