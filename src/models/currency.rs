//! ISO 4217 currency codes supported by the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A supported ISO 4217 currency.
///
/// The set is closed: it covers the currencies quoted in the ECB reference
/// rate history, including legacy codes that were later replaced by the euro.
///
/// # Example
///
/// ```
/// use salary_normalizer::models::Currency;
///
/// let currency: Currency = "rub".parse().unwrap();
/// assert_eq!(currency, Currency::Rub);
/// assert_eq!(currency.to_string(), "RUB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Russian rouble.
    Rub,
    /// US dollar.
    Usd,
    /// Brazilian real.
    Brl,
    /// Philippine peso.
    Php,
    /// Swedish krona.
    Sek,
    /// Mexican peso.
    Mxn,
    /// Hong Kong dollar.
    Hkd,
    /// Israeli new shekel.
    Ils,
    /// Indonesian rupiah.
    Idr,
    /// New Zealand dollar.
    Nzd,
    /// Malaysian ringgit.
    Myr,
    /// Slovak koruna (legacy).
    Skk,
    /// Latvian lats (legacy).
    Lvl,
    /// Czech koruna.
    Czk,
    /// Cypriot pound (legacy).
    Cyp,
    /// Australian dollar.
    Aud,
    /// Singapore dollar.
    Sgd,
    /// Thai baht.
    Thb,
    /// Indian rupee.
    Inr,
    /// Pound sterling.
    Gbp,
    /// Maltese lira (legacy).
    Mtl,
    /// Euro.
    Eur,
    /// Icelandic krona.
    Isk,
    /// Polish zloty.
    Pln,
    /// Croatian kuna (legacy).
    Hrk,
    /// South Korean won.
    Krw,
    /// Romanian leu.
    Ron,
    /// Bulgarian lev.
    Bgn,
    /// Slovenian tolar (legacy).
    Sit,
    /// Lithuanian litas (legacy).
    Ltl,
    /// Norwegian krone.
    Nok,
    /// Chinese yuan.
    Cny,
    /// Romanian leu before 2005 redenomination (legacy).
    Rol,
    /// Turkish lira.
    Try,
    /// Turkish lira before 2005 redenomination (legacy).
    Trl,
    /// Hungarian forint.
    Huf,
    /// Japanese yen.
    Jpy,
    /// Canadian dollar.
    Cad,
    /// Estonian kroon (legacy).
    Eek,
    /// Danish krone.
    Dkk,
    /// South African rand.
    Zar,
    /// Swiss franc.
    Chf,
}

impl Currency {
    /// Every supported currency, in declaration order.
    pub const ALL: [Currency; 42] = [
        Currency::Rub,
        Currency::Usd,
        Currency::Brl,
        Currency::Php,
        Currency::Sek,
        Currency::Mxn,
        Currency::Hkd,
        Currency::Ils,
        Currency::Idr,
        Currency::Nzd,
        Currency::Myr,
        Currency::Skk,
        Currency::Lvl,
        Currency::Czk,
        Currency::Cyp,
        Currency::Aud,
        Currency::Sgd,
        Currency::Thb,
        Currency::Inr,
        Currency::Gbp,
        Currency::Mtl,
        Currency::Eur,
        Currency::Isk,
        Currency::Pln,
        Currency::Hrk,
        Currency::Krw,
        Currency::Ron,
        Currency::Bgn,
        Currency::Sit,
        Currency::Ltl,
        Currency::Nok,
        Currency::Cny,
        Currency::Rol,
        Currency::Try,
        Currency::Trl,
        Currency::Huf,
        Currency::Jpy,
        Currency::Cad,
        Currency::Eek,
        Currency::Dkk,
        Currency::Zar,
        Currency::Chf,
    ];

    /// Returns the three-letter ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Brl => "BRL",
            Currency::Php => "PHP",
            Currency::Sek => "SEK",
            Currency::Mxn => "MXN",
            Currency::Hkd => "HKD",
            Currency::Ils => "ILS",
            Currency::Idr => "IDR",
            Currency::Nzd => "NZD",
            Currency::Myr => "MYR",
            Currency::Skk => "SKK",
            Currency::Lvl => "LVL",
            Currency::Czk => "CZK",
            Currency::Cyp => "CYP",
            Currency::Aud => "AUD",
            Currency::Sgd => "SGD",
            Currency::Thb => "THB",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
            Currency::Mtl => "MTL",
            Currency::Eur => "EUR",
            Currency::Isk => "ISK",
            Currency::Pln => "PLN",
            Currency::Hrk => "HRK",
            Currency::Krw => "KRW",
            Currency::Ron => "RON",
            Currency::Bgn => "BGN",
            Currency::Sit => "SIT",
            Currency::Ltl => "LTL",
            Currency::Nok => "NOK",
            Currency::Cny => "CNY",
            Currency::Rol => "ROL",
            Currency::Try => "TRY",
            Currency::Trl => "TRL",
            Currency::Huf => "HUF",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Eek => "EEK",
            Currency::Dkk => "DKK",
            Currency::Zar => "ZAR",
            Currency::Chf => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(EngineError::UnsupportedCurrency { code })
    }
}
