//! Core card types: the `CardBrand` enum and the generated `CardRecord`.

use serde::{Serialize, Serializer};
use std::fmt;

/// Card brands recognized by the classifier.
///
/// `Unknown` is returned when no BIN rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Visa - Prefix 4
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 644000-649999, 65
    Discover,
    /// Diners Club - Prefix 30, 36, 38, length 14
    DinersClub,
    /// JCB - Prefix 35
    Jcb,
    /// Dankort - Prefix 5019
    Dankort,
    /// Visa Electron - Prefix 4026, 4175, 4405, 4508, 4844, 4913, 4917
    VisaElectron,
    /// No rule matched.
    Unknown,
}

impl CardBrand {
    /// Every brand, in classification priority order, followed by `Unknown`.
    pub const ALL: [CardBrand; 9] = [
        CardBrand::Visa,
        CardBrand::Mastercard,
        CardBrand::Amex,
        CardBrand::Discover,
        CardBrand::DinersClub,
        CardBrand::Jcb,
        CardBrand::Dankort,
        CardBrand::VisaElectron,
        CardBrand::Unknown,
    ];

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::Dankort => "Dankort",
            Self::VisaElectron => "Visa Electron",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the CVV length for this brand: 4 for American Express, 3 otherwise.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    /// Returns true unless this is `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for CardBrand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A generated test card.
///
/// Records are built once by the generator and never change afterwards.
/// `formatted` is always `card_number|month|year|cvv`.
///
/// Serializes with camelCase keys:
/// `{cardNumber, month, year, cvv, cardType, formatted}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    card_number: String,
    month: String,
    year: String,
    cvv: String,
    card_type: CardBrand,
    formatted: String,
}

impl CardRecord {
    /// Assembles a record from already-resolved fields.
    ///
    /// # Example
    ///
    /// ```
    /// use cc_generator::{CardBrand, CardRecord};
    ///
    /// let record = CardRecord::new("4111111111111111", "12", "30", "123", CardBrand::Visa);
    /// assert_eq!(record.formatted(), "4111111111111111|12|30|123");
    /// ```
    pub fn new(
        card_number: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
        cvv: impl Into<String>,
        card_type: CardBrand,
    ) -> Self {
        let card_number = card_number.into();
        let month = month.into();
        let year = year.into();
        let cvv = cvv.into();
        let formatted = format!("{}|{}|{}|{}", card_number, month, year, cvv);

        Self {
            card_number,
            month,
            year,
            cvv,
            card_type,
            formatted,
        }
    }

    /// Returns the card number digits.
    #[inline]
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Returns the two-digit expiry month.
    #[inline]
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Returns the two-digit expiry year.
    #[inline]
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Returns the CVV.
    #[inline]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Returns the detected brand.
    #[inline]
    pub fn card_type(&self) -> CardBrand {
        self.card_type
    }

    /// Returns the canonical pipe-joined form.
    #[inline]
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub fn length(&self) -> usize {
        self.card_number.len()
    }

    /// Returns the expiry as `MM/YY`.
    pub fn expiry(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted)
    }
}
