//! Rendering card records as text.
//!
//! # Formats
//!
//! - **pipe**: `card_number|month|year|cvv`
//! - **json**: pretty-printed record
//! - **csv**: `cardNumber,month,year,cvv,cardType`
//! - **formatted**: `4111 1111 1111 1111 12/30 123`
//!
//! # Example
//!
//! ```
//! use cc_generator::export::{export, ExportFormat};
//! use cc_generator::{CardBrand, CardRecord};
//!
//! let record = CardRecord::new("4111111111111111", "12", "30", "123", CardBrand::Visa);
//!
//! assert_eq!(export(&record, ExportFormat::Pipe), "4111111111111111|12|30|123");
//! assert_eq!(export(&record, ExportFormat::Csv), "4111111111111111,12,30,123,Visa");
//! assert_eq!(export(&record, ExportFormat::Formatted), "4111 1111 1111 1111 12/30 123");
//! ```

use crate::card::CardRecord;
use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the CSV header row.
pub const CSV_HEADER: [&str; 5] = ["cardNumber", "month", "year", "cvv", "cardType"];

/// Output format for exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `card_number|month|year|cvv`
    #[default]
    Pipe,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
    /// Human-readable, number in blocks of four
    Formatted,
}

impl ExportFormat {
    /// All formats, in display order.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Pipe,
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Formatted,
    ];

    /// Returns the lowercase format name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            ExportFormat::Pipe => "pipe",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Formatted => "formatted",
        }
    }

    /// Parses a format name, falling back to [`ExportFormat::Pipe`] for
    /// anything unrecognized.
    ///
    /// # Example
    ///
    /// ```
    /// use cc_generator::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::parse_or_default("JSON"), ExportFormat::Json);
    /// assert_eq!(ExportFormat::parse_or_default("xml"), ExportFormat::Pipe);
    /// ```
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|error: ExportError| {
            tracing::warn!(%error, "falling back to pipe format");
            ExportFormat::Pipe
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pipe" => Ok(ExportFormat::Pipe),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "formatted" => Ok(ExportFormat::Formatted),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Groups a card number into blocks of four separated by `separator`.
///
/// # Example
///
/// ```
/// use cc_generator::export::group_card_number;
///
/// assert_eq!(group_card_number("4111111111111111", " "), "4111 1111 1111 1111");
/// assert_eq!(group_card_number("378282246310005", "-"), "3782-8224-6310-005");
/// ```
pub fn group_card_number(number: &str, separator: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders one record in the given format.
///
/// JSON and CSV rendering of a record cannot realistically fail; if they
/// do, the error is logged and the pipe form is returned.
pub fn export(record: &CardRecord, format: ExportFormat) -> String {
    let rendered = match format {
        ExportFormat::Pipe => return record.formatted().to_string(),
        ExportFormat::Formatted => return human_readable(record),
        ExportFormat::Json => to_json(record),
        ExportFormat::Csv => csv_rows(std::slice::from_ref(record), false),
    };

    rendered.unwrap_or_else(|error| {
        tracing::warn!(%format, %error, "export failed, using pipe format");
        record.formatted().to_string()
    })
}

/// Renders one record using a format name; unknown names fall back to pipe.
///
/// # Example
///
/// ```
/// use cc_generator::export::export_named;
/// use cc_generator::{CardBrand, CardRecord};
///
/// let record = CardRecord::new("4111111111111111", "12", "30", "123", CardBrand::Visa);
/// assert_eq!(export_named(&record, "yaml"), "4111111111111111|12|30|123");
/// ```
pub fn export_named(record: &CardRecord, name: &str) -> String {
    export(record, ExportFormat::parse_or_default(name))
}

/// Renders many records as one document.
///
/// Pipe and formatted output put one record per line. JSON is a pretty
/// array. CSV starts with a [`CSV_HEADER`] row.
///
/// # Example
///
/// ```
/// use cc_generator::export::{export_batch, ExportFormat};
/// use cc_generator::{CardBrand, CardRecord};
///
/// let records = vec![
///     CardRecord::new("4111111111111111", "12", "30", "123", CardBrand::Visa),
///     CardRecord::new("340000000000009", "01", "29", "1234", CardBrand::Amex),
/// ];
///
/// let csv = export_batch(&records, ExportFormat::Csv).unwrap();
/// assert_eq!(
///     csv,
///     "cardNumber,month,year,cvv,cardType\n\
///      4111111111111111,12,30,123,Visa\n\
///      340000000000009,01,29,1234,American Express"
/// );
/// ```
pub fn export_batch(records: &[CardRecord], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Pipe => Ok(join_lines(records, |r| r.formatted().to_string())),
        ExportFormat::Formatted => Ok(join_lines(records, human_readable)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Csv => csv_rows(records, true),
    }
}

fn join_lines<F>(records: &[CardRecord], render: F) -> String
where
    F: Fn(&CardRecord) -> String,
{
    records.iter().map(render).collect::<Vec<_>>().join("\n")
}

fn human_readable(record: &CardRecord) -> String {
    format!(
        "{} {} {}",
        group_card_number(record.card_number(), " "),
        record.expiry(),
        record.cvv()
    )
}

fn to_json(record: &CardRecord) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn csv_rows(records: &[CardRecord], header: bool) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if header {
        writer.write_record(CSV_HEADER)?;
    }
    for record in records {
        writer.write_record([
            record.card_number(),
            record.month(),
            record.year(),
            record.cvv(),
            record.card_type().name(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}
