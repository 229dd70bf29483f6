use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::billing::LineItem;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            date_format: DateFormatStyle::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum DateFormatStyle {
    Short,
    Medium,
    Long,
}

/// External provider of conversion multipliers. Rates come from outside the
/// crate; implementations may consult a service, a cache, or a fixed table.
pub trait RateSource {
    /// Multiplier that converts an amount in `from` into `to`, or `None` when
    /// the provider has no rate for the pair.
    fn multiplier(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64>;
}

/// Rescales unit prices and per-line discounts by an opaque multiplier.
///
/// Quantities and tax rates are unit-free and stay put. A non-finite or
/// non-positive multiplier leaves the lines unchanged.
pub fn rescale_lines(lines: &[LineItem], multiplier: f64) -> Vec<LineItem> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return lines.to_vec();
    }
    lines
        .iter()
        .map(|line| LineItem {
            unit_price: line.unit_price * multiplier,
            line_discount: line.line_discount * multiplier,
            ..*line
        })
        .collect()
}

/// Converts line amounts between currencies through a `RateSource`.
///
/// Returns `None` when the provider has no rate for the pair. Same-currency
/// conversion is parity and never consults the provider.
pub fn convert_lines(
    lines: &[LineItem],
    from: &CurrencyCode,
    to: &CurrencyCode,
    source: &dyn RateSource,
) -> Option<Vec<LineItem>> {
    if from == to {
        return Some(lines.to_vec());
    }
    let multiplier = source.multiplier(from, to)?;
    Some(rescale_lines(lines, multiplier))
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "CAD" => "CAD".into(),
        "AUD" => "A$".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    if let Some(pos) = body.find(locale.decimal_separator) {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, locale.grouping_separator);
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, locale.grouping_separator);
    }
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned, separator);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

/// Renders an amount for invoice display with the currency's symbol and minor
/// units.
pub fn format_amount(code: &CurrencyCode, locale: &LocaleConfig, value: f64) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, value.abs(), precision);
    let symbol = symbol_for(code.as_str());
    if value < 0.0 {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
        DateFormatStyle::Long => format!(
            "{} {}, {}",
            date.weekday(),
            month_label(date.month()),
            date.year()
        ),
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
