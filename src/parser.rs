//! Turns one free-text availability cell ("9AM-12PM", "1-3PM, 4-5PM",
//! "on leave") into 24-hour [`TimeRange`]s.
//!
//! Parsing never fails as a whole. A fragment that does not look like a time
//! range is skipped, and [`parse_cell_report`] tells you which ones were.

use crate::time::{Hour, TimeRange};
use log::trace;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Any of these anywhere in a cell marks the whole date as unavailable,
/// even when a time range is written next to it.
pub const UNAVAILABLE_KEYWORDS: [&str; 6] =
    ["NA", "N/A", "ON LEAVE", "LEAVE", "UNAVAILABLE", "OFF"];

fn time_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // `[0-9]`, not `\d`: only ASCII digits are read as hours
        Regex::new(r"([0-9]+)\s*(AM|PM)?\s*[-–]\s*([0-9]+)\s*(AM|PM)")
            .expect("time range pattern compiles")
    })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No time range found in \"{fragment}\"")]
    NoTimeRange { fragment: String },
    #[error("Hour does not fit on a clock in \"{fragment}\"")]
    HourOutOfRange { fragment: String },
}

impl ParseError {
    /// The (upper-cased, trimmed) fragment that was skipped
    pub fn fragment(&self) -> &str {
        match self {
            ParseError::NoTimeRange { fragment } | ParseError::HourOutOfRange { fragment } => {
                fragment
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_capture(text: &str) -> Meridiem {
        if text == "PM" {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    /// Moves a 12-hour clock value into 24-hour space
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::parser::Meridiem;
    ///
    /// assert_eq!(Meridiem::Am.to_24h(12), Some(0));
    /// assert_eq!(Meridiem::Am.to_24h(9), Some(9));
    /// assert_eq!(Meridiem::Pm.to_24h(12), Some(12));
    /// assert_eq!(Meridiem::Pm.to_24h(3), Some(15));
    /// ```
    pub fn to_24h(self, hour: Hour) -> Option<Hour> {
        match self {
            Meridiem::Pm if hour != 12 => hour.checked_add(12),
            Meridiem::Am if hour == 12 => Some(0),
            _ => Some(hour),
        }
    }
}

/// Everything learned from one cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCell {
    /// Ranges in the order they were written, duplicates included
    pub ranges: Vec<TimeRange<Hour>>,
    /// Fragments that yielded no range
    pub skipped: Vec<ParseError>,
    /// An unavailability keyword was found, nothing else was looked at
    pub marked_unavailable: bool,
}

/// Parses a cell into its time ranges. An empty result means the person
/// is unavailable on that date.
///
/// # Examples
/// ```
/// use zeitfenster::parser::parse_cell;
/// use zeitfenster::time::TimeRange;
///
/// assert_eq!(parse_cell("9AM-12PM"), vec![TimeRange::new(9, 12)]);
/// assert_eq!(parse_cell("1-3pm; 4-5PM"), vec![TimeRange::new(13, 15), TimeRange::new(16, 17)]);
/// assert!(parse_cell("On Leave").is_empty());
/// ```
pub fn parse_cell(cell: &str) -> Vec<TimeRange<Hour>> {
    parse_cell_report(cell).ranges
}

/// Like [`parse_cell`], but also reports the fragments that were skipped.
///
/// ```
/// use zeitfenster::parser::{parse_cell_report, ParseError};
///
/// let parsed = parse_cell_report("9AM-12PM, after lunch");
///
/// assert_eq!(parsed.ranges.len(), 1);
/// assert_eq!(
///     parsed.skipped,
///     vec![ParseError::NoTimeRange { fragment: "AFTER LUNCH".to_string() }]
/// );
/// ```
pub fn parse_cell_report(cell: &str) -> ParsedCell {
    let text = cell.trim().to_uppercase();

    if let Some(keyword) = UNAVAILABLE_KEYWORDS.iter().find(|&&k| text.contains(k)) {
        trace!(keyword = *keyword; "cell marked unavailable");
        return ParsedCell {
            marked_unavailable: true,
            ..ParsedCell::default()
        };
    }

    let mut parsed = ParsedCell::default();

    for fragment in text
        .split(|c: char| c == ',' || c == ';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
    {
        match parse_fragment(fragment) {
            Ok(range) => parsed.ranges.push(range),
            Err(error) => {
                trace!(fragment = fragment; "skipping unparseable availability fragment");
                parsed.skipped.push(error);
            }
        }
    }

    parsed
}

/// Reads the first `<hour>[AM|PM] - <hour>AM|PM` found in an upper-cased
/// fragment.
///
/// The end period is required. A missing start period is taken to be PM
/// when the end is PM and the start is below 12, so "9-12PM" reads as
/// `(21, 12)`. Such inverted ranges are returned as they are.
fn parse_fragment(fragment: &str) -> Result<TimeRange<Hour>, ParseError> {
    let captures = time_range_pattern()
        .captures(fragment)
        .ok_or_else(|| ParseError::NoTimeRange {
            fragment: fragment.to_string(),
        })?;

    let out_of_range = || ParseError::HourOutOfRange {
        fragment: fragment.to_string(),
    };

    let start: Hour = captures[1].parse().map_err(|_| out_of_range())?;
    let end: Hour = captures[3].parse().map_err(|_| out_of_range())?;
    let end_period = Meridiem::from_capture(&captures[4]);

    let end = end_period.to_24h(end).ok_or_else(out_of_range)?;
    let start = match captures.get(2) {
        Some(period) => Meridiem::from_capture(period.as_str())
            .to_24h(start)
            .ok_or_else(out_of_range)?,
        None if end_period == Meridiem::Pm && start < 12 => start + 12,
        None => start,
    };

    Ok(TimeRange::new(start, end))
}
