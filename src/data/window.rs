//! # Time Window Filter
//!
//! Selects the reviews dated within one calendar month.

use super::store::Review;
use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Three-letter month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FULL_MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A calendar month of a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    year: i32,
    month: u32,
}

/// Unchecked wire form of [`TimeWindow`]
#[derive(Deserialize)]
struct RawWindow {
    year: i32,
    month: u32,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = PipelineError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl TimeWindow {
    /// Create a window, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PipelineError::InvalidWindow { year, month });
        }
        Ok(Self { year, month })
    }

    /// Create a window from a month given as name (`Jan`, `january`) or number (`1`, `01`)
    pub fn parse(year: i32, month: &str) -> Result<Self> {
        let number = parse_month(month).ok_or_else(|| PipelineError::UnknownMonth {
            input: month.trim().to_string(),
        })?;
        Self::new(year, number)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Short month name, e.g. `Mar`
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Check whether a review date falls in this window
    pub fn contains(&self, date: &str) -> bool {
        year_month(date) == Some((self.year, self.month))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Parse a month into 1..=12.
///
/// Accepts a number, a three-letter abbreviation or a full English name,
/// ignoring case. Other spellings are rejected.
pub fn parse_month(input: &str) -> Option<u32> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    let lower = input.to_lowercase();
    MONTH_NAMES
        .iter()
        .zip(FULL_MONTH_NAMES.iter())
        .position(|(short, full)| lower == short.to_lowercase() || lower == *full)
        .map(|idx| idx as u32 + 1)
}

/// Extract `(year, month)` from the `YYYY-MM` prefix of an ISO date.
///
/// Anything after the month must be absent or start with `-`.
pub fn year_month(date: &str) -> Option<(i32, u32)> {
    let date = date.trim();
    let bytes = date.as_bytes();
    if bytes.len() < 7 || bytes[4] != b'-' {
        return None;
    }
    if bytes.len() > 7 && bytes[7] != b'-' {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !digits(0..4) || !digits(5..7) {
        return None;
    }

    let year: i32 = date[0..4].parse().ok()?;
    let month: u32 = date[5..7].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}

/// Reviews selected for one window, in store order
#[derive(Debug, Clone)]
pub struct WindowSelection<'a> {
    pub window: TimeWindow,
    pub reviews: Vec<&'a Review>,
    /// Rows skipped because their date has no valid `YYYY-MM` prefix
    pub malformed: usize,
}

impl WindowSelection<'_> {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Review texts in selection order
    pub fn texts(&self) -> Vec<String> {
        self.reviews.iter().map(|r| r.text.clone()).collect()
    }
}

/// Stable filter of `reviews` down to those dated within `window`.
///
/// Malformed dates are excluded and logged, never treated as errors.
pub fn filter_reviews(reviews: &[Review], window: TimeWindow) -> WindowSelection<'_> {
    let mut selected = Vec::new();
    let mut malformed = 0;

    for (index, review) in reviews.iter().enumerate() {
        match year_month(&review.date) {
            Some(ym) if ym == (window.year, window.month) => selected.push(review),
            Some(_) => {}
            None => {
                malformed += 1;
                warn!(index, date = %review.date, "dropping review with malformed date");
            }
        }
    }

    WindowSelection {
        window,
        reviews: selected,
        malformed,
    }
}
