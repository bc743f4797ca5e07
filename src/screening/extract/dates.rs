use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::context_snippet;
use crate::screening::domain::{Confidence, Signal, SignalKind};

/// Employment span candidate, transient within one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    snippet: String,
}

/// "Jan 2019 - Dec 2020", "March 2018 - Present". The end month is optional;
/// a bare end year closes on Dec 31.
static TEXTUAL_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([a-z]{3,9})\s+(\d{4})\s*[-\u{2013}\u{2014}]\s*(?:([a-z]{3,9})\s*)?(\d{4}|present|current)\b")
        .expect("textual range pattern compiles")
});

/// "06/2019 - 08/2021", "06/2019 - Present". A bare end year closes on the
/// last day of December.
static NUMERIC_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})/(\d{4})\s*[-\u{2013}\u{2014}]\s*(?:(\d{1,2})/)?\s*(\d{4}|present|current)\b")
        .expect("numeric range pattern compiles")
});

/// "2019 - 2021", "2019 - Present". Whole calendar years.
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{4})\s*[-\u{2013}\u{2014}]\s*(\d{4}|present|current)\b")
        .expect("year range pattern compiles")
});

/// Fixed month table for the textual pattern; unlisted names discard the
/// candidate rather than aborting the scan.
fn month_number(name: &str) -> Option<u32> {
    match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sept" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn is_open_ended(token: &str) -> bool {
    token.eq_ignore_ascii_case("present") || token.eq_ignore_ascii_case("current")
}

fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next_first.pred_opt()
}

/// Emits the experience estimate plus one audit signal per merged range.
pub(super) fn extract_date_signals(text: &str, today: NaiveDate) -> Vec<Signal> {
    let ranges = merge_ranges(collect_candidates(text, today));

    if ranges.is_empty() {
        return vec![Signal {
            kind: SignalKind::ExperienceYearsEstimate,
            value: "0".to_string(),
            evidence_snippet: "No date ranges detected in resume".to_string(),
            confidence: Confidence::Low,
        }];
    }

    let years = total_months(&ranges) as f64 / 12.0;
    let mut signals = vec![Signal {
        kind: SignalKind::ExperienceYearsEstimate,
        value: format!("{years}"),
        evidence_snippet: ranges[0].snippet.clone(),
        confidence: Confidence::Medium,
    }];

    for range in &ranges {
        signals.push(Signal {
            kind: SignalKind::DateRange,
            value: format!("{} to {}", range.start, range.end),
            evidence_snippet: range.snippet.clone(),
            confidence: Confidence::High,
        });
    }

    signals
}

fn collect_candidates(text: &str, today: NaiveDate) -> Vec<DateRange> {
    let mut candidates = Vec::new();

    for captures in TEXTUAL_RANGE.captures_iter(text) {
        let Some(parsed) = parse_textual(&captures, today) else {
            continue;
        };
        candidates.push(to_range(text, &captures, parsed));
    }

    for captures in NUMERIC_RANGE.captures_iter(text) {
        let Some(parsed) = parse_numeric(&captures, today) else {
            continue;
        };
        candidates.push(to_range(text, &captures, parsed));
    }

    for captures in YEAR_RANGE.captures_iter(text) {
        let Some(parsed) = parse_year_only(&captures, today) else {
            continue;
        };
        candidates.push(to_range(text, &captures, parsed));
    }

    candidates
}

fn to_range(
    text: &str,
    captures: &regex::Captures<'_>,
    (start, end): (NaiveDate, NaiveDate),
) -> DateRange {
    let whole = captures.get(0).expect("match has a whole capture");
    DateRange {
        start,
        end,
        snippet: context_snippet(text, whole.start(), whole.end()),
    }
}

fn parse_textual(
    captures: &regex::Captures<'_>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start_month = month_number(captures.get(1)?.as_str())?;
    let start_year: i32 = captures.get(2)?.as_str().parse().ok()?;
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)?;

    let end_token = captures.get(4)?.as_str();
    let end = if is_open_ended(end_token) {
        today
    } else {
        let end_year: i32 = end_token.parse().ok()?;
        match captures.get(3) {
            Some(month) => NaiveDate::from_ymd_opt(end_year, month_number(month.as_str())?, 1)?,
            None => NaiveDate::from_ymd_opt(end_year, 12, 31)?,
        }
    };

    Some((start, end))
}

fn parse_numeric(
    captures: &regex::Captures<'_>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start_month: u32 = captures.get(1)?.as_str().parse().ok()?;
    let start_year: i32 = captures.get(2)?.as_str().parse().ok()?;
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)?;

    let end_token = captures.get(4)?.as_str();
    let end = if is_open_ended(end_token) {
        today
    } else {
        let end_year: i32 = end_token.parse().ok()?;
        let end_month = match captures.get(3) {
            Some(month) => month.as_str().parse().ok()?,
            None => 12,
        };
        end_of_month(end_year, end_month)?
    };

    Some((start, end))
}

fn parse_year_only(
    captures: &regex::Captures<'_>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start_year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;

    let end_token = captures.get(2)?.as_str();
    let end = if is_open_ended(end_token) {
        today
    } else {
        let end_year: i32 = end_token.parse().ok()?;
        NaiveDate::from_ymd_opt(end_year, 12, 31)?
    };

    Some((start, end))
}

/// Coalesces overlapping or touching spans, keeping the earliest start and
/// the snippet of the first range in each merge chain.
fn merge_ranges(mut ranges: Vec<DateRange>) -> Vec<DateRange> {
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_by(|a, b| a.start.cmp(&b.start));

    let mut merged = Vec::new();
    let mut current = ranges.remove(0);

    for next in ranges {
        if current.end >= next.start {
            if next.end > current.end {
                current.end = next.end;
            }
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}

/// Months covered by the merged spans, inclusive of both endpoint months.
fn total_months(ranges: &[DateRange]) -> i64 {
    use chrono::Datelike;

    ranges
        .iter()
        .map(|range| {
            let years = i64::from(range.end.year()) - i64::from(range.start.year());
            let months = i64::from(range.end.month()) - i64::from(range.start.month());
            years * 12 + months + 1
        })
        .sum()
}
