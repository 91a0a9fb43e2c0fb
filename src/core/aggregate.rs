//! Aggregation engine: label → count pairs for the dashboard and timeline.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;

use super::model::Profile;

/// Bucket label for records missing the grouping attribute.
///
/// Counted explicitly so aggregate totals always equal the store length.
pub const NONE_LABEL: &str = "(none)";

/// Attribute the bar chart groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    SearchTerm,
    Date,
    Type,
    Source,
}

impl GroupBy {
    pub const ALL: [GroupBy; 4] = [
        GroupBy::SearchTerm,
        GroupBy::Date,
        GroupBy::Type,
        GroupBy::Source,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::SearchTerm => "Search Term",
            GroupBy::Date => "Date",
            GroupBy::Type => "Type",
            GroupBy::Source => "Source",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&g| g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&g| g == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Group the full (unfiltered) record sequence into (label, count) pairs.
///
/// `Date` extracts the calendar date of `createdAt`, labels it `M/D/YYYY`,
/// and orders labels chronologically ascending with the `(none)` bucket
/// last. The categorical groupings order labels by first occurrence.
/// Every record is counted exactly once.
pub fn aggregate(profiles: &[Profile], group_by: GroupBy) -> Vec<(String, u64)> {
    match group_by {
        GroupBy::Date => aggregate_by_date(profiles),
        GroupBy::SearchTerm => aggregate_by(profiles, |p| p.search_term.as_deref()),
        GroupBy::Type => aggregate_by(profiles, |p| p.kind.as_deref()),
        GroupBy::Source => aggregate_by(profiles, |p| p.source.as_deref()),
    }
}

fn aggregate_by<'a>(
    profiles: &'a [Profile],
    attr: impl Fn(&'a Profile) -> Option<&'a str>,
) -> Vec<(String, u64)> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for profile in profiles {
        let label = attr(profile).unwrap_or(NONE_LABEL);
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

fn aggregate_by_date(profiles: &[Profile]) -> Vec<(String, u64)> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut unknown = 0u64;

    for profile in profiles {
        match profile.created_at.as_deref().and_then(parse_date) {
            Some(date) => *by_date.entry(date).or_insert(0) += 1,
            None => unknown += 1,
        }
    }

    let mut out: Vec<(String, u64)> = by_date
        .into_iter()
        .map(|(date, count)| (date.format("%-m/%-d/%Y").to_string(), count))
        .collect();
    if unknown > 0 {
        out.push((NONE_LABEL.to_string(), unknown));
    }
    out
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
}

/// Daily counts for one exact search term.
///
/// Labels are the date-only prefix of `createdAt` (the part before `T`),
/// in first-encountered order — deliberately not unified with the
/// chronologically sorted `Date` grouping above.
pub fn term_series(profiles: &[Profile], term: &str) -> Vec<(String, u64)> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for profile in profiles
        .iter()
        .filter(|p| p.search_term.as_deref() == Some(term))
    {
        let label = profile
            .created_at
            .as_deref()
            .map(|c| c.split('T').next().unwrap_or(c).to_string())
            .unwrap_or_else(|| NONE_LABEL.to_string());
        *counts.entry(label).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
