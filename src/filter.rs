//! List filtering shared by the API and the client-side list store
//!
//! Filtering is a pure function of a fetched collection and a set of criteria:
//! it never touches the collection it reads and recomputes from scratch on
//! every call. Inactive criteria (empty query, [`Selector::All`],
//! [`Period::Any`]) always match.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Value of the category/status drop-down meaning "no restriction"
pub const SELECTOR_ALL: &str = "all";

/// A record that can be narrowed down by the list filters
pub trait Searchable {
    /// Fields matched (case-insensitively) against the free-text query
    fn search_fields(&self) -> Vec<&str>;

    /// Category or status label compared against the selector
    fn selector_value(&self) -> Option<&str> {
        None
    }

    /// Date compared against the month / range period
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Category / status equality selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Value(String),
}

impl Selector {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selector::All,
            Some(v) if v.eq_ignore_ascii_case(SELECTOR_ALL) => Selector::All,
            Some(v) => Selector::Value(v.to_string()),
        }
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selector::All => true,
            Selector::Value(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Date restriction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Any,
    Month { year: i32, month: u32 },
    /// Inclusive on both ends; an open end is unbounded
    Range { from: Option<NaiveDate>, to: Option<NaiveDate> },
}

impl Period {
    fn matches(&self, date: Option<NaiveDate>) -> bool {
        match self {
            Period::Any => true,
            Period::Month { year, month } => {
                date.is_some_and(|d| d.year() == *year && d.month() == *month)
            }
            Period::Range { from, to } => date.is_some_and(|d| {
                from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t)
            }),
        }
    }
}

/// Complete filter state of a list page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub selector: Selector,
    pub period: Period,
}

impl FilterCriteria {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn selector(mut self, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.selector = Selector::parse(Some(value.as_str()));
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// True when no criterion restricts the collection
    pub fn is_inactive(&self) -> bool {
        self.query.trim().is_empty() && self.selector == Selector::All && self.period == Period::Any
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.matches_query(record)
            && self.selector.matches(record.selector_value())
            && self.period.matches(record.record_date())
    }

    fn matches_query<T: Searchable>(&self, record: &T) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Borrow the records matching every active criterion, preserving order
pub fn apply<'a, T: Searchable>(records: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    records.iter().filter(|r| criteria.matches(*r)).collect()
}

/// Owned variant used by the API handlers on a freshly fetched list
pub fn retain_matching<T: Searchable>(records: Vec<T>, criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_inactive() {
        return records;
    }
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

/// Filter query parameters accepted by every list endpoint
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct FilterQuery {
    /// Free-text search
    pub q: Option<String>,
    /// Category / status label, or "all"
    pub selector: Option<String>,
    /// Month (YYYY-MM)
    pub month: Option<String>,
    /// Range start (YYYY-MM-DD)
    pub from: Option<String>,
    /// Range end (YYYY-MM-DD)
    pub to: Option<String>,
}

impl FilterQuery {
    /// Validate the raw parameters into criteria. A month takes precedence over a range.
    pub fn to_criteria(&self) -> AppResult<FilterCriteria> {
        let from = self.from.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let to = self.to.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let period = if let Some(month) = self.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            parse_month(month)?
        } else if from.is_some() || to.is_some() {
            Period::Range {
                from: from.map(|s| crate::models::parse_date("from", s)).transpose()?,
                to: to.map(|s| crate::models::parse_date("to", s)).transpose()?,
            }
        } else {
            Period::Any
        };

        Ok(FilterCriteria {
            query: self.q.clone().unwrap_or_default(),
            selector: Selector::parse(self.selector.as_deref()),
            period,
        })
    }
}

fn parse_month(raw: &str) -> AppResult<Period> {
    let invalid = || AppError::Validation(format!("Invalid month '{}' (use YYYY-MM)", raw));
    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(Period::Month { year, month })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        title: &'static str,
        reporter: &'static str,
        status: &'static str,
        date: Option<NaiveDate>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.title, self.reporter]
        }

        fn selector_value(&self) -> Option<&str> {
            Some(self.status)
        }

        fn record_date(&self) -> Option<NaiveDate> {
            self.date
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { title: "ILS glide path alarm", reporter: "Tower", status: "Baru", date: day(2024, 3, 2) },
            Row { title: "X-Ray belt stuck", reporter: "Aviation Security", status: "Diproses", date: day(2024, 3, 28) },
            Row { title: "FIDS screen dark", reporter: "Terminal", status: "Selesai", date: day(2024, 4, 1) },
        ]
    }

    #[test]
    fn test_status_selector_keeps_single_match() {
        let rows = rows();
        let result = apply(&rows, &FilterCriteria::default().selector("Diproses"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, "Diproses");
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let rows = rows();
        assert_eq!(apply(&rows, &FilterCriteria::default()).len(), rows.len());
        assert_eq!(apply(&rows, &FilterCriteria::default().query("   ")).len(), rows.len());
        assert_eq!(apply(&rows, &FilterCriteria::default().selector("all")).len(), rows.len());
    }

    #[test]
    fn test_query_matches_any_field_case_insensitive() {
        let rows = rows();
        let by_title = apply(&rows, &FilterCriteria::default().query("x-ray"));
        assert_eq!(by_title.len(), 1);
        let by_reporter = apply(&rows, &FilterCriteria::default().query("TERMINAL"));
        assert_eq!(by_reporter[0].title, "FIDS screen dark");
    }

    #[test]
    fn test_filter_is_idempotent_and_pure() {
        let rows = rows();
        let snapshot = rows.clone();
        let criteria = FilterCriteria::default()
            .query("a")
            .period(Period::Month { year: 2024, month: 3 });
        let first = apply(&rows, &criteria);
        let second = apply(&rows, &criteria);
        assert_eq!(first, second);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn test_month_and_range_periods() {
        let rows = rows();
        let march = apply(&rows, &FilterCriteria::default().period(Period::Month { year: 2024, month: 3 }));
        assert_eq!(march.len(), 2);

        let range = Period::Range { from: day(2024, 3, 28), to: day(2024, 4, 1) };
        let in_range = apply(&rows, &FilterCriteria::default().period(range));
        assert_eq!(in_range.len(), 2);

        let open_end = Period::Range { from: day(2024, 4, 1), to: None };
        assert_eq!(apply(&rows, &FilterCriteria::default().period(open_end)).len(), 1);
    }

    #[test]
    fn test_undated_record_excluded_by_active_period() {
        let rows = vec![Row { title: "t", reporter: "r", status: "Baru", date: None }];
        let criteria = FilterCriteria::default().period(Period::Month { year: 2024, month: 1 });
        assert!(apply(&rows, &criteria).is_empty());
    }

    #[test]
    fn test_all_criteria_must_match() {
        let rows = rows();
        let criteria = FilterCriteria::default().query("tower").selector("Selesai");
        assert!(apply(&rows, &criteria).is_empty());
    }

    #[test]
    fn test_query_params_to_criteria() {
        let query = FilterQuery {
            q: Some("ils".to_string()),
            selector: Some("all".to_string()),
            month: Some("2024-03".to_string()),
            ..Default::default()
        };
        let criteria = query.to_criteria().unwrap();
        assert_eq!(criteria.selector, Selector::All);
        assert_eq!(criteria.period, Period::Month { year: 2024, month: 3 });

        let bad = FilterQuery { month: Some("2024-13".to_string()), ..Default::default() };
        assert!(bad.to_criteria().is_err());
    }

    #[test]
    fn test_blank_form_fields_are_inactive() {
        let query = FilterQuery {
            q: Some(String::new()),
            selector: Some("all".to_string()),
            month: Some(String::new()),
            from: Some(String::new()),
            to: Some(" ".to_string()),
        };
        let criteria = query.to_criteria().unwrap();
        assert!(criteria.is_inactive());
        assert_eq!(apply(&rows(), &criteria).len(), rows().len());

        let half_open = FilterQuery {
            from: Some("2024-03-28".to_string()),
            to: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            half_open.to_criteria().unwrap().period,
            Period::Range { from: day(2024, 3, 28), to: None }
        );
    }

    #[test]
    fn test_retain_matching_owned() {
        let kept = retain_matching(rows(), &FilterCriteria::default().selector("Baru"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "ILS glide path alarm");
    }
}
