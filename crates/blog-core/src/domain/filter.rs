//! Query predicates over blogs: author, title and creation date.
//!
//! Calendar dates are UTC days. A date `d` covers the half-open interval
//! `[d 00:00, d+1 00:00)`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::DomainError;

use super::blog::Blog;

/// Wire format of date query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required `YYYY-MM-DD` query parameter named `param`.
pub fn parse_date(param: &str, value: Option<&str>) -> Result<NaiveDate, DomainError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::BadRequest(format!("Missing '{param}' query parameter")))?;

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        DomainError::BadRequest(format!(
            "Invalid '{param}' value '{raw}': expected YYYY-MM-DD"
        ))
    })
}

/// Creation-date selections exposed by the filter endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Created on this day.
    On(NaiveDate),
    /// Created on any day in `[start, end]`.
    Between { start: NaiveDate, end: NaiveDate },
    /// Created on a day strictly after this one.
    After(NaiveDate),
    /// Created on a day strictly before this one.
    Before(NaiveDate),
}

impl DateFilter {
    /// The timestamp window matching this filter, or `None` if no timestamp
    /// can match (for example a range whose start is after its end).
    pub fn window(&self) -> Option<CreatedWindow> {
        match *self {
            DateFilter::On(day) => Some(CreatedWindow {
                from: Some(start_of(day)),
                until: day.succ_opt().map(start_of),
            }),
            DateFilter::Between { start, end } if start > end => None,
            DateFilter::Between { start, end } => Some(CreatedWindow {
                from: Some(start_of(start)),
                until: end.succ_opt().map(start_of),
            }),
            DateFilter::After(day) => day.succ_opt().map(|next| CreatedWindow {
                from: Some(start_of(next)),
                until: None,
            }),
            DateFilter::Before(day) => Some(CreatedWindow {
                from: None,
                until: Some(start_of(day)),
            }),
        }
    }
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open creation window `[from, until)`. Missing bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedWindow {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl CreatedWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.until.is_none_or(|until| at < until)
    }
}

/// Conjunction of predicates applied by `BlogRepository::find`.
/// The default filter matches every blog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub author_id: Option<i64>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub created: Option<CreatedWindow>,
}

impl BlogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn created_within(mut self, window: CreatedWindow) -> Self {
        self.created = Some(window);
        self
    }

    /// Evaluate the filter against a single blog. Used by stores that
    /// cannot push predicates down to a query engine.
    pub fn matches(&self, blog: &Blog) -> bool {
        if self.author_id.is_some_and(|id| id != blog.author_id) {
            return false;
        }
        if let Some(needle) = &self.title {
            if !blog.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        self.created.is_none_or(|w| w.contains(blog.created_at))
    }
}
