use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Period, TypeConstraintError};

/// Reporting window validated for the statistics endpoints.
///
/// Only [`Period::Custom`] carries explicit dates. Both bounds are required
/// and `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatsRange {
    period: Period,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl StatsRange {
    /// A predefined window (today, week or month).
    pub fn preset(period: Period) -> Result<Self, TypeConstraintError> {
        if period == Period::Custom {
            return Err(TypeConstraintError::InvalidDateRange);
        }
        Ok(Self {
            period,
            start_date: None,
            end_date: None,
        })
    }

    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, TypeConstraintError> {
        if start > end {
            return Err(TypeConstraintError::InvalidDateRange);
        }
        Ok(Self {
            period: Period::Custom,
            start_date: Some(start),
            end_date: Some(end),
        })
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_reviewed: u64,
    pub total_reviewed_today: u64,
    pub total_reviewed_this_week: u64,
    pub total_reviewed_this_month: u64,
    pub approved_percentage: f64,
    pub rejected_percentage: f64,
    pub request_changes_percentage: f64,
    /// Seconds.
    pub average_review_time: u64,
}

/// Decisions made on a single day.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    pub date: NaiveDate,
    pub approved: u64,
    pub rejected: u64,
    pub request_changes: u64,
}

impl ActivityData {
    pub fn total(&self) -> u64 {
        self.approved + self.rejected + self.request_changes
    }
}

/// Share of each decision, in percent.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionsData {
    pub approved: f64,
    pub rejected: f64,
    pub request_changes: f64,
}

/// Reviewed advertisements per category name.
pub type CategoryStats = BTreeMap<String, u64>;
