//! DTOs shaped for the statistics template.

use serde::Serialize;

use crate::domain::types::Period;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryView {
    pub total_reviewed: u64,
    pub approved_percentage: f64,
    pub rejected_percentage: f64,
    pub request_changes_percentage: f64,
    /// Minutes, rounded to one decimal.
    pub average_review_minutes: f64,
}

/// Total decisions of one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityPoint {
    pub date: String,
    pub total: u64,
}

/// Slice of the decisions pie chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DecisionSlice {
    pub name: &'static str,
    pub value: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryPoint {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PeriodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the statistics page.
#[derive(Debug)]
pub struct StatsPageData {
    pub period: Period,
    pub periods: Vec<PeriodOption>,
    pub start_date: String,
    pub end_date: String,
    pub summary: Option<SummaryView>,
    pub activity: Vec<ActivityPoint>,
    pub decisions: Vec<DecisionSlice>,
    pub categories: Vec<CategoryPoint>,
}
