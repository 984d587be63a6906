//! Statistics page.
//!
//! The four widgets are loaded independently; a failing endpoint leaves its
//! widget empty instead of failing the page.

use chrono::{Days, NaiveDate};

use crate::domain::stats::{DecisionsData, StatsRange, StatsSummary};
use crate::domain::types::Period;
use crate::dto::stats::{
    ActivityPoint, CategoryPoint, DecisionSlice, PeriodOption, StatsPageData, SummaryView,
};
use crate::forms::stats::{DEFAULT_CUSTOM_DAYS, StatsForm};
use crate::query::ClosedSet;
use crate::repository::StatsReader;
use crate::services::{ServiceError, ServiceResult};

pub const APPROVED_COLOR: &str = "#0ED864";
pub const REJECTED_COLOR: &str = "#FF5353";
pub const REQUEST_CHANGES_COLOR: &str = "#F8B324";

/// Rounds half away from zero to `digits` decimals.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

pub fn summary_view(summary: &StatsSummary) -> SummaryView {
    SummaryView {
        total_reviewed: summary.total_reviewed,
        approved_percentage: round_to(summary.approved_percentage, 1),
        rejected_percentage: round_to(summary.rejected_percentage, 1),
        request_changes_percentage: round_to(summary.request_changes_percentage, 1),
        average_review_minutes: round_to(summary.average_review_time as f64 / 60.0, 1),
    }
}

pub fn decision_slices(decisions: &DecisionsData) -> Vec<DecisionSlice> {
    vec![
        DecisionSlice {
            name: "Одобрено",
            value: round_to(decisions.approved, 2),
            fill: APPROVED_COLOR,
        },
        DecisionSlice {
            name: "Отказано",
            value: round_to(decisions.rejected, 2),
            fill: REJECTED_COLOR,
        },
        DecisionSlice {
            name: "Отправлено на доработку",
            value: round_to(decisions.request_changes, 2),
            fill: REQUEST_CHANGES_COLOR,
        },
    ]
}

fn log_failure<T, E: std::fmt::Display>(widget: &str, result: Result<T, E>) -> Option<T> {
    result
        .map_err(|err| log::error!("Failed to load {widget} statistics: {err}"))
        .ok()
}

pub async fn load_stats_page<R>(
    repo: &R,
    form: StatsForm,
    today: NaiveDate,
) -> ServiceResult<StatsPageData>
where
    R: StatsReader + ?Sized,
{
    let period = form.period();
    let default_end = today
        .checked_add_days(Days::new(DEFAULT_CUSTOM_DAYS))
        .unwrap_or(today);
    let start_date = form
        .start_date
        .clone()
        .filter(|date| !date.trim().is_empty())
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    let end_date = form
        .end_date
        .clone()
        .filter(|date| !date.trim().is_empty())
        .unwrap_or_else(|| default_end.format("%Y-%m-%d").to_string());

    let range: StatsRange = form.into_range(today).map_err(ServiceError::from)?;

    let (summary, activity, decisions, categories) = tokio::join!(
        repo.stats_summary(&range),
        repo.activity_chart(&range),
        repo.decisions_chart(&range),
        repo.categories_chart(&range),
    );
    let summary = log_failure("summary", summary);
    let activity = log_failure("activity", activity);
    let decisions = log_failure("decisions", decisions);
    let categories = log_failure("categories", categories);

    let periods = Period::ALL
        .iter()
        .map(|candidate| PeriodOption {
            value: candidate.as_str(),
            label: candidate.label(),
            selected: *candidate == period,
        })
        .collect();

    Ok(StatsPageData {
        period,
        periods,
        start_date,
        end_date,
        summary: summary.as_ref().map(summary_view),
        activity: activity
            .unwrap_or_default()
            .iter()
            .map(|day| ActivityPoint {
                date: day.date.format("%Y-%m-%d").to_string(),
                total: day.total(),
            })
            .collect(),
        decisions: decisions.as_ref().map(decision_slices).unwrap_or_default(),
        categories: categories
            .unwrap_or_default()
            .into_iter()
            .map(|(name, value)| CategoryPoint { name, value })
            .collect(),
    })
}
