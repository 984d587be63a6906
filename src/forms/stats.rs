use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::stats::StatsRange;
use crate::domain::types::Period;
use crate::forms::FormError;
use crate::query::parse_or_default;

/// Length of the custom window offered when no dates were picked yet.
pub const DEFAULT_CUSTOM_DAYS: u64 = 7;

/// Period selector of the statistics page, read from the query string.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsForm {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl StatsForm {
    pub fn period(&self) -> Period {
        parse_or_default(self.period.as_deref(), Period::Week)
    }

    /// Resolves the reporting window. Missing custom bounds default to
    /// `today ..= today + 7 days`.
    pub fn into_range(self, today: NaiveDate) -> Result<StatsRange, FormError> {
        let period = self.period();
        if period != Period::Custom {
            return StatsRange::preset(period).map_err(|_| FormError::InvalidDateRange);
        }

        let start = parse_date(self.start_date.as_deref())?.unwrap_or(today);
        let end = match parse_date(self.end_date.as_deref())? {
            Some(end) => end,
            None => today
                .checked_add_days(Days::new(DEFAULT_CUSTOM_DAYS))
                .ok_or(FormError::InvalidDate)?,
        };

        StatsRange::custom(start, end).map_err(|_| FormError::InvalidDateRange)
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, FormError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError::InvalidDate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn defaults_to_week() {
        let range = StatsForm::default().into_range(today()).unwrap();

        assert_eq!(range.period(), Period::Week);
        assert_eq!(range.start_date(), None);
    }

    #[test]
    fn unknown_period_falls_back_to_week() {
        let form = StatsForm {
            period: Some("decade".to_string()),
            ..Default::default()
        };

        assert_eq!(form.into_range(today()).unwrap().period(), Period::Week);
    }

    #[test]
    fn custom_without_dates_spans_a_week_from_today() {
        let form = StatsForm {
            period: Some("custom".to_string()),
            ..Default::default()
        };

        let range = form.into_range(today()).unwrap();

        assert_eq!(range.start_date(), Some(today()));
        assert_eq!(range.end_date(), NaiveDate::from_ymd_opt(2024, 3, 17));
    }

    #[test]
    fn reversed_custom_range_is_rejected() {
        let form = StatsForm {
            period: Some("custom".to_string()),
            start_date: Some("2024-03-20".to_string()),
            end_date: Some("2024-03-01".to_string()),
        };

        assert!(matches!(
            form.into_range(today()),
            Err(FormError::InvalidDateRange)
        ));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = StatsForm {
            period: Some("custom".to_string()),
            start_date: Some("10.03.2024".to_string()),
            end_date: None,
        };

        assert!(matches!(form.into_range(today()), Err(FormError::InvalidDate)));
    }
}
