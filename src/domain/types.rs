//! Strongly-typed value objects used by domain entities.
//!
//! Closed vocabularies (statuses, sort keys, periods, ...) are generated by
//! [`closed_set!`] so that every one of them can be decoded leniently through
//! [`crate::query::parse_or_default`] and strictly through [`FromStr`].
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::ClosedSet;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value is not a member of the expected vocabulary.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Custom statistics range is missing a bound or is reversed.
    #[error("invalid date range")]
    InvalidDateRange,
    /// Page size outside of the supported bounds.
    #[error("page limit must be between 1 and {0}")]
    PageLimitOutOfRange(u32),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AdId, "Unique identifier for an advertisement.");

/// Macro generating a closed vocabulary enum with its wire representation.
macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl ClosedSet for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == value)
                    .ok_or_else(|| TypeConstraintError::InvalidValue(value.to_string()))
            }
        }
    };
}

closed_set!(
    /// Moderation status of an advertisement, in declared order.
    Status {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Draft => "draft",
    }
);

closed_set!(
    /// Review priority assigned by the backend.
    Priority {
        Normal => "normal",
        Urgent => "urgent",
    }
);

closed_set!(
    /// Decision recorded in the moderation history.
    ModerationAction {
        Approved => "approved",
        Rejected => "rejected",
        RequestChanges => "requestChanges",
    }
);

closed_set!(
    /// Reporting window of the statistics endpoints.
    Period {
        Today => "today",
        Week => "week",
        Month => "month",
        Custom => "custom",
    }
);

closed_set!(
    /// Field the advertisement list is ordered by.
    SortKey {
        CreatedAt => "createdAt",
        Price => "price",
        Priority => "priority",
    }
);

closed_set!(
    /// Direction of the advertisement list ordering.
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
);

closed_set!(
    /// Colour scheme of the dashboard.
    Theme {
        Light => "light",
        Dark => "dark",
    }
);

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "На модерации",
            Status::Approved => "Одобрено",
            Status::Rejected => "Отклонено",
            Status::Draft => "На доработке",
        }
    }
}

impl ModerationAction {
    pub fn label(&self) -> &'static str {
        match self {
            ModerationAction::Approved => "Одобрено",
            ModerationAction::Rejected => "Отклонено",
            ModerationAction::RequestChanges => "Отправлено на доработку",
        }
    }
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Сегодня",
            Period::Week => "Неделя",
            Period::Month => "Месяц",
            Period::Custom => "Указать",
        }
    }
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "по дате",
            SortKey::Price => "по цене",
            SortKey::Priority => "по приоритету",
        }
    }
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reason that requires a free-form comment from the moderator.
pub const OTHER_REASON: &str = "Другое";

/// Catalogue of rejection reasons offered to moderators.
pub const REJECTION_REASONS: [&str; 6] = [
    "Запрещенный товар",
    "Неверная категория",
    "Некорректное описание",
    "Проблемы с фото",
    "Подозрение на мошенничество",
    OTHER_REASON,
];

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum number of advertisements shown on one list page.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Number of advertisements shown per list page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageLimit(u32);

impl PageLimit {
    pub const DEFAULT: PageLimit = PageLimit(10);

    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if (1..=MAX_PAGE_LIMIT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PageLimitOutOfRange(MAX_PAGE_LIMIT))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
