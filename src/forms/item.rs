use serde::Deserialize;

use crate::domain::ad::ModerationDecision;
use crate::domain::types::{NonEmptyString, OTHER_REASON};

#[derive(Debug, Default, Deserialize)]
/// Form data for rejecting an advertisement or returning it for changes.
pub struct DecisionForm {
    /// One of the catalogue reasons or free text.
    #[serde(default)]
    pub reason: String,
    /// Required when the reason is "Другое", ignored otherwise.
    pub comment: Option<String>,
    /// Query string of the item page, kept across the redirect.
    #[serde(default)]
    pub nav: String,
}

/// Validated body of a rejection or a request for changes.
#[derive(Debug, PartialEq, Eq)]
pub struct DecisionPayload {
    pub reason: NonEmptyString,
    pub comment: Option<NonEmptyString>,
}

impl TryFrom<DecisionForm> for DecisionPayload {
    type Error = super::FormError;

    fn try_from(form: DecisionForm) -> Result<Self, Self::Error> {
        let reason =
            NonEmptyString::new(form.reason).map_err(|_| super::FormError::MissingReason)?;

        let comment = if reason.as_str() == OTHER_REASON {
            let comment = NonEmptyString::new(form.comment.unwrap_or_default())
                .map_err(|_| super::FormError::MissingComment)?;
            Some(comment)
        } else {
            None
        };

        Ok(Self { reason, comment })
    }
}

impl From<DecisionPayload> for ModerationDecision {
    fn from(payload: DecisionPayload) -> Self {
        ModerationDecision {
            reason: payload.reason.into_inner(),
            comment: payload.comment.map(NonEmptyString::into_inner),
        }
    }
}
