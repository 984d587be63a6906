//! Codec between a [`StatusFilter`] and the comma-joined `status` parameter.

use crate::domain::filter::StatusFilter;
use crate::domain::types::Status;

/// Joins the selected statuses with `,` in declared order.
///
/// Returns `None` when nothing is selected: the parameter must then be
/// omitted rather than written empty.
pub fn encode_statuses(filter: &StatusFilter) -> Option<String> {
    let active = filter.active();
    if active.is_empty() {
        return None;
    }
    Some(
        active
            .iter()
            .map(|status| status.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Splits on `,` and keeps the tokens naming a known status. Unknown tokens
/// are dropped silently.
pub fn decode_statuses(raw: Option<&str>) -> StatusFilter {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return StatusFilter::default();
    };
    StatusFilter::from_statuses(raw.split(',').filter_map(|token| token.parse::<Status>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_declared_order() {
        let filter = StatusFilter::from_statuses([Status::Draft, Status::Approved]);

        assert_eq!(encode_statuses(&filter).as_deref(), Some("approved,draft"));
    }

    #[test]
    fn encode_empty_selection_is_absent() {
        assert_eq!(encode_statuses(&StatusFilter::default()), None);
    }

    #[test]
    fn decode_drops_unknown_tokens() {
        let filter = decode_statuses(Some("pending,bogus,approved"));

        assert_eq!(
            filter,
            StatusFilter {
                pending: true,
                approved: true,
                rejected: false,
                draft: false,
            }
        );
    }

    #[test]
    fn decode_missing_or_empty_is_empty_selection() {
        assert!(decode_statuses(None).is_empty());
        assert!(decode_statuses(Some("")).is_empty());
        assert!(decode_statuses(Some(",,")).is_empty());
    }

    #[test]
    fn decode_tolerates_duplicates() {
        let filter = decode_statuses(Some("draft,draft"));

        assert_eq!(filter.active(), vec![Status::Draft]);
    }
}
