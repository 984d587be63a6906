//! Pure derivations of the list view state from a [`QueryString`].

use crate::domain::filter::{Filter, PriceRange, Sort};
use crate::domain::types::{SortKey, SortOrder};
use crate::query::{
    CATEGORY_PARAM, PAGE_PARAM, PRICE_FROM_PARAM, PRICE_TO_PARAM, QueryString, SEARCH_PARAM,
    SORT_KEY_PARAM, SORT_ORDER_PARAM, STATUS_PARAM, decode_statuses, parse_or_default,
};

/// Builds the complete filter. Missing or malformed parameters take their
/// default: no status, no category, `from = 0`, no upper bound, empty search.
pub fn derive_filter(query: &QueryString) -> Filter {
    Filter {
        status: decode_statuses(query.get(STATUS_PARAM)),
        category_id: query.get(CATEGORY_PARAM).and_then(|raw| raw.parse().ok()),
        price: PriceRange {
            from: query
                .get(PRICE_FROM_PARAM)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(0),
            to: query.get(PRICE_TO_PARAM).and_then(|raw| raw.parse().ok()),
        },
        mask: query.get(SEARCH_PARAM).unwrap_or_default().to_string(),
    }
}

pub fn derive_sort(query: &QueryString) -> Sort {
    Sort {
        key: parse_or_default(query.get(SORT_KEY_PARAM), SortKey::CreatedAt),
        order: parse_or_default(query.get(SORT_ORDER_PARAM), SortOrder::Asc),
    }
}

/// Current page, 1-based. Zero, negative or malformed values mean page 1.
pub fn derive_page(query: &QueryString) -> u32 {
    query
        .get(PAGE_PARAM)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Status;

    #[test]
    fn empty_query_yields_defaults() {
        let query = QueryString::new();

        assert_eq!(derive_filter(&query), Filter::default());
        assert_eq!(derive_sort(&query), Sort::default());
        assert_eq!(derive_page(&query), 1);
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let query = QueryString::parse("categoryId=abc&priceFrom=-5&priceTo=1e3&page=zero");

        let filter = derive_filter(&query);

        assert_eq!(filter.category_id, None);
        assert_eq!(filter.price, PriceRange { from: 0, to: None });
        assert_eq!(derive_page(&query), 1);
    }

    #[test]
    fn well_formed_values_are_decoded() {
        let query =
            QueryString::parse("status=draft&categoryId=7&priceFrom=10&priceTo=99&search=lamp");

        let filter = derive_filter(&query);

        assert_eq!(filter.status.active(), vec![Status::Draft]);
        assert_eq!(filter.category_id, Some(7));
        assert_eq!(
            filter.price,
            PriceRange {
                from: 10,
                to: Some(99)
            }
        );
        assert_eq!(filter.mask, "lamp");
    }

    #[test]
    fn page_zero_is_page_one() {
        assert_eq!(derive_page(&QueryString::parse("page=0")), 1);
        assert_eq!(derive_page(&QueryString::parse("page=-2")), 1);
        assert_eq!(derive_page(&QueryString::parse("page=4")), 4);
    }

    #[test]
    fn derivation_is_deterministic() {
        let query = QueryString::parse("status=pending&sortKey=price&page=2");

        assert_eq!(derive_filter(&query), derive_filter(&query));
        assert_eq!(derive_sort(&query), derive_sort(&query));
    }
}
