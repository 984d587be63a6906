//! Pure transitions from the current query string to the next one.
//!
//! Callers commit the returned value as a history *replacement*. Filter
//! parameters at their default are removed so that URLs stay minimal; sort
//! parameters are always written.

use crate::domain::filter::{Filter, Sort};
use crate::query::{
    CATEGORY_PARAM, PAGE_PARAM, PRICE_FROM_PARAM, PRICE_TO_PARAM, QueryString, SEARCH_PARAM,
    SORT_KEY_PARAM, SORT_ORDER_PARAM, STATUS_PARAM, derive_filter, encode_statuses,
};

/// Writes `filter` over `current`. Parameters unrelated to the filter
/// (`page`, `sortKey`, `sortOrder`, anything unknown) are kept as they are.
pub fn apply_filter(current: &QueryString, filter: &Filter) -> QueryString {
    let mut next = current.clone();

    match encode_statuses(&filter.status) {
        Some(encoded) => next.set(STATUS_PARAM, encoded),
        None => next.delete(STATUS_PARAM),
    }

    match filter.category_id {
        Some(category_id) => next.set(CATEGORY_PARAM, category_id.to_string()),
        None => next.delete(CATEGORY_PARAM),
    }

    if filter.price.from > 0 {
        next.set(PRICE_FROM_PARAM, filter.price.from.to_string());
    } else {
        next.delete(PRICE_FROM_PARAM);
    }

    match filter.price.to {
        Some(to) => next.set(PRICE_TO_PARAM, to.to_string()),
        None => next.delete(PRICE_TO_PARAM),
    }

    if filter.mask.is_empty() {
        next.delete(SEARCH_PARAM);
    } else {
        next.set(SEARCH_PARAM, filter.mask.as_str());
    }

    next
}

/// Updater form of [`apply_filter`]: `update` receives the filter freshly
/// derived from `current`.
pub fn update_filter<F>(current: &QueryString, update: F) -> QueryString
where
    F: FnOnce(Filter) -> Filter,
{
    let next_filter = update(derive_filter(current));
    apply_filter(current, &next_filter)
}

pub fn apply_sort(current: &QueryString, sort: Sort) -> QueryString {
    let mut next = current.clone();
    next.set(SORT_KEY_PARAM, sort.key.to_string());
    next.set(SORT_ORDER_PARAM, sort.order.to_string());
    next
}

/// Page 1 is implicit: any page `<= 1` removes the parameter.
pub fn apply_page(current: &QueryString, page: i64) -> QueryString {
    let mut next = current.clone();
    if page > 1 {
        next.set(PAGE_PARAM, page.to_string());
    } else {
        next.delete(PAGE_PARAM);
    }
    next
}

/// Discards every parameter, sort and page included.
pub fn reset() -> QueryString {
    QueryString::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{PriceRange, StatusFilter};
    use crate::domain::types::{SortKey, SortOrder, Status};

    #[test]
    fn default_filter_removes_filter_keys_only() {
        let current = QueryString::parse(
            "status=draft&categoryId=3&priceFrom=5&priceTo=9&search=x&page=2&sortKey=price&sortOrder=desc",
        );

        let next = apply_filter(&current, &Filter::default());

        assert_eq!(next.to_string(), "page=2&sortKey=price&sortOrder=desc");
    }

    #[test]
    fn filter_values_overwrite_in_place() {
        let current = QueryString::parse("page=3&search=old");
        let filter = Filter {
            status: StatusFilter::from_statuses([Status::Rejected]),
            category_id: Some(4),
            price: PriceRange {
                from: 100,
                to: Some(500),
            },
            mask: "new".to_string(),
        };

        let next = apply_filter(&current, &filter);

        assert_eq!(
            next.to_string(),
            "page=3&search=new&status=rejected&categoryId=4&priceFrom=100&priceTo=500"
        );
    }

    #[test]
    fn updater_sees_current_filter() {
        let current = QueryString::parse("status=pending&search=lamp");

        let next = update_filter(&current, |prev| Filter {
            price: PriceRange {
                from: 10,
                ..prev.price
            },
            ..prev
        });

        assert_eq!(next.get(STATUS_PARAM), Some("pending"));
        assert_eq!(next.get(SEARCH_PARAM), Some("lamp"));
        assert_eq!(next.get(PRICE_FROM_PARAM), Some("10"));
    }

    #[test]
    fn sort_is_always_written() {
        let next = apply_sort(&QueryString::new(), Sort::default());

        assert_eq!(next.to_string(), "sortKey=createdAt&sortOrder=asc");

        let next = apply_sort(&next, Sort::new(SortKey::Priority, SortOrder::Desc));
        assert_eq!(next.to_string(), "sortKey=priority&sortOrder=desc");
    }

    #[test]
    fn page_one_and_below_are_implicit() {
        let current = QueryString::parse("page=4&search=x");

        assert_eq!(apply_page(&current, 1).to_string(), "search=x");
        assert_eq!(apply_page(&current, 0).to_string(), "search=x");
        assert_eq!(apply_page(&current, -1).to_string(), "search=x");
        assert_eq!(apply_page(&current, 5).to_string(), "page=5&search=x");
    }

    #[test]
    fn reset_is_empty() {
        assert!(reset().is_empty());
    }
}
