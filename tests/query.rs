use moderation_dashboard::domain::filter::{Filter, PriceRange, Sort, StatusFilter};
use moderation_dashboard::domain::types::{SortKey, SortOrder, Status};
use moderation_dashboard::query::{
    QueryString, UrlState, apply_filter, apply_page, derive_filter, derive_page, derive_sort,
    reset, update_filter,
};

fn busy_filter() -> Filter {
    Filter {
        status: StatusFilter::from_statuses([Status::Draft, Status::Pending]),
        category_id: Some(7),
        price: PriceRange {
            from: 250,
            to: Some(9000),
        },
        mask: "велосипед горный".to_string(),
    }
}

#[test]
fn filter_survives_encoding() {
    let filters = [
        busy_filter(),
        Filter::default(),
        Filter {
            price: PriceRange { from: 0, to: Some(0) },
            ..Filter::default()
        },
        Filter {
            category_id: Some(-3),
            mask: "a&b=c".to_string(),
            ..Filter::default()
        },
    ];

    for filter in filters {
        let query = apply_filter(&QueryString::new(), &filter);
        let reparsed = QueryString::parse(&query.to_string());

        assert_eq!(derive_filter(&reparsed), filter, "query: {query}");
    }
}

#[test]
fn applying_twice_changes_nothing() {
    let current = QueryString::parse("page=2&sortKey=price&sortOrder=desc&status=draft");
    let once = apply_filter(&current, &busy_filter());
    let twice = apply_filter(&once, &busy_filter());

    assert_eq!(once.to_string(), twice.to_string());
}

#[test]
fn default_filter_leaves_no_filter_keys() {
    let current = QueryString::parse(
        "status=pending&categoryId=1&priceFrom=5&priceTo=6&search=x&page=4&sortKey=price&sortOrder=asc",
    );

    let next = apply_filter(&current, &Filter::default());

    assert_eq!(next.to_string(), "page=4&sortKey=price&sortOrder=asc");
}

#[test]
fn unknown_status_tokens_are_dropped() {
    let filter = derive_filter(&QueryString::parse("status=pending,bogus,approved"));

    assert_eq!(
        filter.status,
        StatusFilter {
            pending: true,
            approved: true,
            rejected: false,
            draft: false,
        }
    );
}

#[test]
fn unknown_sort_values_fall_back() {
    let sort = derive_sort(&QueryString::parse("sortKey=nonsense&sortOrder=UP"));

    assert_eq!(sort, Sort::new(SortKey::CreatedAt, SortOrder::Asc));
}

#[test]
fn page_one_and_below_are_not_written() {
    let current = QueryString::parse("page=3&search=x");

    assert_eq!(apply_page(&current, 1).to_string(), "search=x");
    assert_eq!(apply_page(&current, 0).to_string(), "search=x");
    assert_eq!(apply_page(&current, -4).to_string(), "search=x");
    assert_eq!(apply_page(&current, 5).to_string(), "page=5&search=x");
}

#[test]
fn reset_returns_to_defaults() {
    let next = reset();

    assert!(next.is_empty());
    assert_eq!(derive_filter(&next), Filter::default());
    assert_eq!(derive_sort(&next), Sort::default());
    assert_eq!(derive_page(&next), 1);
}

#[test]
fn bookmarked_list_decodes_completely() {
    let query = QueryString::parse(
        "?status=approved,rejected&priceFrom=100&sortKey=price&sortOrder=desc&page=3",
    );

    assert_eq!(
        derive_filter(&query),
        Filter {
            status: StatusFilter {
                pending: false,
                approved: true,
                rejected: true,
                draft: false,
            },
            category_id: None,
            price: PriceRange {
                from: 100,
                to: None,
            },
            mask: String::new(),
        }
    );
    assert_eq!(
        derive_sort(&query),
        Sort::new(SortKey::Price, SortOrder::Desc)
    );
    assert_eq!(derive_page(&query), 3);
}

#[test]
fn updater_sees_the_latest_filter() {
    let mut state = UrlState::new(QueryString::parse("sortKey=priority&sortOrder=desc"));

    state.update_filter(|filter| Filter {
        mask: "лампа".to_string(),
        ..filter
    });
    state.update_filter(|filter| Filter {
        status: filter.status.with(Status::Rejected, true),
        ..filter
    });
    state.set_page(2);

    let filter = state.filter();
    assert_eq!(filter.mask, "лампа");
    assert!(filter.status.is_selected(Status::Rejected));
    assert_eq!(state.sort(), Sort::new(SortKey::Priority, SortOrder::Desc));
    assert_eq!(state.page(), 2);
    assert_eq!(state.revision(), 3);
}

#[test]
fn updater_form_keeps_other_parameters() {
    let current = QueryString::parse("utm=mail&page=2&search=old");

    let next = update_filter(&current, |filter| Filter {
        mask: String::new(),
        ..filter
    });

    assert_eq!(next.to_string(), "utm=mail&page=2");
}
