//! Advertisement list: rendering data and the query-string transitions
//! triggered by the sidebar and the pager.

use validator::Validate;

use crate::domain::ad::Advertisement;
use crate::domain::filter::Sort;
use crate::domain::types::{PageLimit, Priority, SortKey, Status};
use crate::dto::list::{AdCard, ChoiceOption, ListPageData};
use crate::forms::FormError;
use crate::forms::list::{FilterForm, PageForm, SortForm};
use crate::pagination::Paginated;
use crate::query::{
    ClosedSet, QueryString, apply_page, apply_sort, derive_filter, derive_page, derive_sort,
    reset, update_filter,
};
use crate::repository::{AdReader, ListAdsQuery};
use crate::services::categories::CategoryCache;
use crate::services::item::item_href;
use crate::services::{ServiceError, ServiceResult};

pub const LIST_PATH: &str = "/list";

/// Loads the page of advertisements described by `query`.
pub async fn load_list_page<R>(
    repo: &R,
    categories: &CategoryCache,
    query: &QueryString,
    limit: PageLimit,
) -> ServiceResult<ListPageData>
where
    R: AdReader + ?Sized,
{
    let filter = derive_filter(query);
    let sort = derive_sort(query);
    let page = derive_page(query);

    let list = repo
        .list_ads(&ListAdsQuery::from_view(&filter, sort, page, limit))
        .await
        .map_err(|err| {
            log::error!("Failed to list advertisements: {err}");
            ServiceError::from(err)
        })?;

    let back = query.to_location(LIST_PATH);
    let ids: Vec<i32> = list.ads.iter().map(|ad| ad.id.get()).collect();
    let joined_ids = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let cards = list
        .ads
        .iter()
        .enumerate()
        .map(|(index, ad)| ad_card(ad, &joined_ids, index, &back))
        .collect();

    let ads = Paginated::new(
        cards,
        page,
        list.pagination.total_pages,
        list.pagination.total_items,
    );

    let status_options = Status::ALL
        .iter()
        .map(|status| ChoiceOption {
            value: status.to_string(),
            label: status.label().to_string(),
            selected: filter.status.is_selected(*status),
        })
        .collect();

    let sort_options = SortKey::ALL
        .iter()
        .map(|key| ChoiceOption {
            value: key.to_string(),
            label: key.label().to_string(),
            selected: *key == sort.key,
        })
        .collect();

    Ok(ListPageData {
        ads,
        ids,
        filter,
        sort,
        limit,
        query: query.to_string(),
        status_options,
        sort_options,
        categories: categories.get(repo).await,
    })
}

fn ad_card(ad: &Advertisement, ids: &str, index: usize, back: &str) -> AdCard {
    AdCard {
        id: ad.id.get(),
        title: ad.title.clone(),
        price: ad.price,
        category: ad.category.clone(),
        status: ad.status.to_string(),
        status_label: ad.status.label().to_string(),
        urgent: ad.priority == Priority::Urgent,
        created_at: ad.created_at.format("%d.%m.%Y").to_string(),
        image: ad.images.first().cloned(),
        href: item_href(ad.id.get(), ids, index, back),
    }
}

/// Location of the list after applying the filter controls.
pub fn apply_filter_form(form: &FilterForm) -> String {
    update_filter(&form.current_query(), |prev| form.merge_into(prev)).to_location(LIST_PATH)
}

/// Location of the list after changing the ordering.
pub fn apply_sort_form(form: &SortForm) -> String {
    let current = form.current_query();
    let sort: Sort = form.merge_into(derive_sort(&current));
    apply_sort(&current, sort).to_location(LIST_PATH)
}

/// Location of the list after flipping the ordering direction.
pub fn toggle_sort_order(query: &QueryString) -> String {
    apply_sort(query, derive_sort(query).reversed()).to_location(LIST_PATH)
}

/// Outcome of the pager: where to go and, when the page size changed, the
/// new size to remember.
#[derive(Debug, PartialEq, Eq)]
pub struct PageChange {
    pub location: String,
    pub limit: Option<PageLimit>,
}

pub fn apply_page_form(form: &PageForm) -> ServiceResult<PageChange> {
    form.validate().map_err(|err| {
        log::error!("Failed to validate page form: {err}");
        ServiceError::from(FormError::InvalidPageLimit)
    })?;

    let limit = form
        .limit
        .map(PageLimit::new)
        .transpose()
        .map_err(|_| ServiceError::from(FormError::InvalidPageLimit))?;

    let current = form.current_query();
    let page = form.page.unwrap_or_else(|| i64::from(derive_page(&current)));

    Ok(PageChange {
        location: apply_page(&current, page).to_location(LIST_PATH),
        limit,
    })
}

/// Location of the list with every parameter discarded.
pub fn reset_filters() -> String {
    reset().to_location(LIST_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad::{AdList, Pagination};
    use crate::domain::types::SortOrder;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::sample_ad;

    fn page_of(ids: &[i32], total_pages: u32) -> AdList {
        AdList {
            ads: ids.iter().map(|id| sample_ad(*id)).collect(),
            pagination: Pagination {
                current_page: 2,
                total_pages,
                total_items: 42,
                items_per_page: 20,
            },
        }
    }

    #[actix_web::test]
    async fn list_page_requests_what_the_query_describes() {
        let mut repo = MockRepository::new();
        repo.expect_list_ads()
            .withf(|query| query.page == Some(2))
            .times(1)
            .returning(|query| {
                assert_eq!(query.limit, Some(20));
                assert_eq!(query.statuses, vec![Status::Pending, Status::Rejected]);
                assert_eq!(query.min_price, Some(100));
                assert_eq!(query.search.as_deref(), Some("лампа"));
                assert_eq!(
                    query.sort,
                    Some(Sort::new(SortKey::Price, SortOrder::Desc))
                );
                Ok(page_of(&[7, 9], 3))
            });
        repo.expect_list_ads()
            .withf(|query| query.page.is_none())
            .returning(|_| Ok(page_of(&[], 0)));

        let query = QueryString::parse(
            "status=rejected,pending&priceFrom=100&search=%D0%BB%D0%B0%D0%BC%D0%BF%D0%B0&sortKey=price&sortOrder=desc&page=2",
        );
        let data = load_list_page(
            &repo,
            &CategoryCache::default(),
            &query,
            PageLimit::new(20).unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(data.ads.page, 2);
        assert_eq!(data.ads.total_items, 42);
        assert_eq!(data.ids, vec![7, 9]);
        assert!(data.ads.items[0].href.starts_with("/item/7?ids=7%2C9&index=0&back="));
        assert!(data.status_options[0].selected);
        assert!(!data.status_options[1].selected);
        assert!(data.sort_options.iter().any(|o| o.value == "price" && o.selected));
    }

    #[actix_web::test]
    async fn list_failure_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_list_ads()
            .returning(|_| Err(RepositoryError::Transport("down".into())));

        let result = load_list_page(
            &repo,
            &CategoryCache::default(),
            &QueryString::new(),
            PageLimit::DEFAULT,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn filter_form_keeps_unrelated_parameters() {
        let form = FilterForm {
            query: "sortKey=price&sortOrder=asc&page=3&search=old".to_string(),
            search: Some("new".to_string()),
            ..Default::default()
        };

        assert_eq!(
            apply_filter_form(&form),
            "/list?sortKey=price&sortOrder=asc&page=3&search=new"
        );
    }

    #[test]
    fn sort_form_writes_both_parameters() {
        let form = SortForm {
            query: "status=pending".to_string(),
            sort_key: Some("priority".to_string()),
            sort_order: None,
        };

        assert_eq!(
            apply_sort_form(&form),
            "/list?status=pending&sortKey=priority&sortOrder=asc"
        );
    }

    #[test]
    fn toggling_order_flips_direction() {
        let query = QueryString::parse("sortKey=price&sortOrder=asc");

        assert_eq!(
            toggle_sort_order(&query),
            "/list?sortKey=price&sortOrder=desc"
        );
    }

    #[test]
    fn first_page_is_implicit() {
        let form = PageForm {
            query: "page=4&search=x".to_string(),
            page: Some(1),
            limit: Some(50),
        };

        let change = apply_page_form(&form).unwrap();

        assert_eq!(change.location, "/list?search=x");
        assert_eq!(change.limit, Some(PageLimit::new(50).unwrap()));
    }

    #[test]
    fn page_size_out_of_range_is_rejected() {
        let form = PageForm {
            query: String::new(),
            page: Some(2),
            limit: Some(500),
        };

        assert!(matches!(apply_page_form(&form), Err(ServiceError::Form(_))));
    }

    #[test]
    fn reset_discards_everything() {
        assert_eq!(reset_filters(), "/list");
    }
}
