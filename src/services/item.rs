//! Advertisement detail page and moderation decisions.

use crate::domain::ad::{Advertisement, ModerationDecision};
use crate::domain::types::{AdId, ModerationAction};
use crate::dto::item::{HistoryEntryView, ItemPageData, ItemQuery};
use crate::forms::item::{DecisionForm, DecisionPayload};
use crate::query::QueryString;
use crate::repository::{AdReader, AdWriter};
use crate::services::list::LIST_PATH;
use crate::services::{ServiceError, ServiceResult};

/// Detail page link remembering the list it was opened from.
pub fn item_href(id: i32, ids: &str, index: usize, back: &str) -> String {
    nav_query(ids, index, back).to_location(&format!("/item/{id}"))
}

fn nav_query(ids: &str, index: usize, back: &str) -> QueryString {
    [
        ("ids", ids.to_string()),
        ("index", index.to_string()),
        ("back", back.to_string()),
    ]
    .into_iter()
    .collect()
}

/// Accepts only local list locations as the "back" target.
pub fn safe_back(back: Option<&str>) -> String {
    match back {
        Some(back) if back.starts_with(LIST_PATH) => back.to_string(),
        _ => LIST_PATH.to_string(),
    }
}

fn parse_id(id: i32) -> ServiceResult<AdId> {
    AdId::new(id).map_err(|_| ServiceError::NotFound)
}

fn history_color(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Approved => "green",
        ModerationAction::Rejected => "red",
        ModerationAction::RequestChanges => "yellow",
    }
}

/// Loads an advertisement with its history ordered oldest first and the
/// prev/next links of the list it was opened from.
pub async fn load_item_page<R>(repo: &R, id: i32, nav: &ItemQuery) -> ServiceResult<ItemPageData>
where
    R: AdReader + ?Sized,
{
    let ad_id = parse_id(id)?;
    let mut ad = repo
        .get_ad(ad_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get advertisement {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;
    ad.sort_history();

    let history = ad
        .moderation_history
        .iter()
        .map(|entry| HistoryEntryView {
            moderator_name: entry.moderator_name.clone(),
            action: entry.action.to_string(),
            action_label: entry.action.label().to_string(),
            color: history_color(entry.action),
            reason: entry.reason.clone(),
            comment: entry.comment.clone(),
            timestamp: entry.timestamp.format("%d.%m.%Y %H:%M:%S").to_string(),
        })
        .collect();

    let back_href = safe_back(nav.back.as_deref());
    let raw_ids = nav.ids.clone().unwrap_or_default();
    let ids: Vec<i32> = raw_ids
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();

    let (prev_href, next_href, nav_string) = match nav.index.filter(|index| *index < ids.len()) {
        Some(index) => {
            let prev_href = index
                .checked_sub(1)
                .map(|prev| item_href(ids[prev], &raw_ids, prev, &back_href));
            let next_href = ids
                .get(index + 1)
                .map(|next| item_href(*next, &raw_ids, index + 1, &back_href));
            let nav_string = nav_query(&raw_ids, index, &back_href).to_string();
            (prev_href, next_href, nav_string)
        }
        None => {
            let nav_string: QueryString = [("back", back_href.as_str())].into_iter().collect();
            (None, None, nav_string.to_string())
        }
    };

    Ok(ItemPageData {
        characteristics: ad.characteristics_display(),
        ad,
        history,
        prev_href,
        next_href,
        back_href,
        nav: nav_string,
    })
}

pub async fn approve_ad<R>(repo: &R, id: i32) -> ServiceResult<Advertisement>
where
    R: AdWriter + ?Sized,
{
    let ad_id = parse_id(id)?;
    repo.approve_ad(ad_id).await.map_err(|err| {
        log::error!("Failed to approve advertisement {id}: {err}");
        ServiceError::from(err)
    })
}

fn decision_from_form(form: DecisionForm) -> ServiceResult<ModerationDecision> {
    let payload = DecisionPayload::try_from(form).map_err(|err| {
        log::warn!("Rejected moderation form: {err}");
        ServiceError::from(err)
    })?;
    Ok(payload.into())
}

/// Rejects an advertisement. The comment is forwarded only for the
/// "Другое" reason.
pub async fn reject_ad<R>(repo: &R, id: i32, form: DecisionForm) -> ServiceResult<Advertisement>
where
    R: AdWriter + ?Sized,
{
    let ad_id = parse_id(id)?;
    let decision = decision_from_form(form)?;
    repo.reject_ad(ad_id, &decision).await.map_err(|err| {
        log::error!("Failed to reject advertisement {id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn request_changes<R>(
    repo: &R,
    id: i32,
    form: DecisionForm,
) -> ServiceResult<Advertisement>
where
    R: AdWriter + ?Sized,
{
    let ad_id = parse_id(id)?;
    let decision = decision_from_form(form)?;
    repo.request_changes(ad_id, &decision).await.map_err(|err| {
        log::error!("Failed to request changes for advertisement {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::ad::ModerationHistory;
    use crate::domain::types::OTHER_REASON;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::sample_ad;

    fn history(id: i32, day: u32, action: ModerationAction) -> ModerationHistory {
        ModerationHistory {
            id,
            moderator_id: 1,
            moderator_name: "Анна".to_string(),
            action,
            reason: None,
            comment: String::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn nav(ids: &str, index: usize) -> ItemQuery {
        ItemQuery {
            ids: Some(ids.to_string()),
            index: Some(index),
            back: Some("/list?page=2".to_string()),
        }
    }

    #[actix_web::test]
    async fn history_is_ordered_oldest_first() {
        let mut repo = MockRepository::new();
        repo.expect_get_ad().returning(|id| {
            let mut ad = sample_ad(id.get());
            ad.moderation_history = vec![
                history(2, 9, ModerationAction::Rejected),
                history(1, 3, ModerationAction::Approved),
            ];
            Ok(Some(ad))
        });

        let data = load_item_page(&repo, 5, &ItemQuery::default()).await.unwrap();

        assert_eq!(
            data.ad.moderation_history.iter().map(|h| h.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(data.history[0].color, "green");
        assert_eq!(data.history[1].color, "red");
        assert_eq!(data.back_href, "/list");
        assert_eq!(data.prev_href, None);
        assert_eq!(data.next_href, None);
    }

    #[actix_web::test]
    async fn neighbours_come_from_the_opening_list() {
        let mut repo = MockRepository::new();
        repo.expect_get_ad()
            .returning(|id| Ok(Some(sample_ad(id.get()))));

        let middle = load_item_page(&repo, 8, &nav("4,8,15", 1)).await.unwrap();
        assert_eq!(
            middle.prev_href.as_deref(),
            Some("/item/4?ids=4%2C8%2C15&index=0&back=%2Flist%3Fpage%3D2")
        );
        assert_eq!(
            middle.next_href.as_deref(),
            Some("/item/15?ids=4%2C8%2C15&index=2&back=%2Flist%3Fpage%3D2")
        );
        assert_eq!(middle.back_href, "/list?page=2");

        let last = load_item_page(&repo, 15, &nav("4,8,15", 2)).await.unwrap();
        assert!(last.prev_href.is_some());
        assert_eq!(last.next_href, None);

        let stale = load_item_page(&repo, 15, &nav("4,8,15", 7)).await.unwrap();
        assert_eq!(stale.prev_href, None);
        assert_eq!(stale.next_href, None);
    }

    #[actix_web::test]
    async fn missing_advertisement_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_ad().returning(|_| Ok(None));

        assert!(matches!(
            load_item_page(&repo, 3, &ItemQuery::default()).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            load_item_page(&repo, 0, &ItemQuery::default()).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn foreign_back_targets_are_ignored() {
        assert_eq!(safe_back(Some("https://evil.example/list")), "/list");
        assert_eq!(safe_back(Some("/list?status=draft")), "/list?status=draft");
        assert_eq!(safe_back(None), "/list");
    }

    #[actix_web::test]
    async fn reject_sends_comment_only_for_other_reason() {
        let mut repo = MockRepository::new();
        repo.expect_reject_ad()
            .with(
                eq(AdId::new(3).unwrap()),
                eq(ModerationDecision {
                    reason: OTHER_REASON.to_string(),
                    comment: Some("Дубликат".to_string()),
                }),
            )
            .times(1)
            .returning(|id, _| Ok(sample_ad(id.get())));
        repo.expect_reject_ad()
            .with(
                eq(AdId::new(4).unwrap()),
                eq(ModerationDecision {
                    reason: "Некорректная цена".to_string(),
                    comment: None,
                }),
            )
            .times(1)
            .returning(|id, _| Ok(sample_ad(id.get())));

        let other = DecisionForm {
            reason: OTHER_REASON.to_string(),
            comment: Some("Дубликат".to_string()),
            ..Default::default()
        };
        reject_ad(&repo, 3, other).await.unwrap();

        let catalogue = DecisionForm {
            reason: "Некорректная цена".to_string(),
            comment: Some("ignored".to_string()),
            ..Default::default()
        };
        reject_ad(&repo, 4, catalogue).await.unwrap();
    }

    #[actix_web::test]
    async fn invalid_decision_never_reaches_the_api() {
        let repo = MockRepository::new();

        let result = request_changes(&repo, 3, DecisionForm::default()).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn approve_propagates_api_errors() {
        let mut repo = MockRepository::new();
        repo.expect_approve_ad().returning(|_| {
            Err(RepositoryError::Status {
                status: 500,
                message: "boom".into(),
            })
        });

        assert!(matches!(
            approve_ad(&repo, 3).await,
            Err(ServiceError::Repository(_))
        ));
    }
}
