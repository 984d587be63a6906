use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{AdId, ModerationAction, Priority, Status};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: i32,
    pub name: String,
    pub rating: String,
    pub total_ads: i32,
    pub registered_at: DateTime<Utc>,
}

/// One entry of an advertisement's moderation history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModerationHistory {
    pub id: i32,
    pub moderator_id: i32,
    pub moderator_name: String,
    pub action: ModerationAction,
    pub reason: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: AdId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub category_id: i64,
    pub status: Status,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    pub seller: Seller,
    #[serde(default)]
    pub characteristics: BTreeMap<String, Value>,
    #[serde(default)]
    pub moderation_history: Vec<ModerationHistory>,
}

impl Advertisement {
    /// Orders the moderation history from the oldest decision to the newest.
    pub fn sort_history(&mut self) {
        self.moderation_history.sort_by_key(|entry| entry.timestamp);
    }

    /// Characteristics rendered as display strings.
    pub fn characteristics_display(&self) -> Vec<(String, String)> {
        self.characteristics
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Paging metadata returned by the listing endpoint.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

/// One page of advertisements.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdList {
    pub ads: Vec<Advertisement>,
    pub pagination: Pagination,
}

/// Response of the approve/reject/request-changes endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModerationOutcome {
    #[serde(default)]
    pub message: String,
    pub ad: Advertisement,
}

/// Body of a rejection or a request for changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModerationDecision {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Category known from the advertisements themselves.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
