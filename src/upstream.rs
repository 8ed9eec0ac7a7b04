//! Client for the upstream video listing API.
//!
//! The upstream speaks the common "collection" JSON dialect: a GET with
//! `ac=list&pg={page}` answers `{code, list, class, pagecount}`, where `code`
//! is `1` on success and `class` is only sent with the first page. Numeric
//! fields show up both as JSON numbers and as numeric strings, so records are
//! read leniently and validated one by one.

use std::future::Future;

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::domain::category::NewCategory;
use crate::domain::types::{
    CategoryId, CategoryName, ParentCategoryId, TypeConstraintError, VideoId, VideoName,
};
use crate::domain::video::{NewVideo, normalize_vod_time};

/// `code` value the upstream uses for a successful listing.
pub const UPSTREAM_SUCCESS_CODE: i64 = 1;

/// Errors raised while fetching or decoding an upstream page.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(StatusCode),
    #[error("upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of the upstream listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamPage {
    #[serde(default, deserialize_with = "lenient_number")]
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "array_or_empty")]
    pub list: Vec<Value>,
    #[serde(default, rename = "class", deserialize_with = "array_or_empty")]
    pub categories: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pagecount: Option<i64>,
}

impl UpstreamPage {
    /// Whether the upstream flagged this page as a successful listing.
    pub fn is_success(&self) -> bool {
        self.code == Some(UPSTREAM_SUCCESS_CODE)
    }

    /// Whether `page` is the last page the upstream reports having.
    pub fn is_last_page(&self, page: u32) -> bool {
        self.pagecount.is_some_and(|count| i64::from(page) >= count)
    }
}

/// Decode a raw upstream response body.
pub fn parse_page(body: &[u8]) -> Result<UpstreamPage, UpstreamError> {
    Ok(serde_json::from_slice(body)?)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_value))
}

fn array_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

fn number_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn number_field(record: &Value, field: &'static str) -> Result<i32, TypeConstraintError> {
    let raw = record
        .get(field)
        .filter(|value| !value.is_null())
        .ok_or(TypeConstraintError::Missing(field))?;
    number_value(raw)
        .and_then(|number| i32::try_from(number).ok())
        .ok_or_else(|| TypeConstraintError::InvalidValue(format!("{field}: {raw}")))
}

fn text_field(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Validate one `class` entry.
pub fn category_from_record(record: &Value) -> Result<NewCategory, TypeConstraintError> {
    let type_pid = match record.get("type_pid") {
        None | Some(Value::Null) => ParentCategoryId::ROOT,
        Some(_) => ParentCategoryId::new(number_field(record, "type_pid")?)?,
    };

    Ok(NewCategory {
        type_id: CategoryId::new(number_field(record, "type_id")?)?,
        type_pid,
        type_name: CategoryName::new(
            text_field(record, "type_name").ok_or(TypeConstraintError::Missing("type_name"))?,
        )?,
    })
}

/// Validate one `list` entry, normalizing its display time against `now`.
pub fn video_from_record(
    record: &Value,
    now: NaiveDateTime,
) -> Result<NewVideo, TypeConstraintError> {
    let vod_time = text_field(record, "vod_time");

    Ok(NewVideo {
        vod_id: VideoId::new(number_field(record, "vod_id")?)?,
        vod_name: VideoName::new(
            text_field(record, "vod_name").ok_or(TypeConstraintError::Missing("vod_name"))?,
        )?,
        type_id: CategoryId::new(number_field(record, "type_id")?)?,
        type_name: text_field(record, "type_name").unwrap_or_default(),
        vod_en: text_field(record, "vod_en"),
        vod_time: normalize_vod_time(vod_time.as_deref(), now),
        vod_remarks: text_field(record, "vod_remarks"),
        vod_play_from: text_field(record, "vod_play_from"),
    })
}

/// Anything able to produce upstream listing pages.
pub trait VodSource {
    /// Fetch and decode page `page` (1-based).
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<UpstreamPage, UpstreamError>>;
}

/// [`VodSource`] talking HTTP to the configured upstream.
#[derive(Clone, Debug)]
pub struct HttpVodSource {
    client: Client,
    base_url: String,
}

impl HttpVodSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl VodSource for HttpVodSource {
    async fn fetch_page(&self, page: u32) -> Result<UpstreamPage, UpstreamError> {
        log::debug!("Fetching upstream page {page} from {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("ac", "list")])
            .query(&[("pg", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        parse_page(&body)
    }
}
