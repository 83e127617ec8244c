//! Kaltura XML response bodies.
//!
//! Every response is wrapped as `<xml><result>..</result></xml>`. List results
//! hold their records as repeated `<item>` elements under `<objects>`, so a list
//! may arrive with no `item`, a single bare `item`, or many. All three shapes
//! land in a `Vec` here and nothing downstream looks at cardinality again.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use super::{EntityPage, FlavorAsset, MediaEntity};
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListResult<T> {
    objects: Option<Objects<T>>,
    #[serde(rename = "totalCount", default)]
    total_count: Option<u64>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Objects<T> {
    #[serde(rename = "item", default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct EmptyResult {
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct MediaEntryRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlavorAssetRecord {
    id: String,
    #[serde(rename = "entryId", default)]
    entry_id: Option<String>,
    #[serde(rename = "isOriginal", default)]
    is_original: Option<String>,
    #[serde(rename = "flavorParamsId", default)]
    flavor_params_id: Option<String>,
    #[serde(default)]
    size: Option<String>,
}

impl From<MediaEntryRecord> for MediaEntity {
    fn from(record: MediaEntryRecord) -> Self {
        MediaEntity {
            id: record.id,
            name: record.name.filter(|n| !n.is_empty()),
            created_at: epoch_seconds(record.created_at.as_deref()),
            updated_at: epoch_seconds(record.updated_at.as_deref()),
        }
    }
}

impl From<FlavorAssetRecord> for FlavorAsset {
    fn from(record: FlavorAssetRecord) -> Self {
        FlavorAsset {
            id: record.id,
            entry_id: record.entry_id.filter(|e| !e.is_empty()),
            is_original: is_truthy(record.is_original.as_deref()),
            flavor_params_id: record.flavor_params_id.filter(|p| !p.is_empty()),
            size_kb: record.size.and_then(|s| s.trim().parse().ok()),
        }
    }
}

/// Kaltura serializes booleans as `1` / empty; accept `true` as well.
fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}

fn epoch_seconds(value: Option<&str>) -> Option<DateTime<Utc>> {
    let secs: i64 = value?.trim().parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

fn check_api_error(error: Option<ApiError>) -> Result<(), Error> {
    match error {
        Some(err) => Err(Error::Api {
            code: err.code,
            message: err.message,
        }),
        None => Ok(()),
    }
}

fn parse_list<T>(body: &str) -> Result<ListResult<T>, Error>
where
    T: for<'de> Deserialize<'de>,
{
    let envelope: Envelope<ListResult<T>> = quick_xml::de::from_str(body)?;
    let mut result = envelope
        .result
        .ok_or_else(|| Error::Malformed("response has no <result> element".to_string()))?;
    check_api_error(result.error.take())?;
    Ok(result)
}

/// Parse a `media.list` response.
pub fn parse_entity_page(body: &str) -> Result<EntityPage, Error> {
    let result = parse_list::<MediaEntryRecord>(body)?;
    let total_count = result
        .total_count
        .ok_or_else(|| Error::Malformed("media list has no <totalCount>".to_string()))?;
    let entities = result
        .objects
        .map(|objects| objects.items)
        .unwrap_or_default()
        .into_iter()
        .map(MediaEntity::from)
        .collect();

    Ok(EntityPage {
        entities,
        total_count,
    })
}

/// Parse a `flavorAsset.list` response.
pub fn parse_flavor_list(body: &str) -> Result<Vec<FlavorAsset>, Error> {
    let result = parse_list::<FlavorAssetRecord>(body)?;
    Ok(result
        .objects
        .map(|objects| objects.items)
        .unwrap_or_default()
        .into_iter()
        .map(FlavorAsset::from)
        .collect())
}

/// Parse a `flavorAsset.delete` response, which is empty on success.
pub fn parse_delete_response(body: &str) -> Result<(), Error> {
    let envelope: Envelope<EmptyResult> = quick_xml::de::from_str(body)?;
    match envelope.result {
        Some(result) => check_api_error(result.error),
        None => Ok(()),
    }
}
