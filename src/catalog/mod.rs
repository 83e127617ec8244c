//! Remote media catalog: record types and the client boundary the sweep
//! talks to.

pub mod kaltura;
pub mod wire;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::error::Error;

pub use kaltura::KalturaClient;

/// One media item in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntity {
    pub id: String,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MediaEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            created_at: None,
            updated_at: None,
        }
    }
}

fn fmt_timestamp(ts: &Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for MediaEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  id:        {}", self.id)?;
        writeln!(f, "  name:      {}", self.name.as_deref().unwrap_or("-"))?;
        writeln!(f, "  createdAt: {}", fmt_timestamp(&self.created_at))?;
        write!(f, "  updatedAt: {}", fmt_timestamp(&self.updated_at))
    }
}

/// A derived encoding ("flavor") of a media entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FlavorAsset {
    pub id: String,
    pub entry_id: Option<String>,
    /// Set on the source upload the other flavors were transcoded from.
    pub is_original: bool,
    pub flavor_params_id: Option<String>,
    pub size_kb: Option<u64>,
}

impl FlavorAsset {
    pub fn new(id: impl Into<String>, is_original: bool) -> Self {
        Self {
            id: id.into(),
            entry_id: None,
            is_original,
            flavor_params_id: None,
            size_kb: None,
        }
    }
}

/// One page of media entities plus the catalog-wide total reported with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityPage {
    pub entities: Vec<MediaEntity>,
    pub total_count: u64,
}

/// Operations the sweep needs from the remote catalog. The credential is held
/// by the implementation.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch page `page_index` (zero-based) of all media, newest first.
    async fn list_entities(&self, page_index: u32, page_size: u32) -> Result<EntityPage, Error>;

    async fn list_variants(&self, entity_id: &str) -> Result<Vec<FlavorAsset>, Error>;

    async fn delete_variant(&self, variant_id: &str) -> Result<(), Error>;
}
