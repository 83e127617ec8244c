use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, trace};

use super::{wire, CatalogClient, EntityPage, FlavorAsset};
use crate::error::Error;

/// Kaltura API v3 client. Every call is a form POST carrying the session as
/// `ks`; responses are XML.
#[derive(Clone)]
pub struct KalturaClient {
    http: reqwest::Client,
    base_url: Url,
    session: String,
}

impl KalturaClient {
    pub fn new(service_url: &str, session: &str, timeout: Duration) -> Result<Self, Error> {
        let mut service_url = service_url.trim().to_string();
        if !service_url.ends_with('/') {
            service_url.push('/');
        }
        let base_url = Url::parse(&service_url).map_err(|e| {
            Error::InvalidConfig(format!("invalid service URL '{}': {}", service_url, e))
        })?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            session: session.to_string(),
        })
    }

    fn url(&self, service: &str, action: &str) -> Result<Url, Error> {
        let path = format!("api_v3/service/{}/action/{}", service, action);
        self.base_url
            .join(&path)
            .map_err(|e| Error::InvalidConfig(format!("failed to build URL for {}: {}", path, e)))
    }

    async fn post_form(&self, url: Url, params: &[(&str, String)]) -> Result<String, Error> {
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.push(("ks", self.session.as_str()));
        form.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        trace!("POST {}", url);
        let response = self.http.post(url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogClient for KalturaClient {
    async fn list_entities(&self, page_index: u32, page_size: u32) -> Result<EntityPage, Error> {
        let url = self.url("media", "list")?;
        // Kaltura pager indices start at 1.
        let params = [
            ("filter[objectType]", "KalturaMediaEntryFilter".to_string()),
            ("filter[orderBy]", "-createdAt".to_string()),
            ("pager[pageIndex]", (page_index + 1).to_string()),
            ("pager[pageSize]", page_size.to_string()),
        ];
        let body = self.post_form(url, &params).await?;
        let page = wire::parse_entity_page(&body)?;
        debug!(
            "media.list page {} returned {} of {} entities",
            page_index,
            page.entities.len(),
            page.total_count
        );
        Ok(page)
    }

    async fn list_variants(&self, entity_id: &str) -> Result<Vec<FlavorAsset>, Error> {
        let url = self.url("flavorasset", "list")?;
        let params = [
            ("filter[objectType]", "KalturaFlavorAssetFilter".to_string()),
            ("filter[entryIdEqual]", entity_id.to_string()),
        ];
        let body = self.post_form(url, &params).await?;
        wire::parse_flavor_list(&body)
    }

    async fn delete_variant(&self, variant_id: &str) -> Result<(), Error> {
        let url = self.url("flavorasset", "delete")?;
        let body = self.post_form(url, &[("id", variant_id.to_string())]).await?;
        wire::parse_delete_response(&body)
    }
}
