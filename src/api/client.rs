//! HTTP implementation of the persistence gateway, speaking JSON to the
//! backend admin API.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;

use super::gateway::{ExportSelector, FieldGateway, QueryFilter};
use crate::questionnaire::field::{Field, FieldInstance};

/// Gateway client with connection pooling and bearer-token auth
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("questionnaire-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Templates live in their own collection; concrete and reference
    /// fields share the questionnaire field collection
    fn collection_for(&self, instance: FieldInstance) -> String {
        match instance {
            FieldInstance::Template => format!("{}/admin/fieldtemplates", self.base_url),
            _ => format!("{}/admin/fields", self.base_url),
        }
    }

    fn templates_url(&self) -> String {
        format!("{}/admin/fieldtemplates", self.base_url)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        bail!("backend returned {status}: {body}");
    }
}

#[async_trait]
impl FieldGateway for HttpGateway {
    async fn create(&self, field: &Field) -> Result<Field> {
        let url = self.collection_for(field.instance);
        debug!("POST {url} (label '{}')", field.label);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(field)
            .send()
            .await
            .context("create request failed")?;

        let response = self.check(response).await?;
        response
            .json::<Field>()
            .await
            .context("create response was not a field")
    }

    async fn update(&self, field: &Field) -> Result<()> {
        if !field.is_saved() {
            bail!("cannot update a field without a server-assigned id");
        }
        let url = format!("{}/{}", self.collection_for(field.instance), field.id);
        debug!("PUT {url}");

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(field)
            .send()
            .await
            .context("update request failed")?;

        self.check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str, instance: FieldInstance) -> Result<()> {
        // same collection the field was created in
        let url = format!("{}/{}", self.collection_for(instance), id);
        debug!("DELETE {url}");

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("delete request failed")?;

        self.check(response).await?;
        Ok(())
    }

    async fn query(&self, filter: QueryFilter) -> Result<Vec<Field>> {
        // an unconstrained query spans both collections
        let urls = match filter.instance {
            Some(instance) => vec![self.collection_for(instance)],
            None => vec![
                self.templates_url(),
                format!("{}/admin/fields", self.base_url),
            ],
        };

        let mut fields = Vec::new();
        for url in urls {
            debug!("GET {url}");
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.access_token)
                .send()
                .await
                .context("query request failed")?;

            let response = self.check(response).await?;
            let batch: Vec<Field> = response
                .json()
                .await
                .context("query response was not a field list")?;
            fields.extend(batch);
        }
        Ok(fields)
    }

    async fn export(&self, selector: ExportSelector) -> Result<Value> {
        let url = match &selector {
            ExportSelector::All => self.templates_url(),
            ExportSelector::One(id) => format!("{}/{}", self.templates_url(), id),
        };
        debug!("GET {url}?export=true");

        let response = self
            .http_client
            .get(&url)
            .query(&[("export", "true")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("export request failed")?;

        let response = self.check(response).await?;
        response
            .json::<Value>()
            .await
            .context("export response was not JSON")
    }
}
