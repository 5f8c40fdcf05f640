use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::{Product, ProductPayload};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

/// Client for the remote products service, the system of record.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    base_url: String,
    client: Client,
}

/// What a write request came back with. Only a request that never got a
/// response is an error; any status lands here.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub method: &'static str,
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(Error::Status {
            method: self.method,
            url: self.url,
            status: self.status,
            body: self.body,
        })
    }

    /// The record echoed back by the server, if the body is one.
    pub fn server_product(&self) -> Option<Product> {
        serde_json::from_str(&self.body).ok()
    }

    /// The id assigned by the server when the body carries at least `{"id": ...}`.
    pub fn server_id(&self) -> Option<i64> {
        #[derive(Deserialize)]
        struct Assigned {
            id: i64,
        }

        serde_json::from_str::<Assigned>(&self.body)
            .ok()
            .map(|assigned| assigned.id)
    }
}

impl ProductsApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("cannot build http client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.collection_url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                method: "GET",
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Transport {
            method: "GET",
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(Error::Status {
                method: "GET",
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })
    }

    #[tracing::instrument(skip(self, payload), fields(id = payload.id))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<WriteOutcome> {
        let url = self.collection_url();
        let request = self.client.post(&url).json(payload);
        self.write("POST", url, request).await
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<WriteOutcome> {
        let url = self.item_url(id);
        let request = self.client.put(&url).json(payload);
        self.write("PUT", url, request).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<WriteOutcome> {
        let url = self.item_url(id);
        let request = self.client.delete(&url);
        self.write("DELETE", url, request).await
    }

    async fn write(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<WriteOutcome> {
        let response = request.send().await.map_err(|source| Error::Transport {
            method,
            url: url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        // The request has settled once headers arrive; an unreadable body is just empty.
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(method, url = %url, status, "write settled");

        Ok(WriteOutcome {
            method,
            url,
            status,
            body,
        })
    }
}
