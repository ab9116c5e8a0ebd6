use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::core::matcher::BreedStore;
use crate::models::{StoreBreedRow, StoreFilter};

/// Errors that can occur when talking to the hosted breed store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase REST client for the breed reference table.
///
/// Queries go through the PostgREST endpoint: one query parameter per
/// predicate, repeated parameters ANDed together. Every query carries an
/// explicit `order=id.asc` so "first match" is reproducible across store
/// deployments.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl SupabaseClient {
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            table,
            client,
        }
    }

    /// Translate one predicate into a PostgREST operator expression.
    fn filter_param(filter: &StoreFilter) -> (&'static str, String) {
        match filter {
            StoreFilter::Eq(col, value) => (*col, format!("eq.{}", value)),
            StoreFilter::In(col, values) => (*col, format!("in.({})", values.join(","))),
            StoreFilter::Neq(col, value) => (*col, format!("neq.{}", value)),
            StoreFilter::NotContains(col, value) => (*col, format!("not.cs.{{{}}}", value)),
        }
    }

    fn query_url(&self, filters: &[StoreFilter], limit: usize) -> String {
        let mut params: Vec<String> = vec!["select=*".to_string()];

        for filter in filters {
            let (col, expr) = Self::filter_param(filter);
            params.push(format!("{}={}", col, urlencoding::encode(&expr)));
        }

        params.push("order=id.asc".to_string());
        params.push(format!("limit={}", limit));

        format!(
            "{}/rest/v1/{}?{}",
            self.base_url.trim_end_matches('/'),
            self.table,
            params.join("&")
        )
    }

    /// Run a conjunction of predicates against the breed table.
    pub async fn query_breeds(
        &self,
        filters: &[StoreFilter],
        limit: usize,
    ) -> Result<Vec<StoreBreedRow>, StoreError> {
        let url = self.query_url(filters, limit);
        tracing::debug!("Querying breed store: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Breed query failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<StoreBreedRow>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse breed rows: {}", e)))
    }

    /// Fetch a single row by primary key.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Option<StoreBreedRow>, StoreError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&id={}&limit=1",
            self.base_url.trim_end_matches('/'),
            self.table,
            urlencoding::encode(&format!("eq.{}", id))
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Breed lookup failed: {}",
                response.status()
            )));
        }

        let rows: Vec<StoreBreedRow> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse breed row: {}", e)))?;

        Ok(rows.into_iter().next())
    }
}

impl BreedStore for SupabaseClient {
    type Error = StoreError;

    async fn find_first(
        &self,
        filters: &[StoreFilter],
    ) -> Result<Option<StoreBreedRow>, Self::Error> {
        Ok(self.query_breeds(filters, 1).await?.into_iter().next())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoreBreedRow>, Self::Error> {
        self.fetch_by_id(id).await
    }
}
