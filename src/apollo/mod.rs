//! Apollo people/company search client.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApolloConfig;
use crate::error::{ConfigError, UpstreamError};
use crate::models::search::{CompanySearchResponse, PeopleSearchResponse};
use crate::search::NormalizedSearch;
use crate::search::query::{SearchQuery, build_company_query, build_person_query};
use crate::search::shape::{shape_companies_page, shape_people_page};

const COMPANY_SEARCH_PATH: &str = "/mixed_companies/search";
const PEOPLE_SEARCH_PATH: &str = "/mixed_people/api_search";

#[derive(Clone)]
pub struct ApolloClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApolloClient {
    pub fn new(config: &ApolloConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post(&self, path: &str, query: &SearchQuery) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, filters = query.filters.len(), page = query.page, "Apollo search");

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Cache-Control", "no-cache")
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Runs a company search. Upstream failures come back as the response's
    /// `error` with no companies.
    pub async fn search_companies(&self, search: &NormalizedSearch) -> CompanySearchResponse {
        let query = build_company_query(search);
        match self.post(COMPANY_SEARCH_PATH, &query).await {
            Ok(body) => shape_companies_page(&body, search.page),
            Err(e) => {
                warn!("Company search error: {e}");
                CompanySearchResponse::failed(search.page, e.to_string())
            }
        }
    }

    /// Runs a people search, same failure handling as companies.
    pub async fn search_people(&self, search: &NormalizedSearch) -> PeopleSearchResponse {
        let query = build_person_query(search);
        match self.post(PEOPLE_SEARCH_PATH, &query).await {
            Ok(body) => shape_people_page(&body, search.page),
            Err(e) => {
                warn!("People search error: {e}");
                PeopleSearchResponse::failed(search.page, e.to_string())
            }
        }
    }
}
