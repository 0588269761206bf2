//! Keyword Assist
//!
//! One-shot call to an external text-generation service that suggests
//! search keywords for a menu item. Output is advisory: callers fall back
//! to an empty list and never fail a catalog write because of it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use shared::models::MenuItemCreate;

use crate::catalog::CatalogStore;
use crate::core::Config;
use crate::utils::{AppError, AppResult};

pub use crate::catalog::normalize::normalize_keywords;

/// Fixed prompt sent with every request; `input` carries the item fields
pub const PROMPT_TEMPLATE: &str = "Generate short search keywords a restaurant guest \
might type to find this menu item. \
Consider the dish name, its tags and its category. Include common synonyms and \
ingredient names. Answer only with JSON of the form {\"searchKeywords\": [\"...\"]}.";

/// Fields the generator sees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInput {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestion {
    pub search_keywords: Vec<String>,
}

#[async_trait]
pub trait KeywordGenerator: Send + Sync {
    /// Normalized (lower-case, de-duplicated) keywords or `AssistUnavailable`
    async fn generate(&self, input: &KeywordInput) -> AppResult<Vec<String>>;
}

/// Used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledKeywordGenerator;

#[async_trait]
impl KeywordGenerator for DisabledKeywordGenerator {
    async fn generate(&self, _input: &KeywordInput) -> AppResult<Vec<String>> {
        Err(AppError::assist_unavailable("Keyword assist is not configured"))
    }
}

/// HTTP client for the generation service
///
/// POSTs `{prompt, input}` and expects `{searchKeywords: [...]}`.
#[derive(Debug, Clone)]
pub struct HttpKeywordGenerator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpKeywordGenerator {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'static str,
    input: &'a KeywordInput,
}

fn unavailable(reason: impl std::fmt::Display) -> AppError {
    AppError::assist_unavailable(format!("Keyword assist failed: {reason}"))
}

#[async_trait]
impl KeywordGenerator for HttpKeywordGenerator {
    async fn generate(&self, input: &KeywordInput) -> AppResult<Vec<String>> {
        let mut request = self.client.post(&self.url).json(&GenerateRequest {
            prompt: PROMPT_TEMPLATE,
            input,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("service answered {status}"))
                .with_detail("status", status.as_u16()));
        }
        let suggestion: KeywordSuggestion = response.json().await.map_err(unavailable)?;
        Ok(normalize_keywords(&suggestion.search_keywords))
    }
}

/// Generator selected by configuration
pub fn from_config(config: &Config) -> AppResult<std::sync::Arc<dyn KeywordGenerator>> {
    match &config.keyword_assist_url {
        Some(url) => {
            tracing::info!(url = %url, "Keyword assist enabled");
            Ok(std::sync::Arc::new(HttpKeywordGenerator::new(
                url.clone(),
                config.keyword_assist_api_key.clone(),
                Duration::from_millis(config.keyword_assist_timeout_ms),
            )?))
        }
        None => {
            tracing::info!("Keyword assist disabled (KEYWORD_ASSIST_URL not set)");
            Ok(std::sync::Arc::new(DisabledKeywordGenerator))
        }
    }
}

/// Advisory wrapper: any failure is logged and becomes an empty list
pub async fn suggest_or_empty(
    generator: &dyn KeywordGenerator,
    input: &KeywordInput,
) -> Vec<String> {
    match generator.generate(input).await {
        Ok(keywords) => keywords,
        Err(e) => {
            tracing::warn!(
                item = %input.name,
                error = %e,
                "Keyword generation failed, saving without keywords"
            );
            Vec::new()
        }
    }
}

/// Fill `search_keywords` of a create payload that asked for generation
///
/// Only runs when the payload has no keywords of its own. The category name
/// is looked up for the prompt; an unresolvable category is left for the
/// store to reject.
pub async fn fill_keywords(
    generator: &dyn KeywordGenerator,
    store: &dyn CatalogStore,
    ns: &str,
    mut data: MenuItemCreate,
) -> MenuItemCreate {
    if !data.generate_keywords || !data.search_keywords.is_empty() || data.name.trim().is_empty() {
        return data;
    }

    let category = match data.category_id {
        Some(id) => store.get_category(ns, id).await.ok().map(|c| c.name),
        None => None,
    };
    let input = KeywordInput {
        name: data.name.trim().to_string(),
        tags: data.tags.clone(),
        category,
    };
    data.search_keywords = suggest_or_empty(generator, &input).await;
    data
}
