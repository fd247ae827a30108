//! Gemini-backed price source.
//!
//! There is no real pricing backend: the model is asked to act as an
//! Australian grocery price API and answer with JSON matching a fixed schema.

use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{sanitize_offers, PriceSource, PriceSourceError};
use crate::config::GeminiConfig;
use crate::models::Product;
use crate::util::compact_text;

/// Price source that asks a Gemini model to generate offers
#[derive(Debug, Clone)]
pub struct GeminiPriceSource {
    client: Client,
    config: GeminiConfig,
}

impl GeminiPriceSource {
    pub fn new(config: GeminiConfig) -> Result<Self, PriceSourceError> {
        Ok(Self {
            client: Client::builder().build()?,
            config,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, query: &str) -> Result<Request, PriceSourceError> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt_for(query) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            },
        });

        self.client
            .post(endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .build()
            .map_err(PriceSourceError::Http)
    }
}

impl PriceSource for GeminiPriceSource {
    async fn fetch_offers(&self, query: &str) -> Result<Vec<Product>, PriceSourceError> {
        let query = super::normalize_query(query)?;
        let request = self.build_request(&query)?;
        let response = self.client.execute(request).await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(PriceSourceError::Api(
                "Unauthorized price request (check configured Gemini API key)".to_string(),
            ));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PriceSourceError::Api(format!(
                "Price request failed with {status}: {}",
                compact_text(&body)
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.text().ok_or_else(|| {
            PriceSourceError::Api("Response did not include any generated text".to_string())
        })?;
        let raw: Value = serde_json::from_str(text.trim())?;
        Ok(sanitize_offers(raw))
    }
}

fn prompt_for(query: &str) -> String {
    format!(
        "Act as an Australian grocery price comparison API. A user is searching for '{query}'. \
         Generate a realistic list of products from Australian supermarkets like Coles, \
         Woolworths, and ALDI. Return a JSON array that strictly adheres to the provided schema. \
         For each product, create a unique ID, a descriptive name, the store name, a realistic \
         price, the quantity, and a discount amount."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": {
                    "type": "STRING",
                    "description": "A unique identifier for the product offering."
                },
                "name": {
                    "type": "STRING",
                    "description": "The full name of the product, including brand and size."
                },
                "store": {
                    "type": "STRING",
                    "description": "The name of the supermarket, e.g., Coles, Woolworths, ALDI."
                },
                "price": {
                    "type": "NUMBER",
                    "description": "The current price of the product in AUD."
                },
                "quantity": {
                    "type": "STRING",
                    "description": "The unit of measurement, e.g., '1L', '500g', 'Each'."
                },
                "discountAmount": {
                    "type": "NUMBER",
                    "description": "The discount amount in AUD. 0 if not on sale."
                }
            },
            "required": ["id", "name", "store", "price", "quantity", "discountAmount"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
