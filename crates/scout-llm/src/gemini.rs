use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use scout_core::capability::Delegate;
use scout_core::errors::DelegateError;

use crate::models::{self, GeminiModelInfo};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Delegate backed by the Gemini `generateContent` API.
///
/// One blocking request per completion: no streaming, no retries, no client
/// timeout — a slow model call holds the interaction until it resolves.
pub struct GeminiDelegate {
    client: reqwest::Client,
    api_key: SecretString,
    model: &'static GeminiModelInfo,
    temperature: f64,
}

impl GeminiDelegate {
    pub fn new(api_key: SecretString, model: &'static GeminiModelInfo) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Scout/0.1")
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            model,
            temperature: model.default_temperature,
        }
    }

    /// Build from process environment: `GEMINI_API_KEY` is required; the
    /// model comes from the override argument, then `SCOUT_MODEL`, then the
    /// registry default.
    pub fn from_env(model_override: Option<&str>) -> Result<Self, DelegateError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map(SecretString::from)
            .map_err(|_| DelegateError::AuthenticationFailed("GEMINI_API_KEY not set".into()))?;

        let env_model = std::env::var("SCOUT_MODEL").ok();
        let name = model_override.or(env_model.as_deref());
        let model = match name {
            Some(name) => models::find_model(name)
                .ok_or_else(|| DelegateError::InvalidRequest(format!("unknown model: {name}")))?,
            None => models::default_model(),
        };

        Ok(Self::new(api_key, model))
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl Delegate for GeminiDelegate {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        self.model.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, DelegateError> {
        let url = format!("{GEMINI_API_URL}/{}:generateContent", self.model.name);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| DelegateError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DelegateError::from_status(status.as_u16(), body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DelegateError::MalformedResponse(e.to_string()))?;

        let text = extract_text(&body)
            .ok_or_else(|| DelegateError::MalformedResponse("no candidates in response".into()))?;
        if text.trim().is_empty() {
            return Err(DelegateError::EmptyResponse);
        }

        tracing::debug!(model = self.model.name, chars = text.len(), "completion received");
        Ok(text)
    }
}

/// Pull the concatenated text parts out of the first candidate.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
