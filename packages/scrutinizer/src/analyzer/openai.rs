//! OpenAI-compatible implementation of the analyzer trait.
//!
//! Speaks the chat-completions protocol, so it works against OpenAI
//! itself or any compatible gateway (Groq, Cerebras, NVIDIA NIM, local
//! inference) by overriding the base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::analyzer::prompts::{format_analyze_prompt, ANALYZE_SYSTEM_PROMPT};
use crate::analyzer::parse_verdict;
use crate::error::{AnalysisError, AnalysisResult};
use crate::traits::analyzer::JobAnalyzer;
use crate::types::criteria::SearchCriteria;
use crate::types::job::{AnalysisVerdict, ValidatedJob};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Analyzer backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiAnalyzer {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    freshness_days: i64,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer with the given API key.
    pub fn new(api_key: impl Into<String>) -> AnalysisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AnalysisError::Service(Box::new(e)))?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: OPENAI_API_URL.to_string(),
            freshness_days: crate::types::config::DEFAULT_FRESHNESS_DAYS,
        })
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> AnalysisResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AnalysisError::Service(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "OPENAI_API_KEY environment variable not set",
            )))
        })?;
        Self::new(api_key)
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (compatible gateways, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Freshness window quoted to the model in the prompt; keep in sync
    /// with the validator's window.
    pub fn with_freshness_days(mut self, days: i64) -> Self {
        self.freshness_days = days;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, system: &str, user: &str) -> AnalysisResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Service(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Service(
                format!("chat API error: {status} - {text}").into(),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Service(Box::new(e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::Service("chat API returned no choices".into()))
    }
}

#[async_trait]
impl JobAnalyzer for OpenAiAnalyzer {
    async fn analyze(
        &self,
        job: &ValidatedJob,
        criteria: &SearchCriteria,
    ) -> AnalysisResult<AnalysisVerdict> {
        tracing::info!(url = %job.url, model = %self.model, "requesting relevance judgment");

        let prompt = format_analyze_prompt(job, criteria, self.freshness_days);
        let raw = self.chat(ANALYZE_SYSTEM_PROMPT, &prompt).await?;

        parse_verdict(&raw, &job.url)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
