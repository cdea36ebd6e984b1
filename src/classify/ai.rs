//! AI-backed content analysis
//!
//! Sends a bounded excerpt of the page plus the site goal to a
//! chat-completions endpoint and maps the structured answer to a verdict.
//! Every failure along the way (transport, auth, quota, malformed payload)
//! fails open to the deterministic keyword classifier.

use crate::classify::{ClassifierError, KeywordClassifier, Verdict};
use crate::config::ClassifierConfig;
use crate::crawler::SiteGoal;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Classifier backed by an external completion service
pub struct AiClassifier {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    fallback: KeywordClassifier,
    config: ClassifierConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
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
    content: String,
}

/// Structured analysis the model is asked to return
#[derive(Debug, Deserialize)]
struct Analysis {
    relevance_score: u32,
    is_suspicious: bool,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    summary: String,
}

impl AiClassifier {
    pub fn new(api_key: String, config: ClassifierConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            fallback: KeywordClassifier::new(config.clone()),
            config,
        }
    }

    /// Overrides the completion endpoint (used by tests to point at a mock
    /// server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Classifies page text, falling back to the keyword path on any error
    pub async fn classify(&self, text: &str, goal: &SiteGoal) -> Verdict {
        match self.analyze(text, goal).await {
            Ok(analysis) => self.verdict_from(analysis),
            Err(e) => {
                tracing::warn!("AI analysis failed, using keyword fallback: {}", e);
                self.fallback.classify(text, goal)
            }
        }
    }

    fn verdict_from(&self, analysis: Analysis) -> Verdict {
        if analysis.is_suspicious {
            let reason = if analysis.reasons.is_empty() {
                analysis.summary
            } else {
                analysis.reasons.join("; ")
            };
            return Verdict::Suspicious(reason);
        }

        if analysis.relevance_score < self.config.relevance_threshold {
            return Verdict::LowRelevance(format!(
                "relevance score {}/10",
                analysis.relevance_score
            ));
        }

        Verdict::Ok
    }

    async fn analyze(&self, text: &str, goal: &SiteGoal) -> Result<Analysis, ClassifierError> {
        let excerpt: String = text.chars().take(self.config.excerpt_limit).collect();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(&excerpt, &goal.summary),
            }],
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ClassifierError::Malformed("empty choices".to_string()))?;

        parse_analysis(content)
    }
}

fn build_prompt(excerpt: &str, goal_summary: &str) -> String {
    format!(
        "You are an intelligent content evaluator. Analyze the following webpage content.\n\n\
         Main website goal: {goal_summary}\n\n\
         Content: {excerpt}\n\n\
         Evaluate:\n\
         1. Relevance to the main website goal (scale 1-10)\n\
         2. Scam/suspicious indicators (true/false with reasons)\n\n\
         Respond with JSON only:\n\
         {{\"relevance_score\": <1-10>, \"is_suspicious\": <true|false>, \
         \"reasons\": [\"...\"], \"summary\": \"brief summary\"}}"
    )
}

/// Parses the model's answer, tolerating a Markdown code fence around the
/// JSON object
fn parse_analysis(content: &str) -> Result<Analysis, ClassifierError> {
    let trimmed = content.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(json).map_err(|e| ClassifierError::Malformed(e.to_string()))
}
