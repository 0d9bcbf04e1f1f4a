use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GeminiClient, GEMINI_MODEL};
use crate::error::GenerateError;
use crate::http::read_body;
use crate::TextGeneration;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone)]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub(crate) fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct Candidate {
    pub content: Content,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub(crate) fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self.http.post(&url).json(&request).send().await?;
        let body = read_body(response).await?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|_| GenerateError::ResponseFormat { body: body.clone() })?;

        parsed
            .text()
            .ok_or(GenerateError::ResponseFormat { body })
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        self.generate(prompt).await
    }
}
