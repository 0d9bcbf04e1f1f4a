use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::http::read_body;
use crate::ImageGeneration;

pub const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
pub const IMAGE_API_KEY_VAR: &str = "OPENAI_API_KEY";

pub const IMAGE_MODEL: &str = "dall-e-2";
pub const IMAGE_SIZE: &str = "512x512";
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the image-generation service. Present only when the optional
/// credential was configured at startup.
pub struct ImageClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
}

#[derive(Serialize, Debug, Clone)]
struct ImageGenerationBody {
    model: String,
    prompt: String,
    n: u32,
    size: String,
}

#[derive(Deserialize, Debug, Clone)]
struct ImageObject {
    url: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageObject>,
}

impl ImageClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            url: OPENAI_IMAGES_URL.to_string(),
        }
    }

    /// Request exactly one 512x512 image for the scene description and
    /// return its URL.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = ImageGenerationBody {
            model: IMAGE_MODEL.to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        };

        let response = self
            .http
            .post(&self.url)
            .timeout(IMAGE_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let body = read_body(response).await?;
        first_url(body)
    }
}

/// Extract `data[0].url` from the raw response body. The body travels with
/// the error so a malformed response can be diagnosed from the log.
fn first_url(body: String) -> Result<String, GenerateError> {
    let parsed: ImagesResponse = serde_json::from_str(&body)
        .map_err(|_| GenerateError::ResponseFormat { body: body.clone() })?;

    parsed
        .data
        .into_iter()
        .next()
        .and_then(|image| image.url)
        .ok_or(GenerateError::ResponseFormat { body })
}

#[async_trait]
impl ImageGeneration for ImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError> {
        self.generate(prompt).await
    }
}
